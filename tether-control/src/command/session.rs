use std::sync::Arc;

use log::info;

use crate::command::{publish_failure, Command};
use crate::event::EventPayload;
use crate::session::CameraSession;

/// Establishes the device session on the camera reference.
pub struct OpenSessionCommand {
    session: Arc<CameraSession>,
}

impl OpenSessionCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for OpenSessionCommand {
    fn execute(&self) -> bool {
        match self.session.link().open_session(self.session.handle()) {
            Ok(()) => {
                self.session.set_open(true);
                info!("session opened");
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Tears the device session down. Idempotent: a second close on an
/// already-closed session is a no-op success. The property cache is
/// deliberately retained across close; a fresh open re-establishes it.
pub struct CloseSessionCommand {
    session: Arc<CameraSession>,
}

impl CloseSessionCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for CloseSessionCommand {
    fn execute(&self) -> bool {
        if !self.session.is_open() {
            return true;
        }

        match self.session.link().close_session(self.session.handle()) {
            Ok(()) => {
                self.session.set_open(false);
                info!("session closed");
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}
