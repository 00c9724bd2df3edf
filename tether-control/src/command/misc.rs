use std::borrow::Cow;
use std::sync::Arc;

use crate::command::{publish_failure, Command};
use crate::event::{CameraEvent, EventPayload};
use crate::session::CameraSession;

/// Persists the camera's current settings to its non-volatile memory.
/// Touches nothing in the cache.
pub struct SaveSettingCommand {
    session: Arc<CameraSession>,
}

impl SaveSettingCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for SaveSettingCommand {
    fn execute(&self) -> bool {
        match self.session.link().save_settings(self.session.handle()) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Fire-and-forget bus publish with no device effect, for cross-layer
/// signaling ("session ended unexpectedly" and the like).
pub struct NotifyCommand {
    session: Arc<CameraSession>,
    event: CameraEvent,
}

impl NotifyCommand {
    pub fn new(session: Arc<CameraSession>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            session,
            event: CameraEvent::new(name),
        }
    }

    pub fn with_text(session: Arc<CameraSession>, name: impl Into<Cow<'static, str>>, text: String) -> Self {
        Self {
            session,
            event: CameraEvent::with_payload(name, EventPayload::Text(text)),
        }
    }
}

impl Command for NotifyCommand {
    fn execute(&self) -> bool {
        self.session.notify_listeners(&self.event);
        true
    }
}
