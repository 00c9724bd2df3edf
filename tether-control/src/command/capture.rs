use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use tether_core::{Capacity, DeviceCommand, ShutterButton};

use crate::command::{publish_failure, Command};
use crate::event::{self, CameraEvent, EventPayload};
use crate::link::ObjectRef;
use crate::session::CameraSession;

/// Fires a capture. The resulting image is announced asynchronously by the
/// device and transferred by a separate `DownloadCommand`.
pub struct TakePictureCommand {
    session: Arc<CameraSession>,
}

impl TakePictureCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for TakePictureCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();

        match link.send_command(self.session.handle(), DeviceCommand::TakePicture, 0) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Transitions the shutter button state (off / halfway / completely).
pub struct PressShutterButtonCommand {
    session: Arc<CameraSession>,
    state: ShutterButton,
}

impl PressShutterButtonCommand {
    pub fn new(session: Arc<CameraSession>, state: ShutterButton) -> Self {
        Self {
            session,
            state,
        }
    }
}

impl Command for PressShutterButtonCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();
        let param = u32::from(self.state) as i32;

        match link.send_command(self.session.handle(), DeviceCommand::PressShutterButton, param) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Reports simulated remaining storage to the device. Some firmwares refuse
/// tethered capture without a card until told there is room on the host.
pub struct SetCapacityCommand {
    session: Arc<CameraSession>,
    capacity: Capacity,
}

impl SetCapacityCommand {
    pub fn new(session: Arc<CameraSession>, capacity: Capacity) -> Self {
        Self {
            session,
            capacity,
        }
    }
}

impl Command for SetCapacityCommand {
    fn execute(&self) -> bool {
        match self.session.link().set_capacity(self.session.handle(), self.capacity) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Transfers a completed capture's directory item to local storage. The
/// device-side reference is owned by this command and released when it is
/// dropped, on every outcome. With no destination given, the item's own
/// file name is used in the current directory.
pub struct DownloadCommand {
    session: Arc<CameraSession>,
    item: ObjectRef,
    dest: Option<PathBuf>,
}

impl DownloadCommand {
    pub fn new(session: Arc<CameraSession>, item: ObjectRef) -> Self {
        Self {
            session,
            item,
            dest: None,
        }
    }

    pub fn with_destination(session: Arc<CameraSession>, item: ObjectRef, dest: PathBuf) -> Self {
        Self {
            session,
            item,
            dest: Some(dest),
        }
    }
}

impl Command for DownloadCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();

        let item_info = match link.item_info(self.item.handle()) {
            Ok(item_info) => item_info,
            Err(status) => return publish_failure(&self.session, status, EventPayload::None),
        };

        let dest = self.dest.clone().unwrap_or_else(|| PathBuf::from(&item_info.file_name));

        match link.download(self.item.handle(), &dest) {
            Ok(()) => {
                info!("downloaded {} ({} bytes)", dest.display(), item_info.size);
                self.session.notify_listeners(&CameraEvent::with_payload(
                    event::DOWNLOAD_COMPLETE,
                    EventPayload::Text(dest.display().to_string()),
                ));
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}
