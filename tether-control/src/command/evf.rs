use std::sync::Arc;

use log::{debug, info};

use tether_core::{EvfOutputDevice, LensDrive, Point, PropertyId, PropertyValue, StatusCode};

use crate::command::{publish_failure, Command};
use crate::event::{self, CameraEvent, EventPayload};
use crate::session::CameraSession;

/// Switches the camera's live-view mode on and routes the stream to the
/// host.
pub struct StartEvfCommand {
    session: Arc<CameraSession>,
}

impl StartEvfCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for StartEvfCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();
        let camera = self.session.handle();

        if let Err(status) = link.set_property(camera, PropertyId::EvfMode, &PropertyValue::UInt32(1)) {
            return publish_failure(&self.session, status, EventPayload::None);
        }
        self.session.set_evf_mode(1);

        let device = self.session.evf_output_device() | EvfOutputDevice::PC;
        match link.set_property(camera, PropertyId::EvfOutputDevice, &PropertyValue::UInt32(device.bits())) {
            Ok(()) => {
                self.session.set_evf_output_device(device);
                self.session.notify_listeners(&CameraEvent::with_payload(
                    event::PROPERTY_CHANGED,
                    EventPayload::Property(PropertyId::EvfOutputDevice),
                ));
                info!("live view started");
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Stops routing live view to the host and switches the mode back off.
pub struct EndEvfCommand {
    session: Arc<CameraSession>,
}

impl EndEvfCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for EndEvfCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();
        let camera = self.session.handle();

        let device = self.session.evf_output_device() - EvfOutputDevice::PC;
        if let Err(status) = link.set_property(camera, PropertyId::EvfOutputDevice, &PropertyValue::UInt32(device.bits()))
        {
            return publish_failure(&self.session, status, EventPayload::None);
        }
        self.session.set_evf_output_device(device);

        match link.set_property(camera, PropertyId::EvfMode, &PropertyValue::UInt32(0)) {
            Ok(()) => {
                self.session.set_evf_mode(0);
                self.session.notify_listeners(&CameraEvent::with_payload(
                    event::PROPERTY_CHANGED,
                    EventPayload::Property(PropertyId::EvfOutputDevice),
                ));
                info!("live view ended");
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Pulls one live-view frame and its zoom/framing metadata into the session.
///
/// The device produces frames on its own cadence; "no frame yet" is a benign
/// non-result (resolves `true`, publishes nothing, touches nothing).
pub struct DownloadEvfCommand {
    session: Arc<CameraSession>,
}

impl DownloadEvfCommand {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            session,
        }
    }
}

impl Command for DownloadEvfCommand {
    fn execute(&self) -> bool {
        match self.session.link().download_evf(self.session.handle()) {
            Ok(frame) => {
                self.session.set_evf_zoom(frame.zoom);
                self.session.set_evf_zoom_rect(frame.zoom_rect);
                self.session.set_evf_zoom_position(frame.image_position);
                self.session.store_evf_frame(frame);
                self.session.notify_listeners(&CameraEvent::new(event::EVF_DATA_CHANGED));
                true
            }
            Err(StatusCode::OBJECT_NOT_READY) => {
                debug!("no live-view frame ready");
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Autofocuses at a live-view coordinate. The point is device-resolution
/// relative; screen-space transforms belong to the caller.
pub struct DoEvfAfCommand {
    session: Arc<CameraSession>,
    point: Point,
}

impl DoEvfAfCommand {
    pub fn new(session: Arc<CameraSession>, point: Point) -> Self {
        Self {
            session,
            point,
        }
    }
}

impl Command for DoEvfAfCommand {
    fn execute(&self) -> bool {
        match self.session.link().do_evf_af(self.session.handle(), self.point) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}

/// Steps the focus motor by one discrete near/far increment. The advisory
/// UI lock is held for the duration and released on every exit path.
pub struct DriveLensCommand {
    session: Arc<CameraSession>,
    step: LensDrive,
}

impl DriveLensCommand {
    pub fn new(session: Arc<CameraSession>, step: LensDrive) -> Self {
        Self {
            session,
            step,
        }
    }
}

impl Command for DriveLensCommand {
    fn execute(&self) -> bool {
        let _ui_lock = self.session.ui_lock_scope();

        match self.session.link().drive_lens(self.session.handle(), self.step) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::None),
        }
    }
}
