use std::sync::Arc;

use log::info;

use tether_control::{CameraController, CameraRequest, CameraSession, RetryPolicy};
use tether_core::{
    failed_error, invalid_param_error, labels, Capacity, EvfFrame, LensDrive, Point, PropertyId, PropertyValue,
    Result, ShutterButton,
};

/// High-level tethering interface over one camera: connection lifecycle,
/// capture, live view and typed setting access, with all device work routed
/// through the controller's serialized queue.
pub struct TetheredCamera {
    controller: CameraController,
    connected: bool,
    live_view_active: bool,
}

impl TetheredCamera {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self {
            controller: CameraController::new(session),
            connected: false,
            live_view_active: false,
        }
    }

    pub fn with_policy(session: Arc<CameraSession>, retry: RetryPolicy, capacity: Capacity) -> Self {
        Self {
            controller: CameraController::with_policy(session, retry, capacity),
            connected: false,
            live_view_active: false,
        }
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn session(&self) -> &Arc<CameraSession> {
        self.controller.session()
    }

    /// Opens the session and schedules the initial state fetch (storage
    /// capacity, current property values, legal-value sets). Idempotent.
    pub fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }

        self.controller.handle_request(CameraRequest::Connect)?;
        self.connected = true;
        info!("camera connected");

        Ok(())
    }

    /// Stops live view if active and closes the session. Idempotent.
    pub fn disconnect(&mut self) -> Result<()> {
        if !self.connected {
            return Ok(());
        }

        if self.live_view_active {
            self.stop_live_view()?;
        }

        self.controller.handle_request(CameraRequest::Disconnect)?;
        self.connected = false;
        info!("camera disconnected");

        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn model_name(&self) -> String {
        self.session().model_name()
    }

    // ---- capture ----

    pub fn take_picture(&self) -> Result<()> {
        self.ensure_connected()?;
        self.controller.handle_request(CameraRequest::TakePicture)
    }

    pub fn press_shutter(&self, state: ShutterButton) -> Result<()> {
        self.ensure_connected()?;
        self.controller.handle_request(CameraRequest::PressShutter(state))
    }

    // ---- live view ----

    pub fn start_live_view(&mut self) -> Result<()> {
        self.ensure_connected()?;

        if self.live_view_active {
            return Ok(());
        }

        self.controller.handle_request(CameraRequest::StartLiveView)?;
        self.live_view_active = true;

        Ok(())
    }

    pub fn stop_live_view(&mut self) -> Result<()> {
        if !self.live_view_active {
            return Ok(());
        }

        self.controller.handle_request(CameraRequest::EndLiveView)?;
        self.live_view_active = false;

        Ok(())
    }

    pub fn live_view_active(&self) -> bool {
        self.live_view_active
    }

    /// Schedules a live-view frame pull; the frame lands in the session
    /// once the worker gets to it and is collected with `latest_frame`.
    pub fn request_frame(&self) -> Result<()> {
        self.ensure_connected()?;
        self.controller.handle_request(CameraRequest::DownloadFrame)
    }

    pub fn latest_frame(&self) -> Option<EvfFrame> {
        self.session().take_evf_frame()
    }

    /// Steps focus: positive direction is near, negative far; `level` 1-3
    /// picks the step magnitude.
    pub fn focus(&self, direction: i32, level: u32) -> Result<()> {
        self.ensure_connected()?;

        let step = match (direction > 0, level) {
            (true, 1) => LensDrive::Near1,
            (true, 2) => LensDrive::Near2,
            (true, 3) => LensDrive::Near3,
            (false, 1) => LensDrive::Far1,
            (false, 2) => LensDrive::Far2,
            (false, 3) => LensDrive::Far3,
            _ => return Err(invalid_param_error!(level)),
        };

        self.controller.handle_request(CameraRequest::DriveLens(step))
    }

    /// Autofocus at a live-view coordinate (device-resolution relative).
    pub fn auto_focus(&self, x: i32, y: i32) -> Result<()> {
        self.ensure_connected()?;
        self.controller.handle_request(CameraRequest::FocusAt(Point::new(x, y)))
    }

    // ---- settings ----

    pub fn iso(&self) -> u32 {
        self.session().iso()
    }

    pub fn set_iso(&self, value: u32) -> Result<()> {
        self.set_property(PropertyId::IsoSpeed, value)
    }

    pub fn aperture(&self) -> u32 {
        self.session().av()
    }

    pub fn set_aperture(&self, value: u32) -> Result<()> {
        self.set_property(PropertyId::Av, value)
    }

    pub fn shutter_speed(&self) -> u32 {
        self.session().tv()
    }

    pub fn set_shutter_speed(&self, value: u32) -> Result<()> {
        self.set_property(PropertyId::Tv, value)
    }

    pub fn available_iso_values(&self) -> Vec<(u32, String)> {
        self.available_values(PropertyId::IsoSpeed)
    }

    pub fn available_aperture_values(&self) -> Vec<(u32, String)> {
        self.available_values(PropertyId::Av)
    }

    pub fn available_shutter_values(&self) -> Vec<(u32, String)> {
        self.available_values(PropertyId::Tv)
    }

    pub fn save_settings(&self) -> Result<()> {
        self.ensure_connected()?;
        self.controller.handle_request(CameraRequest::SaveSettings)
    }

    fn set_property(&self, id: PropertyId, value: u32) -> Result<()> {
        self.ensure_connected()?;
        self.controller
            .handle_request(CameraRequest::SetProperty(id, PropertyValue::UInt32(value)))
    }

    /// Pairs each currently-legal value with its label, falling back to the
    /// raw code for values the tables do not know.
    fn available_values(&self, id: PropertyId) -> Vec<(u32, String)> {
        self.session()
            .property_desc(id)
            .iter()
            .map(|&value| {
                let label = labels::label_for(id, value)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{value:#04x}"));
                (value, label)
            })
            .collect()
    }

    fn ensure_connected(&self) -> Result<()> {
        if !self.connected {
            return Err(failed_error!("camera is not connected"));
        }
        Ok(())
    }
}

impl Drop for TetheredCamera {
    fn drop(&mut self) {
        self.disconnect().ok();
        self.controller.shutdown();
    }
}
