//! Discrete, serially-executed units of device interaction.
//!
//! A command resolves every native status itself: `execute` returning `true`
//! means "done, do not revisit" (including failures that published an error
//! event), `false` means "did not advance, the issuer may re-enqueue". The
//! processor never inspects status semantics.

mod capture;
mod evf;
mod misc;
mod property;
mod session;

pub use capture::{DownloadCommand, PressShutterButtonCommand, SetCapacityCommand, TakePictureCommand};
pub use evf::{DoEvfAfCommand, DownloadEvfCommand, DriveLensCommand, EndEvfCommand, StartEvfCommand};
pub use misc::{NotifyCommand, SaveSettingCommand};
pub use property::{GetPropertyCommand, GetPropertyDescCommand, SetPropertyCommand, CANONICAL_REFRESH};
pub use session::{CloseSessionCommand, OpenSessionCommand};

use log::warn;

use tether_core::StatusCode;

use crate::event::{self, CameraEvent, EventPayload};
use crate::session::CameraSession;

pub trait Command: Send {
    fn execute(&self) -> bool;
}

/// Shared failure interpretation: busy publishes `DeviceBusy` and yields
/// `false` (retriable, not an error); anything else publishes `error` with
/// the raw status and yields `true` (done). Nothing fails silently.
pub(crate) fn publish_failure(session: &CameraSession, status: StatusCode, busy_payload: EventPayload) -> bool {
    if status.is_busy() {
        session.notify_listeners(&CameraEvent::with_payload(event::DEVICE_BUSY, busy_payload));
        return false;
    }

    warn!("device call failed: {status}");
    session.notify_listeners(&CameraEvent::with_payload(event::ERROR, EventPayload::Status(status)));

    true
}
