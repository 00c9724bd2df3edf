pub mod command;
pub mod controller;
pub mod event;
pub mod link;
pub mod processor;
pub mod session;

pub use controller::{CameraController, CameraRequest, RetryPolicy};
pub use event::{CameraEvent, EventPayload};
pub use link::{enumerate_cameras, CameraRef, DeviceHandle, DeviceLink, ObjectRef, SdkGuard};
pub use processor::Processor;
pub use session::{CameraListener, CameraSession};
