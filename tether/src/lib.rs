pub use tether_core::*;

#[cfg(feature = "control")]
pub use tether_control::*;

#[cfg(feature = "control")]
mod camera;

#[cfg(feature = "control")]
pub use camera::TetheredCamera;
