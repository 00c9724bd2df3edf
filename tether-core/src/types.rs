use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::Display;

use crate::geometry::{Point, Rect, Size};

/// One autofocus point as reported by the device.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FocusPoint {
    pub valid: bool,
    pub selected: bool,
    pub just_focus: u32,
    pub rect: Rect,
}

/// Focus state snapshot, a structured property rather than a scalar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FocusInfo {
    pub image_rect: Rect,
    pub focus_points: Vec<FocusPoint>,
    pub execute_mode: u32,
}

/// Simulated remaining storage, required by some device firmwares before a
/// tethered capture without a memory card will proceed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Capacity {
    pub number_of_free_clusters: i32,
    pub bytes_per_sector: i32,
    pub reset: bool,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            number_of_free_clusters: 0x7FFF_FFFF,
            bytes_per_sector: 0x1000,
            reset: true,
        }
    }
}

bitflags! {
    /// Where the device routes its live-view stream.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct EvfOutputDevice: u32 {
        const TFT = 0x0000_0001;
        const PC = 0x0000_0002;
    }
}

/// Shutter-button state transitions accepted by the device command channel.
#[derive(Clone, Copy, Debug, Display, Eq, IntoPrimitive, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum ShutterButton {
    Off = 0x0000_0000,
    Halfway = 0x0000_0001,
    Completely = 0x0000_0003,
}

/// Opcodes for the device command channel.
#[derive(Clone, Copy, Debug, Display, Eq, IntoPrimitive, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum DeviceCommand {
    TakePicture = 0x0000_0000,
    PressShutterButton = 0x0000_0004,
}

/// Discrete focus steps for lens drive. Near moves the focal plane toward
/// the camera, far away from it; the digit is the step magnitude.
#[derive(Clone, Copy, Debug, Display, Eq, IntoPrimitive, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum LensDrive {
    Near1 = 0x0000_0001,
    Near2 = 0x0000_0002,
    Near3 = 0x0000_0003,
    Far1 = 0x0000_8001,
    Far2 = 0x0000_8002,
    Far3 = 0x0000_8003,
}

impl LensDrive {
    pub const fn is_near(self) -> bool {
        matches!(self, LensDrive::Near1 | LensDrive::Near2 | LensDrive::Near3)
    }
}

/// One live-view frame with the zoom and framing metadata the device
/// delivers alongside the image payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvfFrame {
    pub data: Vec<u8>,
    pub zoom: u32,
    pub zoom_rect: Rect,
    pub image_position: Point,
    pub coordinate_system: Size,
}

/// Directory entry for a completed capture, pending transfer to the host.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectoryItemInfo {
    pub size: u64,
    pub is_folder: bool,
    pub file_name: String,
}
