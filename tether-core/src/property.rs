use num_enum::{IntoPrimitive, TryFromPrimitive};
use smallvec::SmallVec;

use crate::types::FocusInfo;

/// Camera setting identifiers, numbered as the native library numbers them.
///
/// `Unknown` doubles as the bulk-refresh sentinel: the device's change
/// notification sometimes reports "something changed" without naming the
/// property, and a fetch of `Unknown` re-reads the canonical exposure set.
#[derive(Clone, Copy, Debug, Eq, Hash, IntoPrimitive, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum PropertyId {
    ProductName = 0x0000_0002,
    ImageQuality = 0x0000_0100,
    FocusInfo = 0x0000_0104,
    AeMode = 0x0000_0400,
    DriveMode = 0x0000_0401,
    IsoSpeed = 0x0000_0402,
    MeteringMode = 0x0000_0403,
    AfMode = 0x0000_0404,
    Av = 0x0000_0405,
    Tv = 0x0000_0406,
    ExposureCompensation = 0x0000_0407,
    AeModeSelect = 0x0000_0436,
    EvfOutputDevice = 0x0000_0500,
    EvfMode = 0x0000_0501,
    EvfZoom = 0x0000_0507,
    EvfZoomPosition = 0x0000_0508,
    EvfDepthOfFieldPreview = 0x0000_050A,
    EvfAfMode = 0x0000_050E,
    EvfZoomRect = 0x0000_0541,
    Unknown = 0x0000_FFFF,
}

/// Native value encodings a property can carry on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum DataType {
    #[default]
    Unknown = 0,
    Bool = 1,
    String = 2,
    Int32 = 8,
    UInt32 = 9,
    ByteBlock = 14,
    Point = 21,
    Rect = 22,
    FocusInfo = 101,
}

/// Tagged property value, dispatched once at the call site instead of
/// monomorphizing a setter per native type.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    UInt32(u32),
    Text(String),
    Focus(FocusInfo),
}

impl PropertyValue {
    pub fn data_type(&self) -> DataType {
        match self {
            PropertyValue::UInt32(_) => DataType::UInt32,
            PropertyValue::Text(_) => DataType::String,
            PropertyValue::Focus(_) => DataType::FocusInfo,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            PropertyValue::UInt32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_focus(&self) -> Option<&FocusInfo> {
        match self {
            PropertyValue::Focus(info) => Some(info),
            _ => None,
        }
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::UInt32(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<FocusInfo> for PropertyValue {
    fn from(value: FocusInfo) -> Self {
        PropertyValue::Focus(value)
    }
}

/// Legal-value set for a settable property ("description"). Most cameras
/// report a couple dozen entries at most, so keep small lists inline.
pub type PropertyDescVec = SmallVec<[u32; 8]>;
