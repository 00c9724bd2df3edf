//! Human-readable labels for the native value codes of the settable
//! exposure properties. The device reports settings as opaque code points;
//! callers render them with these lookups when building a value picker from
//! a property description.
//!
//! Seconds carry a trailing double-prime (`30"`); bare numbers are
//! fractional denominators (`125` is 1/125s).

use crate::property::PropertyId;

pub fn label_for(id: PropertyId, value: u32) -> Option<&'static str> {
    match id {
        PropertyId::Tv => tv_label(value),
        PropertyId::Av => av_label(value),
        PropertyId::IsoSpeed => iso_label(value),
        PropertyId::AeMode | PropertyId::AeModeSelect => ae_mode_label(value),
        PropertyId::MeteringMode => metering_mode_label(value),
        PropertyId::ExposureCompensation => exposure_comp_label(value),
        PropertyId::ImageQuality => image_quality_label(value),
        PropertyId::EvfAfMode => evf_af_mode_label(value),
        _ => None,
    }
}

pub fn tv_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0x04 => "Auto",
        0x0C => "Bulb",
        0x10 => "30\"",
        0x13 => "25\"",
        0x14 | 0x15 => "20\"",
        0x18 => "15\"",
        0x1B => "13\"",
        0x1C | 0x1D => "10\"",
        0x20 => "8\"",
        0x23 | 0x24 => "6\"",
        0x25 => "5\"",
        0x28 => "4\"",
        0x2B => "3\"2",
        0x2C => "3\"",
        0x2D => "2\"5",
        0x30 => "2\"",
        0x33 => "1\"6",
        0x34 => "1\"5",
        0x35 => "1\"3",
        0x38 => "1\"",
        0x3B => "0\"8",
        0x3C => "0\"7",
        0x3D => "0\"6",
        0x40 => "0\"5",
        0x43 => "0\"4",
        0x44 | 0x45 => "0\"3",
        0x48 => "4",
        0x4B => "5",
        0x4C | 0x4D => "6",
        0x50 => "8",
        0x53 | 0x54 => "10",
        0x55 => "13",
        0x58 => "15",
        0x5B | 0x5C => "20",
        0x5D => "25",
        0x60 => "30",
        0x63 => "40",
        0x64 => "45",
        0x65 => "50",
        0x68 => "60",
        0x6B => "80",
        0x6C => "90",
        0x6D => "100",
        0x70 => "125",
        0x73 => "160",
        0x74 => "180",
        0x75 => "200",
        0x78 => "250",
        0x7B => "320",
        0x7C => "350",
        0x7D => "400",
        0x80 => "500",
        0x83 => "640",
        0x84 => "750",
        0x85 => "800",
        0x88 => "1000",
        0x8B => "1250",
        0x8C => "1500",
        0x8D => "1600",
        0x90 => "2000",
        0x93 => "2500",
        0x94 => "3000",
        0x95 => "3200",
        0x98 => "4000",
        0x9B => "5000",
        0x9C => "6000",
        0x9D => "6400",
        0xA0 => "8000",
        0xA3 => "10000",
        0xA5 => "12800",
        0xA8 => "16000",
        0xAB => "20000",
        0xAD => "25600",
        0xB0 => "32000",
        _ => return None,
    };

    Some(label)
}

pub fn av_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0x08 => "f/1.0",
        0x0B => "f/1.2",
        0x0D => "f/1.4",
        0x10 => "f/1.6",
        0x13 => "f/1.8",
        0x15 => "f/2.0",
        0x18 => "f/2.2",
        0x1B => "f/2.5",
        0x1D => "f/2.8",
        0x20 => "f/3.2",
        0x23 => "f/3.5",
        0x25 => "f/4.0",
        0x28 => "f/4.5",
        0x2B => "f/5.0",
        0x2D => "f/5.6",
        0x30 => "f/6.3",
        0x33 => "f/7.1",
        0x35 => "f/8.0",
        0x38 => "f/9.0",
        0x3B => "f/10",
        0x3D => "f/11",
        0x40 => "f/13",
        0x43 => "f/14",
        0x45 => "f/16",
        0x48 => "f/18",
        0x4B => "f/20",
        0x4D => "f/22",
        0x50 => "f/25",
        0x53 => "f/29",
        0x55 => "f/32",
        0x58 => "f/36",
        0x5B => "f/40",
        0x5D => "f/45",
        _ => return None,
    };

    Some(label)
}

pub fn iso_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0x00 => "ISO Auto",
        0x40 => "ISO 50",
        0x48 => "ISO 100",
        0x4B => "ISO 125",
        0x4D => "ISO 160",
        0x50 => "ISO 200",
        0x53 => "ISO 250",
        0x55 => "ISO 320",
        0x58 => "ISO 400",
        0x5B => "ISO 500",
        0x5D => "ISO 640",
        0x60 => "ISO 800",
        0x63 => "ISO 1000",
        0x65 => "ISO 1250",
        0x68 => "ISO 1600",
        0x6B => "ISO 2000",
        0x6D => "ISO 2500",
        0x70 => "ISO 3200",
        0x73 => "ISO 4000",
        0x75 => "ISO 5000",
        0x78 => "ISO 6400",
        0x7B => "ISO 8000",
        0x7D => "ISO 10000",
        0x80 => "ISO 12800",
        0x83 => "ISO 16000",
        0x85 => "ISO 20000",
        0x88 => "ISO 25600",
        0x8B => "ISO 32000",
        0x8D => "ISO 40000",
        0x90 => "ISO 51200",
        0x98 => "ISO 102400",
        _ => return None,
    };

    Some(label)
}

pub fn ae_mode_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0 => "Program AE",
        1 => "Shutter priority AE",
        2 => "Aperture priority AE",
        3 => "Manual exposure",
        4 => "Bulb",
        5 => "Auto depth-of-field AE",
        6 => "Depth-of-field AE",
        7 => "Camera settings registered",
        8 => "Lock",
        9 => "Auto",
        10 => "Night scene portrait",
        11 => "Sports",
        12 => "Portrait",
        13 => "Landscape",
        14 => "Close-up",
        15 => "Flash off",
        19 => "Creative auto",
        _ => return None,
    };

    Some(label)
}

pub fn metering_mode_label(value: u32) -> Option<&'static str> {
    let label = match value {
        1 => "Spot metering",
        3 => "Evaluative metering",
        4 => "Partial metering",
        5 => "Center-weighted averaging metering",
        _ => return None,
    };

    Some(label)
}

pub fn exposure_comp_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0x18 => "+3",
        0x15 => "+2 2/3",
        0x14 => "+2 1/2",
        0x13 => "+2 1/3",
        0x10 => "+2",
        0x0D => "+1 2/3",
        0x0C => "+1 1/2",
        0x0B => "+1 1/3",
        0x08 => "+1",
        0x05 => "+2/3",
        0x04 => "+1/2",
        0x03 => "+1/3",
        0x00 => "0",
        0xFD => "-1/3",
        0xFC => "-1/2",
        0xFB => "-2/3",
        0xF8 => "-1",
        0xF5 => "-1 1/3",
        0xF4 => "-1 1/2",
        0xF3 => "-1 2/3",
        0xF0 => "-2",
        0xED => "-2 1/3",
        0xEC => "-2 1/2",
        0xEB => "-2 2/3",
        0xE8 => "-3",
        _ => return None,
    };

    Some(label)
}

pub fn image_quality_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0x0013_FF0F => "Large Fine JPEG",
        0x0012_FF0F => "Large Normal JPEG",
        0x0113_FF0F => "Middle Fine JPEG",
        0x0112_FF0F => "Middle Normal JPEG",
        0x0213_FF0F => "Small Fine JPEG",
        0x0212_FF0F => "Small Normal JPEG",
        0x0064_FF0F => "RAW",
        0x0064_0013 => "RAW + Large Fine JPEG",
        0x0164_FF0F => "MRAW",
        0x0264_FF0F => "SRAW",
        _ => return None,
    };

    Some(label)
}

pub fn evf_af_mode_label(value: u32) -> Option<&'static str> {
    let label = match value {
        0x00 => "Quick mode",
        0x01 => "1-point AF",
        0x02 => "Face+Tracking",
        0x03 => "FlexiZone - Multi",
        0x04 => "Zone AF",
        0x05 => "Expand AF area",
        0x06 => "Expand AF area: Around",
        0x07 => "Large Zone AF: Horizontal",
        0x08 => "Large Zone AF: Vertical",
        0x09 => "Catch AF",
        0x0A => "Spot AF",
        _ => return None,
    };

    Some(label)
}
