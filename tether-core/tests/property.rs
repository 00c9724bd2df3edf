use tether_core::{DataType, FocusInfo, LensDrive, PropertyId, PropertyValue, StatusCode};

#[test]
fn test_property_id_roundtrip() {
    assert_eq!(u32::from(PropertyId::IsoSpeed), 0x0000_0402);
    assert!(matches!(PropertyId::try_from(0x0000_0402u32), Ok(PropertyId::IsoSpeed)));
    assert!(matches!(PropertyId::try_from(0x0000_FFFFu32), Ok(PropertyId::Unknown)));
    assert!(PropertyId::try_from(0xDEAD_BEEFu32).is_err());
}

#[test]
fn test_property_value_tagging() {
    let value = PropertyValue::UInt32(0x48);
    assert_eq!(value.data_type(), DataType::UInt32);
    assert_eq!(value.as_u32(), Some(0x48));
    assert_eq!(value.as_text(), None);

    let value = PropertyValue::from("EOS R5");
    assert_eq!(value.data_type(), DataType::String);
    assert_eq!(value.as_text(), Some("EOS R5"));

    let value = PropertyValue::from(FocusInfo::default());
    assert_eq!(value.data_type(), DataType::FocusInfo);
    assert!(value.as_focus().is_some());
}

#[test]
fn test_busy_status_is_masked() {
    assert!(StatusCode::DEVICE_BUSY.is_busy());
    // High bits vary by transport; the family lives in the low byte.
    assert!(StatusCode(0x0001_0081).is_busy());
    assert!(!StatusCode::DEVICE_NOT_FOUND.is_busy());
    assert!(!StatusCode::OK.is_busy());
    assert!(!StatusCode::OBJECT_NOT_READY.is_busy());
}

#[test]
fn test_status_display_names() {
    assert_eq!(StatusCode::DEVICE_BUSY.to_string(), "device busy (0x00000081)");
    assert_eq!(StatusCode(0x1234_5678).to_string(), "0x12345678");
}

#[test]
fn test_lens_drive_direction() {
    assert!(LensDrive::Near1.is_near());
    assert!(LensDrive::Near3.is_near());
    assert!(!LensDrive::Far2.is_near());
    assert_eq!(u32::from(LensDrive::Far3), 0x0000_8003);
}
