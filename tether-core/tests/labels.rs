use tether_core::labels;
use tether_core::PropertyId;

#[test]
fn test_tv_labels() {
    assert_eq!(labels::tv_label(0x0C), Some("Bulb"));
    assert_eq!(labels::tv_label(0x10), Some("30\""));
    assert_eq!(labels::tv_label(0x70), Some("125"));
    assert_eq!(labels::tv_label(0xA0), Some("8000"));
    assert_eq!(labels::tv_label(0xFFFF_FFFF), None);
}

#[test]
fn test_av_labels() {
    assert_eq!(labels::av_label(0x08), Some("f/1.0"));
    assert_eq!(labels::av_label(0x1D), Some("f/2.8"));
    assert_eq!(labels::av_label(0x55), Some("f/32"));
    assert_eq!(labels::av_label(0x02), None);
}

#[test]
fn test_iso_labels() {
    assert_eq!(labels::iso_label(0x00), Some("ISO Auto"));
    assert_eq!(labels::iso_label(0x48), Some("ISO 100"));
    assert_eq!(labels::iso_label(0x60), Some("ISO 800"));
    assert_eq!(labels::iso_label(0x98), Some("ISO 102400"));
    assert_eq!(labels::iso_label(0x01), None);
}

#[test]
fn test_exposure_comp_labels_are_signed_thirds() {
    assert_eq!(labels::exposure_comp_label(0x00), Some("0"));
    assert_eq!(labels::exposure_comp_label(0x03), Some("+1/3"));
    assert_eq!(labels::exposure_comp_label(0xFD), Some("-1/3"));
    assert_eq!(labels::exposure_comp_label(0x18), Some("+3"));
    assert_eq!(labels::exposure_comp_label(0xE8), Some("-3"));
}

#[test]
fn test_metering_and_af_mode_labels() {
    assert_eq!(labels::metering_mode_label(3), Some("Evaluative metering"));
    assert_eq!(labels::metering_mode_label(2), None);
    assert_eq!(labels::evf_af_mode_label(0x02), Some("Face+Tracking"));
}

#[test]
fn test_label_for_dispatches_on_property() {
    assert_eq!(labels::label_for(PropertyId::Tv, 0x10), Some("30\""));
    assert_eq!(labels::label_for(PropertyId::Av, 0x1D), Some("f/2.8"));
    assert_eq!(labels::label_for(PropertyId::IsoSpeed, 0x48), Some("ISO 100"));
    assert_eq!(labels::label_for(PropertyId::AeModeSelect, 3), Some("Manual exposure"));
    // Properties without a value table have no labels.
    assert_eq!(labels::label_for(PropertyId::EvfZoom, 1), None);
}
