use std::sync::Arc;

use tether_core::{DataType, PropertyId, PropertyValue, StatusCode};

use crate::command::{publish_failure, Command};
use crate::event::{self, CameraEvent, EventPayload};
use crate::session::CameraSession;

/// The exposure set re-read when the device reports a change without naming
/// the property.
pub const CANONICAL_REFRESH: [PropertyId; 7] = [
    PropertyId::AeModeSelect,
    PropertyId::Tv,
    PropertyId::Av,
    PropertyId::IsoSpeed,
    PropertyId::MeteringMode,
    PropertyId::ExposureCompensation,
    PropertyId::ImageQuality,
];

/// Reads one property from the device into the session cache.
///
/// The sentinel `PropertyId::Unknown` re-fetches the canonical exposure set
/// instead of a single value, each fetch publishing its own
/// `PropertyChanged`. A busy status publishes `DeviceBusy` and resolves to
/// `false` with the cache untouched; the issuer decides whether to
/// re-enqueue.
pub struct GetPropertyCommand {
    session: Arc<CameraSession>,
    property: PropertyId,
}

impl GetPropertyCommand {
    pub fn new(session: Arc<CameraSession>, property: PropertyId) -> Self {
        Self {
            session,
            property,
        }
    }

    fn fetch(&self, property: PropertyId) -> Result<(), StatusCode> {
        if property == PropertyId::Unknown {
            for id in CANONICAL_REFRESH {
                self.fetch(id)?;
            }
            return Ok(());
        }

        let link = self.session.link();
        let camera = self.session.handle();

        let (data_type, _size) = link.property_size(camera, property)?;

        match data_type {
            DataType::UInt32 => {
                let value = link.property_u32(camera, property)?;
                self.session.set_property_u32(property, value);
            }
            DataType::String => {
                let text = link.property_text(camera, property)?;
                self.session.set_property_text(property, text);
            }
            DataType::FocusInfo => {
                let info = link.property_focus(camera, property)?;
                self.session.set_focus_info(info);
            }
            _ => {}
        }

        self.session
            .notify_listeners(&CameraEvent::with_payload(event::PROPERTY_CHANGED, EventPayload::Property(property)));

        Ok(())
    }
}

impl Command for GetPropertyCommand {
    fn execute(&self) -> bool {
        match self.fetch(self.property) {
            Ok(()) => true,
            Err(status) => publish_failure(&self.session, status, EventPayload::Property(self.property)),
        }
    }
}

/// Reads the legal-value set for a property into the session cache,
/// publishing `PropertyDescChanged`. Mirrors `GetPropertyCommand`'s busy
/// handling.
pub struct GetPropertyDescCommand {
    session: Arc<CameraSession>,
    property: PropertyId,
}

impl GetPropertyDescCommand {
    pub fn new(session: Arc<CameraSession>, property: PropertyId) -> Self {
        Self {
            session,
            property,
        }
    }
}

impl Command for GetPropertyDescCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();

        match link.property_desc(self.session.handle(), self.property) {
            Ok(values) => {
                self.session.set_property_desc(self.property, values);
                self.session.notify_listeners(&CameraEvent::with_payload(
                    event::PROPERTY_DESC_CHANGED,
                    EventPayload::Property(self.property),
                ));
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::Property(self.property)),
        }
    }
}

/// Writes one property through to the device, then updates the cache and
/// republishes the new value. The tagged value is dispatched here, once,
/// instead of monomorphizing a command per native type.
pub struct SetPropertyCommand {
    session: Arc<CameraSession>,
    property: PropertyId,
    value: PropertyValue,
}

impl SetPropertyCommand {
    pub fn new(session: Arc<CameraSession>, property: PropertyId, value: PropertyValue) -> Self {
        Self {
            session,
            property,
            value,
        }
    }
}

impl Command for SetPropertyCommand {
    fn execute(&self) -> bool {
        let link = self.session.link();

        match link.set_property(self.session.handle(), self.property, &self.value) {
            Ok(()) => {
                match &self.value {
                    PropertyValue::UInt32(value) => self.session.set_property_u32(self.property, *value),
                    PropertyValue::Text(text) => self.session.set_property_text(self.property, text.clone()),
                    PropertyValue::Focus(info) => self.session.set_focus_info(info.clone()),
                }
                self.session.notify_listeners(&CameraEvent::with_payload(
                    event::PROPERTY_CHANGED,
                    EventPayload::Property(self.property),
                ));
                true
            }
            Err(status) => publish_failure(&self.session, status, EventPayload::Property(self.property)),
        }
    }
}
