use std::borrow::Cow;

use tether_core::{PropertyId, StatusCode};

/// A cached property value changed; payload carries the property id.
pub const PROPERTY_CHANGED: &str = "PropertyChanged";
/// The legal-value set for a property changed; payload carries the id.
pub const PROPERTY_DESC_CHANGED: &str = "PropertyDescChanged";
/// The device reported busy for a retriable operation. Not an error.
pub const DEVICE_BUSY: &str = "DeviceBusy";
/// A device call failed; payload carries the raw native status.
pub const ERROR: &str = "error";
/// A fresh live-view frame is available from the session.
pub const EVF_DATA_CHANGED: &str = "EvfDataChanged";
/// A capture finished transferring to local storage; payload carries the path.
pub const DOWNLOAD_COMPLETE: &str = "DownloadComplete";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventPayload {
    #[default]
    None,
    Property(PropertyId),
    Status(StatusCode),
    Text(String),
}

/// Immutable notification value: a name tag plus an optional payload.
/// Produced by session mutations and consumed by listeners; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraEvent {
    name: Cow<'static, str>,
    payload: EventPayload,
}

impl CameraEvent {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            payload: EventPayload::None,
        }
    }

    pub fn with_payload(name: impl Into<Cow<'static, str>>, payload: EventPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn property(&self) -> Option<PropertyId> {
        match self.payload {
            EventPayload::Property(id) => Some(id),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self.payload {
            EventPayload::Status(status) => Some(status),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Text(text) => Some(text),
            _ => None,
        }
    }
}
