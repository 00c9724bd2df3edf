//! Boundary with the native camera-control library.
//!
//! The native side is a synchronous function-call API over reference-counted
//! opaque handles; every handle obtained from enumeration or child traversal
//! must be paired with exactly one release. `DeviceLink` captures that call
//! surface as a trait so the rest of the crate never touches a raw binding,
//! and the owned reference types below make the release pairing a `Drop`
//! guarantee instead of a calling convention.

use std::fmt::{self, Debug, Formatter};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use tether_core::{
    error::Error, not_found_error, Capacity, DataType, DeviceCommand, DirectoryItemInfo, EvfFrame, FocusInfo,
    LensDrive, Point, PropertyDescVec, PropertyId, PropertyValue, Result, StatusCode,
};

/// Opaque native reference. Only meaningful to the `DeviceLink` that vended
/// it, and only between acquisition and the matching release.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DeviceHandle(pub u64);

/// The fixed native call surface. All fallible operations resolve to a raw
/// unsigned status; interpretation (busy, benign, error) happens in the
/// command layer, never here.
pub trait DeviceLink: Send + Sync {
    fn initialize(&self) -> std::result::Result<(), StatusCode>;
    fn terminate(&self);

    fn camera_list(&self) -> std::result::Result<DeviceHandle, StatusCode>;
    fn child_count(&self, parent: DeviceHandle) -> std::result::Result<usize, StatusCode>;
    fn child_at(&self, parent: DeviceHandle, index: usize) -> std::result::Result<DeviceHandle, StatusCode>;
    fn release(&self, handle: DeviceHandle);

    fn open_session(&self, camera: DeviceHandle) -> std::result::Result<(), StatusCode>;
    fn close_session(&self, camera: DeviceHandle) -> std::result::Result<(), StatusCode>;

    fn property_size(&self, camera: DeviceHandle, id: PropertyId)
        -> std::result::Result<(DataType, usize), StatusCode>;
    fn property_u32(&self, camera: DeviceHandle, id: PropertyId) -> std::result::Result<u32, StatusCode>;
    fn property_text(&self, camera: DeviceHandle, id: PropertyId) -> std::result::Result<String, StatusCode>;
    fn property_focus(&self, camera: DeviceHandle, id: PropertyId) -> std::result::Result<FocusInfo, StatusCode>;
    fn set_property(
        &self,
        camera: DeviceHandle,
        id: PropertyId,
        value: &PropertyValue,
    ) -> std::result::Result<(), StatusCode>;
    fn property_desc(&self, camera: DeviceHandle, id: PropertyId)
        -> std::result::Result<PropertyDescVec, StatusCode>;

    fn send_command(
        &self,
        camera: DeviceHandle,
        command: DeviceCommand,
        param: i32,
    ) -> std::result::Result<(), StatusCode>;
    fn drive_lens(&self, camera: DeviceHandle, step: LensDrive) -> std::result::Result<(), StatusCode>;
    fn do_evf_af(&self, camera: DeviceHandle, point: Point) -> std::result::Result<(), StatusCode>;
    fn download_evf(&self, camera: DeviceHandle) -> std::result::Result<EvfFrame, StatusCode>;

    fn set_capacity(&self, camera: DeviceHandle, capacity: Capacity) -> std::result::Result<(), StatusCode>;
    fn save_settings(&self, camera: DeviceHandle) -> std::result::Result<(), StatusCode>;

    fn item_info(&self, item: DeviceHandle) -> std::result::Result<DirectoryItemInfo, StatusCode>;
    fn download(&self, item: DeviceHandle, dest: &Path) -> std::result::Result<(), StatusCode>;
}

/// Owned reference to a connected camera. Releasing is tied to `Drop`, so an
/// enumeration that bails halfway still balances the native refcounts.
pub struct CameraRef {
    link: Arc<dyn DeviceLink>,
    handle: DeviceHandle,
}

impl CameraRef {
    /// Takes ownership of one native reference; `handle` must not be
    /// released by anyone else afterwards.
    pub fn new(link: Arc<dyn DeviceLink>, handle: DeviceHandle) -> Self {
        Self {
            link,
            handle,
        }
    }

    pub fn handle(&self) -> DeviceHandle {
        self.handle
    }

    pub fn link(&self) -> &Arc<dyn DeviceLink> {
        &self.link
    }
}

impl Drop for CameraRef {
    fn drop(&mut self) {
        self.link.release(self.handle);
    }
}

impl Debug for CameraRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CameraRef").field(&self.handle).finish()
    }
}

/// Owned reference to a non-camera native object (directory items from
/// completed captures, mostly). Same release-on-drop contract as `CameraRef`.
pub struct ObjectRef {
    link: Arc<dyn DeviceLink>,
    handle: DeviceHandle,
}

impl ObjectRef {
    pub fn new(link: Arc<dyn DeviceLink>, handle: DeviceHandle) -> Self {
        Self {
            link,
            handle,
        }
    }

    pub fn handle(&self) -> DeviceHandle {
        self.handle
    }
}

impl Drop for ObjectRef {
    fn drop(&mut self) {
        self.link.release(self.handle);
    }
}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.handle).finish()
    }
}

/// Process-wide native library lifetime: initialized on construction,
/// terminated on drop.
pub struct SdkGuard {
    link: Arc<dyn DeviceLink>,
}

impl SdkGuard {
    pub fn initialize(link: Arc<dyn DeviceLink>) -> Result<Self> {
        link.initialize()
            .map_err(|status| Error::InitializationFailed(status.to_string().into()))?;

        debug!("native library initialized");

        Ok(Self {
            link,
        })
    }

    pub fn link(&self) -> &Arc<dyn DeviceLink> {
        &self.link
    }
}

impl Drop for SdkGuard {
    fn drop(&mut self) {
        self.link.terminate();
        debug!("native library terminated");
    }
}

struct ListGuard<'a> {
    link: &'a Arc<dyn DeviceLink>,
    handle: DeviceHandle,
}

impl Drop for ListGuard<'_> {
    fn drop(&mut self) {
        self.link.release(self.handle);
    }
}

/// Traverses the native camera list and returns one owned reference per
/// connected camera. The list handle and every already-traversed child are
/// released on the failure paths as well.
pub fn enumerate_cameras(link: &Arc<dyn DeviceLink>) -> Result<Vec<CameraRef>> {
    let list = ListGuard {
        link,
        handle: link.camera_list().map_err(Error::Device)?,
    };

    let count = link.child_count(list.handle).map_err(Error::Device)?;
    if count == 0 {
        return Err(not_found_error!("no cameras detected"));
    }

    let mut cameras = Vec::with_capacity(count);
    for index in 0..count {
        let child = link.child_at(list.handle, index).map_err(Error::Device)?;
        cameras.push(CameraRef::new(link.clone(), child));
    }

    info!("enumerated {} camera(s)", cameras.len());

    Ok(cameras)
}
