use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::error;

use tether_core::{EvfFrame, EvfOutputDevice, FocusInfo, Point, PropertyDescVec, PropertyId, Rect};

use crate::event::CameraEvent;
use crate::link::{CameraRef, DeviceHandle, DeviceLink};

/// Receives session notifications. Callbacks run synchronously on whatever
/// thread published the event (usually the command worker); GUI-bound
/// listeners re-marshal to their own thread themselves.
pub trait CameraListener: Send + Sync {
    fn update(&self, event: &CameraEvent);
}

#[derive(Default)]
struct PropertyState {
    values: HashMap<PropertyId, u32>,
    descs: HashMap<PropertyId, PropertyDescVec>,
    model_name: String,
    focus_info: FocusInfo,
    evf_zoom_position: Point,
    evf_zoom_rect: Rect,
}

/// In-process cache of one connected camera's state, sole owner of its
/// device reference, and the broadcaster listeners subscribe to.
///
/// This type never talks to the device: getters and setters are pure cache
/// reads and writes, pushed into by commands and by change notifications
/// arriving from the native side. The cache is only as fresh as the last
/// successful fetch.
pub struct CameraSession {
    camera: CameraRef,
    open: AtomicBool,
    ui_locked: AtomicBool,
    state: Mutex<PropertyState>,
    evf_frame: Mutex<Option<EvfFrame>>,
    listeners: Mutex<Vec<Arc<dyn CameraListener>>>,
}

macro_rules! cached_u32_property {
    ($getter:ident, $setter:ident, $id:expr) => {
        pub fn $getter(&self) -> u32 {
            self.property_u32($id).unwrap_or_default()
        }

        pub fn $setter(&self, value: u32) {
            self.set_property_u32($id, value);
        }
    };
}

impl CameraSession {
    pub fn new(camera: CameraRef) -> Arc<Self> {
        Arc::new(Self {
            camera,
            open: AtomicBool::new(false),
            ui_locked: AtomicBool::new(false),
            state: Mutex::new(PropertyState::default()),
            evf_frame: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn handle(&self) -> DeviceHandle {
        self.camera.handle()
    }

    pub fn link(&self) -> &Arc<dyn DeviceLink> {
        self.camera.link()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub(crate) fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::Release);
    }

    // ---- generic cache updates, keyed by property id ----

    pub fn property_u32(&self, id: PropertyId) -> Option<u32> {
        self.state.lock().unwrap().values.get(&id).copied()
    }

    pub fn set_property_u32(&self, id: PropertyId, value: u32) {
        self.state.lock().unwrap().values.insert(id, value);
    }

    pub fn set_property_text(&self, id: PropertyId, value: String) {
        if id == PropertyId::ProductName {
            self.state.lock().unwrap().model_name = value;
        }
    }

    pub fn set_focus_info(&self, info: FocusInfo) {
        self.state.lock().unwrap().focus_info = info;
    }

    pub fn property_desc(&self, id: PropertyId) -> PropertyDescVec {
        self.state.lock().unwrap().descs.get(&id).cloned().unwrap_or_default()
    }

    pub fn set_property_desc(&self, id: PropertyId, values: PropertyDescVec) {
        self.state.lock().unwrap().descs.insert(id, values);
    }

    // ---- typed accessors over the cache ----

    cached_u32_property!(ae_mode, set_ae_mode, PropertyId::AeMode);
    cached_u32_property!(tv, set_tv, PropertyId::Tv);
    cached_u32_property!(av, set_av, PropertyId::Av);
    cached_u32_property!(iso, set_iso, PropertyId::IsoSpeed);
    cached_u32_property!(metering_mode, set_metering_mode, PropertyId::MeteringMode);
    cached_u32_property!(
        exposure_compensation,
        set_exposure_compensation,
        PropertyId::ExposureCompensation
    );
    cached_u32_property!(image_quality, set_image_quality, PropertyId::ImageQuality);
    cached_u32_property!(evf_mode, set_evf_mode, PropertyId::EvfMode);
    cached_u32_property!(evf_zoom, set_evf_zoom, PropertyId::EvfZoom);
    cached_u32_property!(evf_af_mode, set_evf_af_mode, PropertyId::EvfAfMode);
    cached_u32_property!(
        evf_depth_of_field_preview,
        set_evf_depth_of_field_preview,
        PropertyId::EvfDepthOfFieldPreview
    );

    pub fn evf_output_device(&self) -> EvfOutputDevice {
        EvfOutputDevice::from_bits_truncate(self.property_u32(PropertyId::EvfOutputDevice).unwrap_or_default())
    }

    pub fn set_evf_output_device(&self, device: EvfOutputDevice) {
        self.set_property_u32(PropertyId::EvfOutputDevice, device.bits());
    }

    pub fn model_name(&self) -> String {
        self.state.lock().unwrap().model_name.clone()
    }

    pub fn set_model_name(&self, name: String) {
        self.state.lock().unwrap().model_name = name;
    }

    pub fn focus_info(&self) -> FocusInfo {
        self.state.lock().unwrap().focus_info.clone()
    }

    pub fn evf_zoom_position(&self) -> Point {
        self.state.lock().unwrap().evf_zoom_position
    }

    pub fn set_evf_zoom_position(&self, point: Point) {
        self.state.lock().unwrap().evf_zoom_position = point;
    }

    pub fn evf_zoom_rect(&self) -> Rect {
        self.state.lock().unwrap().evf_zoom_rect
    }

    pub fn set_evf_zoom_rect(&self, rect: Rect) {
        self.state.lock().unwrap().evf_zoom_rect = rect;
    }

    // ---- live-view frame slot (latest wins) ----

    pub fn store_evf_frame(&self, frame: EvfFrame) {
        *self.evf_frame.lock().unwrap() = Some(frame);
    }

    pub fn take_evf_frame(&self) -> Option<EvfFrame> {
        self.evf_frame.lock().unwrap().take()
    }

    // ---- advisory UI lock ----

    pub fn lock_ui(&self) {
        self.ui_locked.store(true, Ordering::Release);
    }

    pub fn unlock_ui(&self) {
        self.ui_locked.store(false, Ordering::Release);
    }

    pub fn ui_locked(&self) -> bool {
        self.ui_locked.load(Ordering::Acquire)
    }

    /// Locks the UI flag for the enclosing scope; unlocking is tied to
    /// `Drop` so the flag clears on every exit path.
    pub fn ui_lock_scope(&self) -> UiLockGuard<'_> {
        self.lock_ui();
        UiLockGuard {
            session: self,
        }
    }

    // ---- listener registry and fan-out ----

    pub fn add_listener(&self, listener: Arc<dyn CameraListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn CameraListener>) {
        self.listeners.lock().unwrap().retain(|existing| !Arc::ptr_eq(existing, listener));
    }

    /// Delivers `event` to every listener registered at the time of the
    /// call, in registration order, on the calling thread. The registry is
    /// snapshotted first, so listeners added or removed mid-dispatch do not
    /// affect the dispatch in progress. A panicking listener is logged and
    /// skipped; later listeners still receive the event.
    pub fn notify_listeners(&self, event: &CameraEvent) {
        let snapshot: Vec<_> = self.listeners.lock().unwrap().clone();

        for listener in snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| listener.update(event))).is_err() {
                error!("listener panicked while handling {:?}", event.name());
            }
        }
    }
}

pub struct UiLockGuard<'a> {
    session: &'a CameraSession,
}

impl Drop for UiLockGuard<'_> {
    fn drop(&mut self) {
        self.session.unlock_ui();
    }
}
