#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tether_control::{CameraEvent, CameraListener, CameraRef, CameraSession, DeviceHandle, DeviceLink};
use tether_core::{
    Capacity, DataType, DeviceCommand, DirectoryItemInfo, EvfFrame, FocusInfo, LensDrive, Point, PropertyDescVec,
    PropertyId, PropertyValue, Rect, StatusCode,
};

pub const LIST: DeviceHandle = DeviceHandle(1);
pub const CAMERA: DeviceHandle = DeviceHandle(10);

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Initialize,
    Terminate,
    OpenSession,
    CloseSession,
    PropertySize(PropertyId),
    PropertyU32(PropertyId),
    PropertyText(PropertyId),
    PropertyFocus(PropertyId),
    SetProperty(PropertyId, PropertyValue),
    PropertyDesc(PropertyId),
    SendCommand(DeviceCommand, i32),
    DriveLens(LensDrive),
    DoEvfAf(Point),
    DownloadEvf,
    SetCapacity(Capacity),
    SaveSettings,
    ItemInfo(DeviceHandle),
    Download(DeviceHandle, PathBuf),
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    values: HashMap<PropertyId, u32>,
    texts: HashMap<PropertyId, String>,
    descs: HashMap<PropertyId, Vec<u32>>,
    get_failures: HashMap<PropertyId, Vec<StatusCode>>,
    set_failures: Vec<StatusCode>,
    evf_failures: Vec<StatusCode>,
    command_failures: Vec<StatusCode>,
    drive_failures: Vec<StatusCode>,
    camera_count: usize,
    child_failure_at: Option<usize>,
    acquired: Vec<DeviceHandle>,
    released: Vec<DeviceHandle>,
}

/// Scripted in-memory device link with a call and refcount ledger.
/// Failure scripts are queues consumed one status per call, so "busy once,
/// then succeed" is a single push.
pub struct MockLink {
    state: Mutex<MockState>,
}

impl MockLink {
    pub fn new() -> Arc<Self> {
        let link = Self {
            state: Mutex::new(MockState {
                camera_count: 1,
                ..MockState::default()
            }),
        };

        {
            let mut state = link.state.lock().unwrap();
            state.texts.insert(PropertyId::ProductName, "Mock EOS".to_string());
        }

        Arc::new(link)
    }

    pub fn set_value(&self, id: PropertyId, value: u32) {
        self.state.lock().unwrap().values.insert(id, value);
    }

    pub fn set_desc(&self, id: PropertyId, values: &[u32]) {
        self.state.lock().unwrap().descs.insert(id, values.to_vec());
    }

    pub fn set_camera_count(&self, count: usize) {
        self.state.lock().unwrap().camera_count = count;
    }

    pub fn fail_child_at(&self, index: usize) {
        self.state.lock().unwrap().child_failure_at = Some(index);
    }

    /// Queues a status for the next fetch of `id` (size query included).
    pub fn fail_get(&self, id: PropertyId, status: StatusCode) {
        self.state.lock().unwrap().get_failures.entry(id).or_default().push(status);
    }

    pub fn fail_set(&self, status: StatusCode) {
        self.state.lock().unwrap().set_failures.push(status);
    }

    pub fn fail_evf(&self, status: StatusCode) {
        self.state.lock().unwrap().evf_failures.push(status);
    }

    pub fn fail_command(&self, status: StatusCode) {
        self.state.lock().unwrap().command_failures.push(status);
    }

    pub fn fail_drive(&self, status: StatusCode) {
        self.state.lock().unwrap().drive_failures.push(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn released(&self) -> Vec<DeviceHandle> {
        self.state.lock().unwrap().released.clone()
    }

    /// Handles acquired through this link that have not been released yet.
    pub fn live_refs(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.acquired.iter().filter(|h| !state.released.contains(h)).count()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn pop_failure(queue: &mut Vec<StatusCode>) -> Option<StatusCode> {
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }
}

impl DeviceLink for MockLink {
    fn initialize(&self) -> Result<(), StatusCode> {
        self.record(Call::Initialize);
        Ok(())
    }

    fn terminate(&self) {
        self.record(Call::Terminate);
    }

    fn camera_list(&self) -> Result<DeviceHandle, StatusCode> {
        self.state.lock().unwrap().acquired.push(LIST);
        Ok(LIST)
    }

    fn child_count(&self, _parent: DeviceHandle) -> Result<usize, StatusCode> {
        Ok(self.state.lock().unwrap().camera_count)
    }

    fn child_at(&self, _parent: DeviceHandle, index: usize) -> Result<DeviceHandle, StatusCode> {
        let mut state = self.state.lock().unwrap();

        if state.child_failure_at == Some(index) {
            return Err(StatusCode::DEVICE_NOT_FOUND);
        }

        let handle = DeviceHandle(CAMERA.0 + index as u64);
        state.acquired.push(handle);
        Ok(handle)
    }

    fn release(&self, handle: DeviceHandle) {
        self.state.lock().unwrap().released.push(handle);
    }

    fn open_session(&self, _camera: DeviceHandle) -> Result<(), StatusCode> {
        self.record(Call::OpenSession);
        Ok(())
    }

    fn close_session(&self, _camera: DeviceHandle) -> Result<(), StatusCode> {
        self.record(Call::CloseSession);
        Ok(())
    }

    fn property_size(&self, _camera: DeviceHandle, id: PropertyId) -> Result<(DataType, usize), StatusCode> {
        self.record(Call::PropertySize(id));

        if let Some(status) = {
            let mut state = self.state.lock().unwrap();
            state.get_failures.get_mut(&id).and_then(Self::pop_failure)
        } {
            return Err(status);
        }

        match id {
            PropertyId::ProductName => Ok((DataType::String, 32)),
            PropertyId::FocusInfo => Ok((DataType::FocusInfo, 128)),
            _ => Ok((DataType::UInt32, 4)),
        }
    }

    fn property_u32(&self, _camera: DeviceHandle, id: PropertyId) -> Result<u32, StatusCode> {
        self.record(Call::PropertyU32(id));
        Ok(self.state.lock().unwrap().values.get(&id).copied().unwrap_or(0))
    }

    fn property_text(&self, _camera: DeviceHandle, id: PropertyId) -> Result<String, StatusCode> {
        self.record(Call::PropertyText(id));
        Ok(self.state.lock().unwrap().texts.get(&id).cloned().unwrap_or_default())
    }

    fn property_focus(&self, _camera: DeviceHandle, id: PropertyId) -> Result<FocusInfo, StatusCode> {
        self.record(Call::PropertyFocus(id));
        Ok(FocusInfo {
            image_rect: Rect::new(0, 0, 6000, 4000),
            ..FocusInfo::default()
        })
    }

    fn set_property(&self, _camera: DeviceHandle, id: PropertyId, value: &PropertyValue) -> Result<(), StatusCode> {
        self.record(Call::SetProperty(id, value.clone()));

        if let Some(status) = Self::pop_failure(&mut self.state.lock().unwrap().set_failures) {
            return Err(status);
        }

        if let Some(value) = value.as_u32() {
            self.state.lock().unwrap().values.insert(id, value);
        }
        Ok(())
    }

    fn property_desc(&self, _camera: DeviceHandle, id: PropertyId) -> Result<PropertyDescVec, StatusCode> {
        self.record(Call::PropertyDesc(id));

        if let Some(status) = {
            let mut state = self.state.lock().unwrap();
            state.get_failures.get_mut(&id).and_then(Self::pop_failure)
        } {
            return Err(status);
        }

        let values = self.state.lock().unwrap().descs.get(&id).cloned().unwrap_or_default();
        Ok(PropertyDescVec::from_vec(values))
    }

    fn send_command(&self, _camera: DeviceHandle, command: DeviceCommand, param: i32) -> Result<(), StatusCode> {
        self.record(Call::SendCommand(command, param));

        match Self::pop_failure(&mut self.state.lock().unwrap().command_failures) {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn drive_lens(&self, _camera: DeviceHandle, step: LensDrive) -> Result<(), StatusCode> {
        self.record(Call::DriveLens(step));

        match Self::pop_failure(&mut self.state.lock().unwrap().drive_failures) {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn do_evf_af(&self, _camera: DeviceHandle, point: Point) -> Result<(), StatusCode> {
        self.record(Call::DoEvfAf(point));
        Ok(())
    }

    fn download_evf(&self, _camera: DeviceHandle) -> Result<EvfFrame, StatusCode> {
        self.record(Call::DownloadEvf);

        if let Some(status) = Self::pop_failure(&mut self.state.lock().unwrap().evf_failures) {
            return Err(status);
        }

        Ok(EvfFrame {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            zoom: 5,
            zoom_rect: Rect::new(100, 100, 600, 400),
            image_position: Point::new(100, 100),
            coordinate_system: tether_core::Size::new(6000, 4000),
        })
    }

    fn set_capacity(&self, _camera: DeviceHandle, capacity: Capacity) -> Result<(), StatusCode> {
        self.record(Call::SetCapacity(capacity));
        Ok(())
    }

    fn save_settings(&self, _camera: DeviceHandle) -> Result<(), StatusCode> {
        self.record(Call::SaveSettings);
        Ok(())
    }

    fn item_info(&self, item: DeviceHandle) -> Result<DirectoryItemInfo, StatusCode> {
        self.record(Call::ItemInfo(item));
        Ok(DirectoryItemInfo {
            size: 4096,
            is_folder: false,
            file_name: "IMG_0001.CR3".to_string(),
        })
    }

    fn download(&self, item: DeviceHandle, dest: &Path) -> Result<(), StatusCode> {
        self.record(Call::Download(item, dest.to_path_buf()));
        Ok(())
    }
}

/// Polls `condition` until it holds or the deadline passes. The worker runs
/// on its own thread, so tests observing its side effects wait here instead
/// of sleeping a guessed amount.
pub fn wait_for(condition: impl Fn() -> bool) -> bool {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    condition()
}

/// Builds a session over the shared mock camera handle.
pub fn mock_session(link: &Arc<MockLink>) -> Arc<CameraSession> {
    let link: Arc<dyn DeviceLink> = link.clone();
    CameraSession::new(CameraRef::new(link, CAMERA))
}

/// Listener that records every delivered event.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<CameraEvent>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<CameraEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().iter().map(|e| e.name().to_string()).collect()
    }
}

impl CameraListener for Recorder {
    fn update(&self, event: &CameraEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
