use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use log::info;
use tether::{
    enumerate_cameras, labels, CameraEvent, CameraListener, CameraSession, Capacity, DataType, DeviceCommand,
    DeviceHandle, DeviceLink, DirectoryItemInfo, EvfFrame, FocusInfo, LensDrive, Point, PropertyDescVec, PropertyId,
    PropertyValue, SdkGuard, StatusCode, TetheredCamera,
};

/// Stand-in for a native binding so the example runs without hardware:
/// answers every call with plausible fixed state.
struct DemoLink {
    iso: Mutex<u32>,
}

impl DeviceLink for DemoLink {
    fn initialize(&self) -> Result<(), StatusCode> {
        Ok(())
    }

    fn terminate(&self) {}

    fn camera_list(&self) -> Result<DeviceHandle, StatusCode> {
        Ok(DeviceHandle(1))
    }

    fn child_count(&self, _parent: DeviceHandle) -> Result<usize, StatusCode> {
        Ok(1)
    }

    fn child_at(&self, _parent: DeviceHandle, _index: usize) -> Result<DeviceHandle, StatusCode> {
        Ok(DeviceHandle(10))
    }

    fn release(&self, _handle: DeviceHandle) {}

    fn open_session(&self, _camera: DeviceHandle) -> Result<(), StatusCode> {
        Ok(())
    }

    fn close_session(&self, _camera: DeviceHandle) -> Result<(), StatusCode> {
        Ok(())
    }

    fn property_size(&self, _camera: DeviceHandle, id: PropertyId) -> Result<(DataType, usize), StatusCode> {
        match id {
            PropertyId::ProductName => Ok((DataType::String, 32)),
            PropertyId::FocusInfo => Ok((DataType::FocusInfo, 128)),
            _ => Ok((DataType::UInt32, 4)),
        }
    }

    fn property_u32(&self, _camera: DeviceHandle, id: PropertyId) -> Result<u32, StatusCode> {
        match id {
            PropertyId::IsoSpeed => Ok(*self.iso.lock().unwrap()),
            PropertyId::Tv => Ok(0x70),
            PropertyId::Av => Ok(0x1D),
            _ => Ok(0),
        }
    }

    fn property_text(&self, _camera: DeviceHandle, _id: PropertyId) -> Result<String, StatusCode> {
        Ok("Demo EOS".to_string())
    }

    fn property_focus(&self, _camera: DeviceHandle, _id: PropertyId) -> Result<FocusInfo, StatusCode> {
        Ok(FocusInfo::default())
    }

    fn set_property(
        &self,
        _camera: DeviceHandle,
        id: PropertyId,
        value: &PropertyValue,
    ) -> Result<(), StatusCode> {
        if id == PropertyId::IsoSpeed {
            if let Some(value) = value.as_u32() {
                *self.iso.lock().unwrap() = value;
            }
        }
        Ok(())
    }

    fn property_desc(&self, _camera: DeviceHandle, id: PropertyId) -> Result<PropertyDescVec, StatusCode> {
        match id {
            PropertyId::IsoSpeed => Ok(PropertyDescVec::from_slice(&[0x48, 0x50, 0x58, 0x60, 0x68])),
            _ => Ok(PropertyDescVec::new()),
        }
    }

    fn send_command(&self, _camera: DeviceHandle, command: DeviceCommand, _param: i32) -> Result<(), StatusCode> {
        info!("device command: {command}");
        Ok(())
    }

    fn drive_lens(&self, _camera: DeviceHandle, _step: LensDrive) -> Result<(), StatusCode> {
        Ok(())
    }

    fn do_evf_af(&self, _camera: DeviceHandle, _point: Point) -> Result<(), StatusCode> {
        Ok(())
    }

    fn download_evf(&self, _camera: DeviceHandle) -> Result<EvfFrame, StatusCode> {
        Ok(EvfFrame {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            zoom: 1,
            ..EvfFrame::default()
        })
    }

    fn set_capacity(&self, _camera: DeviceHandle, _capacity: Capacity) -> Result<(), StatusCode> {
        Ok(())
    }

    fn save_settings(&self, _camera: DeviceHandle) -> Result<(), StatusCode> {
        Ok(())
    }

    fn item_info(&self, _item: DeviceHandle) -> Result<DirectoryItemInfo, StatusCode> {
        Ok(DirectoryItemInfo::default())
    }

    fn download(&self, _item: DeviceHandle, _dest: &Path) -> Result<(), StatusCode> {
        Ok(())
    }
}

struct EventLogger {
    events: mpsc::Sender<CameraEvent>,
}

impl CameraListener for EventLogger {
    fn update(&self, event: &CameraEvent) {
        self.events.send(event.clone()).ok();
    }
}

fn main() {
    std::env::set_var("RUST_LOG", "info");
    env_logger::init();

    let link: Arc<dyn DeviceLink> = Arc::new(DemoLink {
        iso: Mutex::new(0x48),
    });

    let sdk = match SdkGuard::initialize(link.clone()) {
        Ok(sdk) => sdk,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    let mut cameras = match enumerate_cameras(sdk.link()) {
        Ok(cameras) => cameras,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    let session = CameraSession::new(cameras.remove(0));

    let (events_tx, events_rx) = mpsc::channel();
    session.add_listener(Arc::new(EventLogger {
        events: events_tx,
    }));

    let mut camera = TetheredCamera::new(session);
    camera.connect().unwrap();

    // The connect sequence runs on the worker; wait until the bulk fetch
    // lands before reading the cache.
    while let Ok(event) = events_rx.recv_timeout(Duration::from_secs(1)) {
        info!("event: {} {:?}", event.name(), event.payload());
        if event.property() == Some(PropertyId::ImageQuality) {
            break;
        }
    }

    info!("model: {}", camera.model_name());
    info!(
        "iso: {}",
        labels::iso_label(camera.iso()).unwrap_or("unknown")
    );
    for (value, label) in camera.available_iso_values() {
        info!("  iso choice {value:#04x}: {label}");
    }

    camera.take_picture().unwrap();
    camera.set_iso(0x60).unwrap();
    camera.disconnect().unwrap();
}
