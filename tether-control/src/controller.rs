use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Weak};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use tether_core::{Capacity, LensDrive, Point, PropertyId, PropertyValue, Result, ShutterButton};

use crate::command::{
    CloseSessionCommand, Command, DoEvfAfCommand, DownloadCommand, DownloadEvfCommand, DriveLensCommand,
    EndEvfCommand, GetPropertyCommand, GetPropertyDescCommand, NotifyCommand, OpenSessionCommand,
    PressShutterButtonCommand, SaveSettingCommand, SetCapacityCommand, SetPropertyCommand, StartEvfCommand,
    TakePictureCommand, CANONICAL_REFRESH,
};
use crate::event::{self, CameraEvent};
use crate::link::ObjectRef;
use crate::processor::Processor;
use crate::session::{CameraListener, CameraSession};

/// Bounds the busy-retry loop. The device signals busy for transient
/// contention; without a bound the convention is "re-enqueue forever,
/// immediately". Attempts are tracked per property and reset by a
/// successful fetch.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub budget: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            budget: 5,
            backoff: Duration::ZERO,
        }
    }
}

/// External action requests, one per operation the command catalogue
/// supports. The controller turns these into commands; it performs no
/// device calls of its own.
#[derive(Debug)]
pub enum CameraRequest {
    Connect,
    Disconnect,
    TakePicture,
    PressShutter(ShutterButton),
    GetProperty(PropertyId),
    GetPropertyDesc(PropertyId),
    SetProperty(PropertyId, PropertyValue),
    StartLiveView,
    EndLiveView,
    DownloadFrame,
    FocusAt(Point),
    DriveLens(LensDrive),
    SetCapacity(Capacity),
    SaveSettings,
    Download {
        item: ObjectRef,
        dest: Option<PathBuf>,
    },
    Notify {
        name: String,
        text: Option<String>,
    },
}

/// Owns one session/processor pair and translates requests into enqueued
/// commands. Also listens on the bus: a `DeviceBusy` notification
/// re-enqueues the pending fetch under the retry policy.
pub struct CameraController {
    inner: Arc<Inner>,
}

struct Inner {
    session: Arc<CameraSession>,
    processor: Processor,
    retry: RetryPolicy,
    capacity: Capacity,
    attempts: Mutex<HashMap<PropertyId, u32>>,
}

impl CameraController {
    pub fn new(session: Arc<CameraSession>) -> Self {
        Self::with_policy(session, RetryPolicy::default(), Capacity::default())
    }

    pub fn with_policy(session: Arc<CameraSession>, retry: RetryPolicy, capacity: Capacity) -> Self {
        let inner = Arc::new(Inner {
            session,
            processor: Processor::new(),
            retry,
            capacity,
            attempts: Mutex::new(HashMap::new()),
        });

        inner.session.add_listener(Arc::new(BusyRetryListener {
            inner: Arc::downgrade(&inner),
        }));

        inner
            .processor
            .set_close_command(Box::new(CloseSessionCommand::new(inner.session.clone())));
        inner.processor.start();

        Self {
            inner,
        }
    }

    pub fn session(&self) -> &Arc<CameraSession> {
        &self.inner.session
    }

    pub fn handle_request(&self, request: CameraRequest) -> Result<()> {
        let session = &self.inner.session;

        match request {
            CameraRequest::Connect => {
                self.enqueue(OpenSessionCommand::new(session.clone()))?;
                self.enqueue(SetCapacityCommand::new(session.clone(), self.inner.capacity))?;
                self.enqueue(GetPropertyCommand::new(session.clone(), PropertyId::ProductName))?;
                self.enqueue(GetPropertyCommand::new(session.clone(), PropertyId::Unknown))?;
                for id in CANONICAL_REFRESH {
                    self.enqueue(GetPropertyDescCommand::new(session.clone(), id))?;
                }
                Ok(())
            }
            CameraRequest::Disconnect => self.enqueue(CloseSessionCommand::new(session.clone())),
            CameraRequest::TakePicture => self.enqueue(TakePictureCommand::new(session.clone())),
            CameraRequest::PressShutter(state) => {
                self.enqueue(PressShutterButtonCommand::new(session.clone(), state))
            }
            CameraRequest::GetProperty(id) => self.enqueue(GetPropertyCommand::new(session.clone(), id)),
            CameraRequest::GetPropertyDesc(id) => self.enqueue(GetPropertyDescCommand::new(session.clone(), id)),
            CameraRequest::SetProperty(id, value) => {
                self.enqueue(SetPropertyCommand::new(session.clone(), id, value))
            }
            CameraRequest::StartLiveView => self.enqueue(StartEvfCommand::new(session.clone())),
            CameraRequest::EndLiveView => self.enqueue(EndEvfCommand::new(session.clone())),
            CameraRequest::DownloadFrame => self.enqueue(DownloadEvfCommand::new(session.clone())),
            CameraRequest::FocusAt(point) => self.enqueue(DoEvfAfCommand::new(session.clone(), point)),
            CameraRequest::DriveLens(step) => self.enqueue(DriveLensCommand::new(session.clone(), step)),
            CameraRequest::SetCapacity(capacity) => {
                self.enqueue(SetCapacityCommand::new(session.clone(), capacity))
            }
            CameraRequest::SaveSettings => self.enqueue(SaveSettingCommand::new(session.clone())),
            CameraRequest::Download {
                item,
                dest,
            } => match dest {
                Some(dest) => self.enqueue(DownloadCommand::with_destination(session.clone(), item, dest)),
                None => self.enqueue(DownloadCommand::new(session.clone(), item)),
            },
            CameraRequest::Notify {
                name,
                text,
            } => match text {
                Some(text) => self.enqueue(NotifyCommand::with_text(session.clone(), name, text)),
                None => self.enqueue(NotifyCommand::new(session.clone(), name)),
            },
        }
    }

    /// Entry point for the native library's asynchronous property-change
    /// callback, which may arrive on any thread: the change is marshaled
    /// onto the worker as a fetch rather than touching the device from the
    /// callback thread. The native side reports "something changed" without
    /// naming a property as `PropertyId::Unknown`.
    pub fn on_property_event(&self, id: PropertyId) -> Result<()> {
        self.enqueue(GetPropertyCommand::new(self.inner.session.clone(), id))
    }

    /// Same as `on_property_event` for legal-value-set changes.
    pub fn on_property_desc_event(&self, id: PropertyId) -> Result<()> {
        self.enqueue(GetPropertyDescCommand::new(self.inner.session.clone(), id))
    }

    /// Discards queued-but-unstarted work.
    pub fn clear_pending(&self) {
        self.inner.processor.clear();
    }

    /// Drains the queue, closes the session via the registered close
    /// command, and parks the worker.
    pub fn shutdown(&self) {
        self.inner.processor.stop();
    }

    fn enqueue(&self, command: impl Command + 'static) -> Result<()> {
        self.inner.processor.enqueue(Box::new(command))
    }
}

struct BusyRetryListener {
    inner: Weak<Inner>,
}

impl CameraListener for BusyRetryListener {
    fn update(&self, event: &CameraEvent) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };

        match event.name() {
            event::DEVICE_BUSY => inner.retry_fetch(event.property()),
            event::PROPERTY_CHANGED => {
                if let Some(id) = event.property() {
                    inner.attempts.lock().unwrap().remove(&id);
                }
            }
            _ => {}
        }
    }
}

impl Inner {
    fn retry_fetch(&self, property: Option<PropertyId>) {
        let id = property.unwrap_or(PropertyId::Unknown);

        {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(id).or_insert(0);
            if *count >= self.retry.budget {
                warn!("busy-retry budget exhausted for {id:?}");
                attempts.remove(&id);
                return;
            }
            *count += 1;
        }

        if !self.retry.backoff.is_zero() {
            // Runs on the worker thread on purpose: every queued command
            // targets the same busy device, so the whole queue waits.
            thread::sleep(self.retry.backoff);
        }

        let command = GetPropertyCommand::new(self.session.clone(), id);
        if self.processor.enqueue(Box::new(command)).is_err() {
            debug!("busy retry dropped, processor already stopped");
        }
    }
}
