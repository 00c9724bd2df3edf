//! Single-worker serial executor for commands.
//!
//! The hardware link tolerates exactly one in-flight operation, so every
//! producer (GUI thread, native callbacks) communicates with the device
//! solely by enqueueing here. One worker thread dequeues in strict FIFO
//! order and executes one command at a time; that alone is what serializes
//! device access.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use tether_core::{error::Error, Result};

use crate::command::Command;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum State {
    #[default]
    Idle,
    Running,
    Stopping,
    Stopped,
}

#[derive(Default)]
struct Queue {
    state: State,
    pending: VecDeque<Box<dyn Command>>,
    close: Option<Box<dyn Command>>,
}

struct Shared {
    queue: Mutex<Queue>,
    ready: Condvar,
}

pub struct Processor {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Processor {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(Queue::default()),
                ready: Condvar::new(),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Registers the command that runs last during shutdown, after the
    /// queue has drained (typically a session close).
    pub fn set_close_command(&self, command: Box<dyn Command>) {
        self.shared.queue.lock().unwrap().close = Some(command);
    }

    /// Spawns the worker. No-op unless the processor is still idle.
    pub fn start(&self) {
        {
            let mut queue = self.shared.queue.lock().unwrap();
            if queue.state != State::Idle {
                warn!("start ignored in state {:?}", queue.state);
                return;
            }
            queue.state = State::Running;
        }

        let shared = self.shared.clone();
        *self.worker.lock().unwrap() = Some(thread::spawn(move || worker_main(shared)));
    }

    /// Appends a command to the queue. Rejected once `stop` has been
    /// called; enqueueing on a dead queue is a caller error, not a silent
    /// drop.
    pub fn enqueue(&self, command: Box<dyn Command>) -> Result<()> {
        let mut queue = self.shared.queue.lock().unwrap();

        match queue.state {
            State::Idle | State::Running => {
                queue.pending.push_back(command);
                self.shared.ready.notify_one();
                Ok(())
            }
            State::Stopping | State::Stopped => Err(Error::Terminated("command queue is shut down".into())),
        }
    }

    /// Discards every queued-but-unstarted command. The command currently
    /// executing, if any, is unaffected, as is anything enqueued later.
    pub fn clear(&self) {
        let mut queue = self.shared.queue.lock().unwrap();
        let dropped = queue.pending.len();
        queue.pending.clear();

        if dropped > 0 {
            debug!("discarded {dropped} queued command(s)");
        }
    }

    /// Shuts the queue down: refuses new work, lets the worker drain what
    /// is already queued, runs the registered close command last, then
    /// joins the worker. Safe to call more than once.
    pub fn stop(&self) {
        let close_inline = {
            let mut queue = self.shared.queue.lock().unwrap();

            match queue.state {
                State::Stopped => return,
                State::Idle => {
                    // Never started: nothing can drain, so run the close
                    // command on the caller's thread.
                    queue.state = State::Stopped;
                    queue.pending.clear();
                    queue.close.take()
                }
                State::Running | State::Stopping => {
                    queue.state = State::Stopping;
                    self.shared.ready.notify_all();
                    None
                }
            }
        };

        if let Some(close) = close_inline {
            close.execute();
        }

        if let Some(worker) = self.worker.lock().unwrap().take() {
            worker.join().ok();
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Processor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_main(shared: Arc<Shared>) {
    debug!("command worker started");

    loop {
        let mut queue = shared.queue.lock().unwrap();

        let command = loop {
            if let Some(command) = queue.pending.pop_front() {
                break Some(command);
            }
            match queue.state {
                State::Stopping | State::Stopped => break None,
                _ => queue = shared.ready.wait(queue).unwrap(),
            }
        };

        match command {
            Some(command) => {
                drop(queue);
                if !command.execute() {
                    // Not advanced; any retry is the issuer's call.
                    debug!("command did not complete, dropping");
                }
            }
            None => {
                let close = queue.close.take();
                queue.state = State::Stopped;
                drop(queue);

                if let Some(close) = close {
                    if !close.execute() {
                        warn!("close command did not complete");
                    }
                }
                break;
            }
        }
    }

    debug!("command worker terminated");
}
