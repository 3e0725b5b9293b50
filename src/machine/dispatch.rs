//! Routing of submitted events to the executor.

use super::emission::Emission;
use super::executor::Request;
use super::Shared;
use crate::error::FsmError;
use crate::queue::QueueError;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;
use std::sync::atomic::Ordering;
use tracing::{debug, error, trace};

/// Who executes queued events. Fixed for the lifetime of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// A worker thread owned by the machine drains the queue; emitting only
    /// enqueues.
    #[default]
    Asynchronous,

    /// The emitting call enqueues, then executes whichever request is at the
    /// head of the queue. That may be another caller's request, in which
    /// case this caller's own request is run by someone else.
    CallerDriven,

    /// Like `CallerDriven`, but enqueue and execute happen under one lock, so
    /// every caller executes exactly its own request.
    CallerDrivenSerialized,
}

impl Shared {
    pub(super) fn submit(&self, priority: i32, event: &str) -> Emission {
        let (reply, rx) = oneshot::channel();
        let request = Request::new(event, priority, reply);

        match self.mode {
            Mode::Asynchronous => {
                if let Err(err) = self.enqueue(request) {
                    return Emission::failed(self.rejection(err));
                }
            }
            Mode::CallerDriven => {
                if let Err(err) = self.enqueue(request) {
                    return Emission::failed(err.into());
                }
                let exec = self.exec.lock();
                if let Some(next) = self.queue.pop() {
                    self.execute(&exec, next);
                }
            }
            Mode::CallerDrivenSerialized => {
                let exec = self.exec.lock();
                if let Err(err) = self.enqueue(request) {
                    return Emission::failed(err.into());
                }
                if let Some(next) = self.queue.pop() {
                    self.execute(&exec, next);
                }
            }
        }

        Emission::new(rx)
    }

    fn enqueue(&self, request: Request) -> Result<(), QueueError> {
        trace!(
            machine = %self.id,
            event = %request.event,
            priority = request.priority,
            "event queued"
        );
        let priority = request.priority;
        self.queue.push_with_priority(priority, request)
    }

    /// A queue closed without `Machine::close` means the worker is gone.
    fn rejection(&self, err: QueueError) -> FsmError {
        match err {
            QueueError::Closed if !self.closed.load(Ordering::SeqCst) => {
                FsmError::WorkerStopped
            }
            err => err.into(),
        }
    }

    fn run_worker(&self) {
        debug!(machine = %self.id, "worker started");
        let _stop = WorkerStop { shared: self };
        while let Some(request) = self.queue.pop_blocking() {
            trace!(machine = %self.id, event = %request.event, "event dequeued");
            let exec = self.exec.lock();
            self.execute(&exec, request);
        }
        debug!(machine = %self.id, "worker stopped");
    }
}

/// Fails the backlog if the worker unwinds out of a handler.
struct WorkerStop<'a> {
    shared: &'a Shared,
}

impl Drop for WorkerStop<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        let pending = self.shared.queue.close();
        error!(
            machine = %self.shared.id,
            failed = pending.len(),
            "worker stopped by a panicking handler"
        );
        for request in pending {
            request.complete(Err(FsmError::WorkerStopped));
        }
    }
}

pub(super) fn spawn_worker(shared: Arc<Shared>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("prio-fsm-worker".into())
        .spawn(move || shared.run_worker())
}
