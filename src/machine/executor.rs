//! Applies dequeued event requests to the machine.

use super::Shared;
use crate::error::FsmError;
use parking_lot::MutexGuard;
use std::thread;
use tokio::sync::oneshot;
use tracing::{debug, trace};

pub(super) type Reply = oneshot::Sender<Result<(), FsmError>>;

/// A pending emission: the event to apply and where to send the outcome.
pub(super) struct Request {
    pub(super) event: String,
    pub(super) priority: i32,
    reply: Reply,
}

impl Request {
    pub(super) fn new(event: &str, priority: i32, reply: Reply) -> Self {
        Self {
            event: event.to_owned(),
            priority,
            reply,
        }
    }

    /// Deliver the outcome. The submitter may have stopped listening.
    pub(super) fn complete(self, result: Result<(), FsmError>) {
        if self.reply.send(result).is_err() {
            trace!(event = %self.event, "result dropped, submitter stopped waiting");
        }
    }
}

impl Shared {
    /// Execute `request` against the current state and deliver its result.
    ///
    /// The guard proves the caller holds the execution lock.
    pub(super) fn execute(&self, _exec: &MutexGuard<'_, ()>, request: Request) {
        *self.runner.lock() = Some(thread::current().id());
        let result = self.apply(&request.event);
        *self.runner.lock() = None;
        request.complete(result);
    }

    fn apply(&self, name: &str) -> Result<(), FsmError> {
        let event = {
            let inner = self.inner.read();
            inner.graph.resolve(name, &inner.current)?
        };

        // Handlers run without the graph lock so they may inspect the machine.
        event.from().run_leave();
        event.run_handlers();
        event.to().run_enter();

        self.inner.write().current = event.to().name().to_owned();
        debug!(
            machine = %self.id,
            event = name,
            from = event.from().name(),
            to = event.to().name(),
            "transition committed"
        );
        Ok(())
    }
}
