//! Handle to the outcome of an emitted event.

use crate::error::FsmError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// The one-shot result of an emitted event.
///
/// Await it from async code or call [`wait`](Emission::wait) to block.
/// Dropping it does not cancel the request; the event still runs.
#[must_use = "an emission does nothing with its result unless awaited or waited on"]
#[derive(Debug)]
pub struct Emission {
    rx: oneshot::Receiver<Result<(), FsmError>>,
}

impl Emission {
    pub(super) fn new(rx: oneshot::Receiver<Result<(), FsmError>>) -> Self {
        Self { rx }
    }

    /// An emission that already failed before being queued.
    pub(super) fn failed(err: FsmError) -> Self {
        let (tx, rx) = oneshot::channel();
        // The receiver is alive, so sending cannot fail.
        let _ = tx.send(Err(err));
        Self { rx }
    }

    /// Block the current thread until the result arrives.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context;
    /// `.await` the emission there instead.
    pub fn wait(self) -> Result<(), FsmError> {
        self.rx.blocking_recv().unwrap_or(Err(FsmError::Abandoned))
    }
}

impl Future for Emission {
    type Output = Result<(), FsmError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(FsmError::Abandoned)))
    }
}
