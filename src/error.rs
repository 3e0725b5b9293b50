//! Errors produced by graph mutation and event emission.

use crate::queue::QueueError;
use thiserror::Error;

/// Errors reported by a [`Machine`](crate::Machine).
///
/// Graph mutations return them directly; emissions deliver them through
/// the request's result slot. None of them are retried by the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("Event '{event}' does not exist")]
    EventNotExist { event: String },

    #[error("Event '{event}' is not defined from state '{state}'")]
    IllegalStateForEvent { event: String, state: String },

    #[error("State '{state}' does not exist")]
    StateNotExist { state: String },

    #[error("Event '{event}' from '{from}' to '{to}' already exists")]
    EventDuplicated {
        event: String,
        from: String,
        to: String,
    },

    #[error("Event '{event}' from '{from}' already leads to '{existing}', cannot also lead to '{to}'")]
    EventIllegal {
        event: String,
        from: String,
        to: String,
        existing: String,
    },

    #[error("Event queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("Machine closed")]
    Closed,

    /// The worker thread stopped after a handler panicked; the machine no
    /// longer executes events.
    #[error("Event worker stopped")]
    WorkerStopped,

    /// The request was dropped before a result could be delivered. This
    /// happens when a handler panics while the request executes, on the
    /// worker thread or on a caller running another caller's request.
    #[error("Event request abandoned before completion")]
    Abandoned,
}

impl From<QueueError> for FsmError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Full { capacity } => FsmError::QueueFull { capacity },
            QueueError::Closed => FsmError::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_errors_convert() {
        assert_eq!(
            FsmError::from(QueueError::Full { capacity: 8 }),
            FsmError::QueueFull { capacity: 8 }
        );
        assert_eq!(FsmError::from(QueueError::Closed), FsmError::Closed);
    }

    #[test]
    fn messages_name_the_offenders() {
        let err = FsmError::EventIllegal {
            event: "close".into(),
            from: "established".into(),
            to: "closed".into(),
            existing: "fin_wait_1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Event 'close' from 'established' already leads to 'fin_wait_1', cannot also lead to 'closed'"
        );
    }
}
