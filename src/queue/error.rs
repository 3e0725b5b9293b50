//! Queue error types.

use thiserror::Error;

/// Errors returned when pushing onto a [`PriorityQueue`](super::PriorityQueue).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue holds `capacity` items already
    #[error("Queue full (capacity {capacity})")]
    Full { capacity: usize },

    /// The queue has been closed and accepts no more items
    #[error("Queue closed")]
    Closed,
}
