//! Multi-level priority queue with blocking and non-blocking consumption.
//!
//! Items are grouped into one FIFO bucket per priority value. Buckets are
//! created lazily on first use and never removed. Consumers always drain the
//! highest non-empty priority first and preserve push order within a level.
//!
//! There is no starvation prevention: a steady stream of high-priority pushes
//! keeps lower levels waiting indefinitely.
//!
//! # Example
//!
//! ```rust
//! use prio_fsm::queue::PriorityQueue;
//!
//! let queue = PriorityQueue::new();
//! queue.push_with_priority(1, "foo").unwrap();
//! queue.push_with_priority(-1, "bar").unwrap();
//! queue.push_with_priority(99, "baz").unwrap();
//!
//! assert_eq!(queue.pop(), Some("baz"));
//! assert_eq!(queue.pop(), Some("foo"));
//! assert_eq!(queue.pop(), Some("bar"));
//! assert_eq!(queue.pop(), None);
//! ```

mod error;

pub use error::QueueError;

use parking_lot::{Condvar, Mutex};
use std::collections::{BTreeMap, VecDeque};

/// Priority used by [`PriorityQueue::push`] unless configured otherwise.
/// Larger values drain first.
pub const DEFAULT_PRIORITY: i32 = 1;

struct Levels<T> {
    buckets: BTreeMap<i32, VecDeque<T>>,
    len: usize,
    closed: bool,
}

impl<T> Levels<T> {
    fn take_highest(&mut self) -> Option<T> {
        let item = self
            .buckets
            .values_mut()
            .rev()
            .find_map(|bucket| bucket.pop_front())?;
        self.len -= 1;
        Some(item)
    }
}

/// Thread-safe priority queue.
///
/// Blocking consumers park on a condition variable and are woken by pushes
/// and by [`close`](PriorityQueue::close).
pub struct PriorityQueue<T> {
    levels: Mutex<Levels<T>>,
    available: Condvar,
    capacity: Option<usize>,
    default_priority: i32,
}

impl<T> PriorityQueue<T> {
    /// Create an unbounded queue using [`DEFAULT_PRIORITY`].
    pub fn new() -> Self {
        Self::with_options(None, DEFAULT_PRIORITY)
    }

    /// Create a queue that rejects pushes once `capacity` items are queued.
    pub fn bounded(capacity: usize) -> Self {
        Self::with_options(Some(capacity), DEFAULT_PRIORITY)
    }

    /// Create a queue with an optional capacity and a custom default priority.
    pub fn with_options(capacity: Option<usize>, default_priority: i32) -> Self {
        let mut buckets = BTreeMap::new();
        buckets.insert(default_priority, VecDeque::new());
        Self {
            levels: Mutex::new(Levels {
                buckets,
                len: 0,
                closed: false,
            }),
            available: Condvar::new(),
            capacity,
            default_priority,
        }
    }

    /// Push at the queue's default priority.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        self.push_with_priority(self.default_priority, item)
    }

    /// Push into the bucket for `priority`, creating the bucket if needed.
    ///
    /// Never blocks. Fails if the queue is closed or full.
    pub fn push_with_priority(&self, priority: i32, item: T) -> Result<(), QueueError> {
        let mut levels = self.levels.lock();
        if levels.closed {
            return Err(QueueError::Closed);
        }
        if let Some(capacity) = self.capacity {
            if levels.len >= capacity {
                return Err(QueueError::Full { capacity });
            }
        }
        levels.buckets.entry(priority).or_default().push_back(item);
        levels.len += 1;
        drop(levels);

        self.available.notify_one();
        Ok(())
    }

    /// Remove the front item of the highest non-empty priority level.
    pub fn pop(&self) -> Option<T> {
        self.levels.lock().take_highest()
    }

    /// Like [`pop`](Self::pop) but waits for an item.
    ///
    /// Returns `None` once the queue is closed.
    pub fn pop_blocking(&self) -> Option<T> {
        let mut levels = self.levels.lock();
        loop {
            if levels.closed {
                return None;
            }
            if let Some(item) = levels.take_highest() {
                return Some(item);
            }
            self.available.wait(&mut levels);
        }
    }

    /// Close the queue, returning whatever was still queued in drain order.
    ///
    /// Wakes every blocked [`pop_blocking`](Self::pop_blocking) caller.
    /// Closing twice returns an empty list the second time.
    pub fn close(&self) -> Vec<T> {
        let mut levels = self.levels.lock();
        levels.closed = true;
        let mut drained = Vec::with_capacity(levels.len);
        while let Some(item) = levels.take_highest() {
            drained.push(item);
        }
        drop(levels);

        self.available.notify_all();
        drained
    }

    pub fn is_closed(&self) -> bool {
        self.levels.lock().closed
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.levels.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Free slots left in a bounded queue; `None` when unbounded.
    pub fn available(&self) -> Option<usize> {
        let len = self.len();
        self.capacity.map(|capacity| capacity.saturating_sub(len))
    }

    pub fn default_priority(&self) -> i32 {
        self.default_priority
    }

    /// Every priority level created so far, highest first.
    pub fn levels(&self) -> Vec<i32> {
        self.levels.lock().buckets.keys().rev().copied().collect()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn higher_priority_drains_first() {
        let queue = PriorityQueue::new();
        queue.push_with_priority(1, "foo").unwrap();
        queue.push_with_priority(-1, "bar").unwrap();
        queue.push_with_priority(99, "bza").unwrap();

        assert_eq!(queue.pop(), Some("bza"));
        assert_eq!(queue.pop(), Some("foo"));
        assert_eq!(queue.pop(), Some("bar"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn equal_priority_is_fifo() {
        let queue = PriorityQueue::new();
        for i in 0..5 {
            queue.push(i).unwrap();
        }

        let drained: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn push_uses_configured_default_priority() {
        let queue = PriorityQueue::with_options(None, 10);
        queue.push_with_priority(5, "five").unwrap();
        queue.push("default").unwrap();

        assert_eq!(queue.default_priority(), 10);
        assert_eq!(queue.pop(), Some("default"));
    }

    #[test]
    fn levels_are_created_lazily_and_kept() {
        let queue = PriorityQueue::new();
        assert_eq!(queue.levels(), vec![DEFAULT_PRIORITY]);

        queue.push_with_priority(7, ()).unwrap();
        queue.push_with_priority(-3, ()).unwrap();
        queue.pop();
        queue.pop();

        assert_eq!(queue.levels(), vec![7, 1, -3]);
    }

    #[test]
    fn bounded_queue_rejects_when_full() {
        let queue = PriorityQueue::bounded(2);
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        assert_eq!(queue.push(3), Err(QueueError::Full { capacity: 2 }));
        assert_eq!(queue.available(), Some(0));

        queue.pop();
        assert_eq!(queue.available(), Some(1));
        assert!(queue.push(3).is_ok());
    }

    #[test]
    fn unbounded_queue_reports_no_capacity() {
        let queue: PriorityQueue<u8> = PriorityQueue::new();
        assert_eq!(queue.capacity(), None);
        assert_eq!(queue.available(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn push_after_close_is_rejected() {
        let queue = PriorityQueue::new();
        queue.push("kept").unwrap();

        let drained = queue.close();
        assert_eq!(drained, vec!["kept"]);
        assert!(queue.is_closed());
        assert_eq!(queue.push("late"), Err(QueueError::Closed));
        assert!(queue.close().is_empty());
    }

    #[test]
    fn close_drains_in_priority_order() {
        let queue = PriorityQueue::new();
        queue.push_with_priority(0, "low").unwrap();
        queue.push_with_priority(5, "high").unwrap();

        assert_eq!(queue.close(), vec!["high", "low"]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn pop_blocking_waits_for_push() {
        let queue = Arc::new(PriorityQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_blocking())
        };

        thread::sleep(Duration::from_millis(50));
        queue.push_with_priority(3, "wake").unwrap();

        assert_eq!(consumer.join().unwrap(), Some("wake"));
    }

    #[test]
    fn close_releases_blocked_consumers() {
        let queue: Arc<PriorityQueue<u32>> = Arc::new(PriorityQueue::new());
        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.pop_blocking())
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        queue.close();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }
}
