//! The event-driven state machine.
//!
//! A [`Machine`] owns a state/event graph, a current state and a priority
//! queue of pending event requests. Emitting an event queues a request; how
//! and by whom requests are executed depends on the [`Mode`] picked at
//! construction.
//!
//! # Example
//!
//! ```rust
//! use prio_fsm::{FsmError, Machine, Mode};
//!
//! let machine = Machine::new(Mode::Asynchronous, "closed").unwrap();
//! machine.add_state("syn_sent");
//! machine.add_event("sendsyn", "closed", "syn_sent").unwrap();
//!
//! machine.emit("sendsyn").unwrap();
//! assert_eq!(machine.current_state(), "syn_sent");
//!
//! assert_eq!(
//!     machine.emit("sendsyn"),
//!     Err(FsmError::IllegalStateForEvent {
//!         event: "sendsyn".into(),
//!         state: "syn_sent".into(),
//!     })
//! );
//! machine.close();
//! ```

mod dispatch;
mod emission;
mod executor;

pub use dispatch::Mode;
pub use emission::Emission;

use crate::builder::{BuildError, MachineBuilder, MachineConfig};
use crate::core::{Event, EventHandler, State};
use crate::error::FsmError;
use crate::graph::Graph;
use crate::queue::PriorityQueue;
use executor::Request;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use tracing::{debug, error, warn};
use uuid::Uuid;

struct Inner {
    current: String,
    graph: Graph,
}

/// State reachable from both the machine handle and its worker thread.
struct Shared {
    id: Uuid,
    mode: Mode,
    inner: RwLock<Inner>,
    queue: PriorityQueue<Request>,
    /// Held while a request executes; spans the whole submission in
    /// `CallerDrivenSerialized` mode.
    exec: Mutex<()>,
    /// Thread executing a request, if any. Left stale by a panicking handler.
    runner: Mutex<Option<ThreadId>>,
    closed: AtomicBool,
}

/// A concurrency-safe state machine driven by a priority event queue.
///
/// All methods take `&self`; share the machine between threads with an
/// `Arc<Machine>`. Dropping the machine closes it.
pub struct Machine {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Machine {
    /// Create a machine in `mode` whose current state is `initial`.
    pub fn new(mode: Mode, initial: impl Into<String>) -> Result<Self, BuildError> {
        Self::builder().initial(initial).mode(mode).build()
    }

    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    pub(crate) fn start(initial: String, config: MachineConfig) -> Result<Self, BuildError> {
        let mut graph = Graph::new();
        graph.add_state(&initial);

        let shared = Arc::new(Shared {
            id: Uuid::new_v4(),
            mode: config.mode,
            inner: RwLock::new(Inner {
                current: initial,
                graph,
            }),
            queue: PriorityQueue::with_options(config.capacity, config.default_priority),
            exec: Mutex::new(()),
            runner: Mutex::new(None),
            closed: AtomicBool::new(false),
        });

        let worker = match config.mode {
            Mode::Asynchronous => Some(dispatch::spawn_worker(Arc::clone(&shared))?),
            Mode::CallerDriven | Mode::CallerDrivenSerialized => None,
        };

        debug!(machine = %shared.id, mode = ?config.mode, "machine opened");
        Ok(Self {
            shared,
            worker: Mutex::new(worker),
        })
    }

    /// Identifier used in this machine's log output.
    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn mode(&self) -> Mode {
        self.shared.mode
    }

    pub fn current_state(&self) -> String {
        self.shared.inner.read().current.clone()
    }

    /// Whether the current state is any of `names`.
    pub fn is_in_state(&self, names: &[&str]) -> bool {
        let inner = self.shared.inner.read();
        names.iter().any(|name| *name == inner.current)
    }

    /// Force the current state, bypassing events and handlers.
    ///
    /// Returns `false` if `name` is not a registered state.
    pub fn set_state(&self, name: &str) -> bool {
        let mut inner = self.shared.inner.write();
        if !inner.graph.has_state(name) {
            return false;
        }
        inner.current = name.to_owned();
        true
    }

    /// Get or create the state called `name`.
    pub fn add_state(&self, name: &str) -> Arc<State> {
        self.shared.inner.write().graph.add_state(name)
    }

    pub fn get_state(&self, name: &str) -> Option<Arc<State>> {
        self.shared.inner.read().graph.get_state(name)
    }

    /// Remove a state along with every event definition touching it.
    pub fn remove_state(&self, name: &str) -> bool {
        self.shared.inner.write().graph.remove_state(name)
    }

    /// Registered state names, sorted.
    pub fn states(&self) -> Vec<String> {
        self.shared.inner.read().graph.states()
    }

    /// Define event `name` as the edge `from -> to`.
    ///
    /// Both states must already exist. A name may be reused from a
    /// different source state, but not twice from the same one.
    pub fn add_event(&self, name: &str, from: &str, to: &str) -> Result<Arc<Event>, FsmError> {
        self.add_event_with_handlers(name, from, to, Vec::new())
    }

    pub fn add_event_with_handlers(
        &self,
        name: &str,
        from: &str,
        to: &str,
        handlers: Vec<EventHandler>,
    ) -> Result<Arc<Event>, FsmError> {
        self.shared
            .inner
            .write()
            .graph
            .add_event(name, from, to, handlers)
    }

    pub fn get_event(&self, name: &str, from: &str, to: &str) -> Option<Arc<Event>> {
        self.shared.inner.read().graph.get_event(name, from, to)
    }

    pub fn get_events(&self, name: &str) -> Vec<Arc<Event>> {
        self.shared.inner.read().graph.get_events(name)
    }

    pub fn event_names(&self) -> Vec<String> {
        self.shared.inner.read().graph.event_names()
    }

    pub fn remove_event(&self, name: &str, from: &str, to: &str) -> bool {
        self.shared
            .inner
            .write()
            .graph
            .remove_event(name, from, to)
    }

    pub fn remove_events(&self, name: &str) -> bool {
        self.shared.inner.write().graph.remove_events(name)
    }

    /// Emit `event` at the default priority and wait for its result.
    ///
    /// Blocks the calling thread; use [`emit_async`](Self::emit_async) from
    /// async code.
    pub fn emit(&self, event: &str) -> Result<(), FsmError> {
        self.emit_async(event).wait()
    }

    /// Emit `event` at the default priority without waiting.
    pub fn emit_async(&self, event: &str) -> Emission {
        self.shared
            .submit(self.shared.queue.default_priority(), event)
    }

    pub fn emit_with_priority(&self, priority: i32, event: &str) -> Result<(), FsmError> {
        self.emit_with_priority_async(priority, event).wait()
    }

    pub fn emit_with_priority_async(&self, priority: i32, event: &str) -> Emission {
        self.shared.submit(priority, event)
    }

    /// Requests queued and not yet picked up for execution.
    pub fn queued(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Close the machine.
    ///
    /// Queued requests complete with [`FsmError::Closed`], a transition
    /// already executing runs to completion, the worker (if any) is stopped
    /// and joined, and every state and event definition is dropped. Later
    /// emissions fail with `Closed`. Calling it again does nothing.
    ///
    /// From inside a handler, close does not wait for the transition that
    /// invoked it; that transition commits after close returns.
    pub fn close(&self) {
        if self.shared.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let pending = self.shared.queue.close();
        if !pending.is_empty() {
            warn!(
                machine = %self.shared.id,
                count = pending.len(),
                "failing queued events on close"
            );
        }
        for request in pending {
            request.complete(Err(FsmError::Closed));
        }

        let current = thread::current().id();
        if *self.shared.runner.lock() != Some(current) {
            drop(self.shared.exec.lock());
        }

        if let Some(handle) = self.worker.lock().take() {
            // A handler closing its own machine runs on the worker itself.
            if handle.thread().id() != thread::current().id() && handle.join().is_err() {
                error!(machine = %self.shared.id, "worker thread panicked");
            }
        }

        self.shared.inner.write().graph.clear();
        debug!(machine = %self.shared.id, "machine closed");
    }
}

impl Drop for Machine {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.shared.id)
            .field("mode", &self.shared.mode)
            .field("current", &self.current_state())
            .field("queued", &self.queued())
            .field("closed", &self.is_closed())
            .finish()
    }
}
