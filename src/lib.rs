//! prio-fsm: a concurrency-safe state machine driven by a priority queue
//!
//! States and events are identified by name and registered at runtime.
//! Emitting an event does not apply it directly: the request is queued by
//! priority and executed one at a time against whatever the current state is
//! when it is dequeued. Every emission receives exactly one result.
//!
//! # Core Concepts
//!
//! - **State**: a named node with `on_enter`/`on_leave` handlers
//! - **Event**: a named `from -> to` edge with transition handlers; one name
//!   may label edges out of several states
//! - **Priority queue**: higher priorities run first, FIFO within a priority
//! - **Mode**: who executes queued events (a worker thread, or the callers)
//!
//! # Example
//!
//! ```rust
//! use prio_fsm::{Machine, Mode};
//!
//! let machine = Machine::new(Mode::CallerDrivenSerialized, "closed").unwrap();
//! machine.add_state("syn_sent");
//! machine.add_state("established");
//! machine.add_event("sendsyn", "closed", "syn_sent").unwrap();
//! machine.add_event("recvsynack", "syn_sent", "established").unwrap();
//!
//! machine
//!     .get_state("established")
//!     .unwrap()
//!     .on_enter(|state| println!("now {}", state.name()));
//!
//! machine.emit("sendsyn").unwrap();
//! machine.emit_with_priority(10, "recvsynack").unwrap();
//! assert!(machine.is_in_state(&["established"]));
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod error;
mod graph;
pub mod machine;
pub mod queue;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, MachineConfig};
pub use crate::core::{Event, EventHandler, State, StateHandler};
pub use definition::{DefinitionError, EventDefinition, MachineDefinition};
pub use error::FsmError;
pub use machine::{Emission, Machine, Mode};
pub use queue::{PriorityQueue, QueueError, DEFAULT_PRIORITY};
