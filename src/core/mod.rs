//! Core building blocks of a machine: states and event definitions.
//!
//! Both carry append-only handler lists. A running transition iterates a
//! snapshot of each list, so registering a handler from inside a handler is
//! allowed and takes effect from the next transition.

mod event;
mod state;

pub(crate) use event::Overlap;
pub use event::{Event, EventHandler};
pub use state::{State, StateHandler};
