//! Builder API for machine construction.
//!
//! [`MachineBuilder`] assembles a [`Machine`](crate::Machine) from an initial
//! state and a [`MachineConfig`]. States and events are added to the built
//! machine afterwards, or declared up front with a
//! [`MachineDefinition`](crate::definition::MachineDefinition).

pub mod config;
pub mod error;
pub mod machine;

pub use config::MachineConfig;
pub use error::BuildError;
pub use machine::MachineBuilder;
