//! Builder for constructing machines.

use crate::builder::config::MachineConfig;
use crate::builder::error::BuildError;
use crate::machine::{Machine, Mode};

/// Builder for constructing machines with a fluent API.
#[derive(Debug, Default)]
pub struct MachineBuilder {
    initial: Option<String>,
    config: MachineConfig,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required). The state is registered on build.
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Bound the event queue; emissions beyond it fail with `QueueFull`.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = Some(capacity);
        self
    }

    pub fn default_priority(mut self, priority: i32) -> Self {
        self.config.default_priority = priority;
        self
    }

    /// Replace every setting at once.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the machine, starting its worker in asynchronous mode.
    pub fn build(self) -> Result<Machine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.config.capacity == Some(0) {
            return Err(BuildError::ZeroCapacity);
        }

        Machine::start(initial, self.config)
    }
}
