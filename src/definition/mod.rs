//! Declarative machine definitions.
//!
//! The states and events of a concrete protocol are configuration data. A
//! [`MachineDefinition`] captures them, together with the runtime settings,
//! in a serde-friendly shape so they can live in a JSON file.
//!
//! Handlers are code and cannot be declared here; attach them to the built
//! machine's states and events.

use crate::builder::{MachineBuilder, MachineConfig};
use crate::machine::Machine;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::DefinitionError;

/// One `name: from -> to` edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl EventDefinition {
    pub fn new(name: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Complete description of a machine, minus its handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// State the machine starts in
    pub initial: String,

    /// Runtime settings
    #[serde(default)]
    pub config: MachineConfig,

    /// States to register. Event endpoints are registered automatically.
    #[serde(default)]
    pub states: Vec<String>,

    /// Events, added in order
    #[serde(default)]
    pub events: Vec<EventDefinition>,
}

impl MachineDefinition {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            config: MachineConfig::default(),
            states: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.push(name.into());
        self
    }

    pub fn event(
        mut self,
        name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.events.push(EventDefinition::new(name, from, to));
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a machine with every state and event of this definition.
    ///
    /// Fails on the first rejected event; the partially built machine is
    /// closed and dropped.
    pub fn build(&self) -> Result<Machine, DefinitionError> {
        let machine = MachineBuilder::new()
            .initial(self.initial.clone())
            .config(self.config.clone())
            .build()?;

        for state in &self.states {
            machine.add_state(state);
        }
        for event in &self.events {
            machine.add_state(&event.from);
            machine.add_state(&event.to);
            machine.add_event(&event.name, &event.from, &event.to)?;
        }

        Ok(machine)
    }
}
