//! The state/event graph of a machine.
//!
//! The graph owns every [`State`] and [`Event`] definition and enforces the
//! uniqueness rules between them:
//!
//! - an event may only connect registered states,
//! - no two definitions share both name and source state.
//!
//! It carries no locking of its own; the machine guards it together with the
//! current state behind a single reader/writer lock.

use crate::core::{Event, EventHandler, Overlap, State};
use crate::error::FsmError;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Graph {
    states: HashMap<String, Arc<State>>,
    events: HashMap<String, Vec<Arc<Event>>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the state called `name`.
    pub fn add_state(&mut self, name: &str) -> Arc<State> {
        Arc::clone(
            self.states
                .entry(name.to_owned())
                .or_insert_with(|| Arc::new(State::new(name))),
        )
    }

    pub fn get_state(&self, name: &str) -> Option<Arc<State>> {
        self.states.get(name).cloned()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Remove a state and every event definition starting or ending in it.
    pub fn remove_state(&mut self, name: &str) -> bool {
        if self.states.remove(name).is_none() {
            return false;
        }
        self.events.retain(|_, definitions| {
            definitions.retain(|event| !event.touches(name));
            !definitions.is_empty()
        });
        true
    }

    /// Registered state names, sorted.
    pub fn states(&self) -> Vec<String> {
        let mut names: Vec<_> = self.states.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn add_event(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        handlers: Vec<EventHandler>,
    ) -> Result<Arc<Event>, FsmError> {
        let from_state = self.require_state(from)?;
        let to_state = self.require_state(to)?;

        let definitions = self.events.get(name).map(Vec::as_slice).unwrap_or_default();
        for existing in definitions {
            match existing.overlap(name, from, to) {
                Overlap::Identical => {
                    return Err(FsmError::EventDuplicated {
                        event: name.to_owned(),
                        from: from.to_owned(),
                        to: to.to_owned(),
                    })
                }
                Overlap::SameSource => {
                    return Err(FsmError::EventIllegal {
                        event: name.to_owned(),
                        from: from.to_owned(),
                        to: to.to_owned(),
                        existing: existing.to().name().to_owned(),
                    })
                }
                Overlap::None => {}
            }
        }

        let event = Arc::new(Event::new(name, from_state, to_state, handlers));
        self.events
            .entry(name.to_owned())
            .or_default()
            .push(Arc::clone(&event));
        Ok(event)
    }

    pub fn get_event(&self, name: &str, from: &str, to: &str) -> Option<Arc<Event>> {
        self.events
            .get(name)?
            .iter()
            .find(|event| event.is(name, from, to))
            .cloned()
    }

    /// All definitions registered under `name`, in insertion order.
    pub fn get_events(&self, name: &str) -> Vec<Arc<Event>> {
        self.events.get(name).cloned().unwrap_or_default()
    }

    /// Event names with at least one definition, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.events.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove_event(&mut self, name: &str, from: &str, to: &str) -> bool {
        let Some(definitions) = self.events.get_mut(name) else {
            return false;
        };
        let Some(index) = definitions.iter().position(|event| event.is(name, from, to)) else {
            return false;
        };
        definitions.remove(index);
        if definitions.is_empty() {
            self.events.remove(name);
        }
        true
    }

    pub fn remove_events(&mut self, name: &str) -> bool {
        self.events.remove(name).is_some()
    }

    /// Find the definition of `name` that applies from state `current`.
    pub fn resolve(&self, name: &str, current: &str) -> Result<Arc<Event>, FsmError> {
        let definitions = self
            .events
            .get(name)
            .ok_or_else(|| FsmError::EventNotExist {
                event: name.to_owned(),
            })?;
        definitions
            .iter()
            .find(|event| event.from().name() == current)
            .cloned()
            .ok_or_else(|| FsmError::IllegalStateForEvent {
                event: name.to_owned(),
                state: current.to_owned(),
            })
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.states.clear();
    }

    fn require_state(&self, name: &str) -> Result<Arc<State>, FsmError> {
        self.get_state(name).ok_or_else(|| FsmError::StateNotExist {
            state: name.to_owned(),
        })
    }
}
