//! Event definitions: named (from, to) rules with transition handlers.

use super::state::State;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Callback run while the machine moves along an event's edge.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// How a candidate (name, from, to) relates to an existing definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overlap {
    /// Different name, or same name from a different state.
    None,
    /// Same name and `from`, different `to`.
    SameSource,
    /// Identical name, `from` and `to`.
    Identical,
}

/// One definition of a named event.
///
/// Several definitions may share a name as long as their source states
/// differ, so the same event name can drive different edges depending on
/// where the machine currently is.
pub struct Event {
    name: String,
    from: Arc<State>,
    to: Arc<State>,
    handlers: RwLock<Vec<EventHandler>>,
}

impl Event {
    pub(crate) fn new(
        name: impl Into<String>,
        from: Arc<State>,
        to: Arc<State>,
        handlers: Vec<EventHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            handlers: RwLock::new(handlers),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> &Arc<State> {
        &self.from
    }

    pub fn to(&self) -> &Arc<State> {
        &self.to
    }

    /// Register a handler to run between the source's leave handlers and the
    /// target's enter handlers.
    pub fn on_transition<F>(&self, handler: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.handlers.write().push(Arc::new(handler));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub(crate) fn is(&self, name: &str, from: &str, to: &str) -> bool {
        self.name == name && self.from.name() == from && self.to.name() == to
    }

    pub(crate) fn touches(&self, state: &str) -> bool {
        self.from.name() == state || self.to.name() == state
    }

    pub(crate) fn overlap(&self, name: &str, from: &str, to: &str) -> Overlap {
        if self.name != name || self.from.name() != from {
            Overlap::None
        } else if self.to.name() == to {
            Overlap::Identical
        } else {
            Overlap::SameSource
        }
    }

    pub(crate) fn run_handlers(&self) {
        let handlers = self.handlers.read().clone();
        for handler in &handlers {
            handler(self);
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("from", &self.from.name())
            .field("to", &self.to.name())
            .field("handlers", &self.handler_count())
            .finish()
    }
}
