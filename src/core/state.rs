//! State descriptors and their enter/leave handlers.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Callback run when a state is entered or left.
pub type StateHandler = Arc<dyn Fn(&State) + Send + Sync>;

/// A named state of a machine.
///
/// States are owned by the machine's graph and handed out as `Arc<State>`.
/// Handlers may be registered at any time; a transition that is already
/// running a handler phase keeps using the list it started with.
///
/// # Example
///
/// ```rust
/// use prio_fsm::{Machine, Mode};
///
/// let machine = Machine::new(Mode::CallerDriven, "closed").unwrap();
/// let listen = machine.add_state("listen");
/// listen.on_enter(|state| println!("entered {}", state.name()));
///
/// assert_eq!(listen.name(), "listen");
/// assert_eq!(listen.enter_handler_count(), 1);
/// ```
pub struct State {
    name: String,
    enters: RwLock<Vec<StateHandler>>,
    leaves: RwLock<Vec<StateHandler>>,
}

impl State {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enters: RwLock::new(Vec::new()),
            leaves: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a handler to run after the machine moves into this state.
    pub fn on_enter<F>(&self, handler: F)
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        self.enters.write().push(Arc::new(handler));
    }

    /// Register a handler to run before the machine moves out of this state.
    pub fn on_leave<F>(&self, handler: F)
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        self.leaves.write().push(Arc::new(handler));
    }

    pub fn enter_handler_count(&self) -> usize {
        self.enters.read().len()
    }

    pub fn leave_handler_count(&self) -> usize {
        self.leaves.read().len()
    }

    pub(crate) fn run_enter(&self) {
        let handlers = self.enters.read().clone();
        for handler in &handlers {
            handler(self);
        }
    }

    pub(crate) fn run_leave(&self) {
        let handlers = self.leaves.read().clone();
        for handler in &handlers {
            handler(self);
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("enters", &self.enter_handler_count())
            .field("leaves", &self.leave_handler_count())
            .finish()
    }
}
