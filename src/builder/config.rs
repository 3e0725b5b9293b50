//! Runtime settings of a machine.

use crate::machine::Mode;
use crate::queue::DEFAULT_PRIORITY;
use serde::{Deserialize, Serialize};

/// Settings fixed when a machine is built.
///
/// Deserializes with every field optional:
///
/// ```rust
/// use prio_fsm::{MachineConfig, Mode};
///
/// let config: MachineConfig =
///     serde_json::from_str(r#"{ "mode": "caller-driven", "capacity": 64 }"#).unwrap();
///
/// assert_eq!(config.mode, Mode::CallerDriven);
/// assert_eq!(config.capacity, Some(64));
/// assert_eq!(config.default_priority, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Dispatch strategy
    pub mode: Mode,

    /// Maximum number of queued requests; `None` for unbounded
    pub capacity: Option<usize>,

    /// Priority of events emitted without one
    pub default_priority: i32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            capacity: None,
            default_priority: DEFAULT_PRIORITY,
        }
    }
}
