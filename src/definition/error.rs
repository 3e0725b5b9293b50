//! Definition error types.

use crate::builder::BuildError;
use crate::error::FsmError;
use thiserror::Error;

/// Errors that can occur while loading or applying a definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The JSON text could not be parsed or produced
    #[error("Definition parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The machine could not be constructed
    #[error("Machine build failed: {0}")]
    Build(#[from] BuildError),

    /// An event definition was rejected by the graph
    #[error("Invalid event definition: {0}")]
    Graph(#[from] FsmError),
}
