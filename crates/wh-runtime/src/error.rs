//! Runtime-subsystem error type.

use thiserror::Error;

use wh_world::WorldError;

/// Errors produced while decoding or executing viewer commands.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("malformed command: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    World(#[from] WorldError),

    /// A shipment command arrived while a top-level task is still running.
    #[error("a top-level task is already running")]
    TaskSlotBusy,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
