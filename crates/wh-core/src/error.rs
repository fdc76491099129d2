//! Framework error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `WorldError`,
//! `RuntimeError`) and either convert into `CoreError` via `From` impls or
//! wrap it as one variant.  Both patterns are acceptable; prefer whichever
//! keeps error sites clean.

use thiserror::Error;

use crate::{EntityId, NodeId};

/// The top-level error type for `wh-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `wh-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
