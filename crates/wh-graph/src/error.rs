//! Graph-subsystem error type.

use thiserror::Error;

use wh_core::Vec3;

/// Errors produced by `wh-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The path source is neither a stored node nor a point on any edge.
    /// This is a caller contract violation, not a retryable condition:
    /// agents must stand on (or be snapped to) the graph before routing.
    #[error("path source {0} is neither defined nor implied by the graph")]
    UnknownSource(Vec3),

    /// No connected route exists between the two positions.
    #[error("no path from {from} to {to}")]
    NoPath { from: Vec3, to: Vec3 },

    /// The graph has no edges to project onto.
    #[error("graph has no edges")]
    Empty,
}

pub type GraphResult<T> = Result<T, GraphError>;
