//! World-subsystem error type.

use thiserror::Error;

use wh_core::EntityId;
use wh_graph::GraphError;

/// Errors produced by `wh-world` operations.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {0} not found in the live set")]
    EntityNotFound(EntityId),

    #[error("no idle robot available")]
    NoIdleRobot,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type WorldResult<T> = Result<T, WorldError>;
