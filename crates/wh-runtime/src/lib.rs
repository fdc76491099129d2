//! `wh-runtime` — the loop that makes the world tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`scheduler`] | fixed-cadence tick loop, command execution              |
//! | [`viewer`]    | per-viewer inbound/outbound queues (mutex-guarded)      |
//! | [`protocol`]  | typed wire envelopes (JSON command decoding/encoding)   |
//! | [`metrics`]   | per-tick workload ring buffers                          |
//! | [`error`]     | `RuntimeError`, `RuntimeResult<T>`                      |
//!
//! # Threading model
//!
//! The scheduler thread is the only mutator of `World`.  Each remote viewer
//! owns a pair of mutex-guarded queues shared with its transport thread:
//! the transport pushes decoded commands in and drains entity deltas out;
//! the scheduler does the reverse, between ticks.  Socket I/O itself lives
//! outside this crate — transports hand the queues already-typed values,
//! with [`protocol::decode`] available at that boundary.

pub mod error;
pub mod metrics;
pub mod protocol;
pub mod scheduler;
pub mod viewer;

#[cfg(test)]
mod tests;

pub use error::{RuntimeError, RuntimeResult};
pub use metrics::TickMetrics;
pub use protocol::{ClientCommand, DiscardModel3D, ServerCommand, ServerEnvelope, UpdateModel3D};
pub use scheduler::{execute_command, Scheduler};
pub use viewer::Viewer;
