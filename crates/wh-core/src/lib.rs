//! `wh-core` — foundational types for the `rust_wh` warehouse simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It intentionally
//! has no `wh-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`ids`]   | `EntityId`, `NodeId`, `EdgeId`, `ViewerId`      |
//! | [`vec`]   | `Vec3` and its world-space conventions          |
//! | [`time`]  | `Tick`, `TickClock`, `SimConfig`                |
//! | [`error`] | `CoreError`, `CoreResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |
//!           | Required by `wh-runtime`.                           |

pub mod error;
pub mod ids;
pub mod time;
pub mod vec;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, EntityId, NodeId, ViewerId};
pub use time::{SimConfig, Tick, TickClock};
pub use vec::Vec3;
