//! `wh-world` — the warehouse itself.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`robot`]   | `Robot` — collidable carrier with a FIFO task queue       |
//! | [`truck`]   | `Truck` — 30-slot carrier with door and occupancy lock    |
//! | [`shelf`]   | `Shelf` — the cargo unit                                  |
//! | [`storage`] | `StoragePlot` — slot grid on the warehouse floor          |
//! | [`task`]    | `RobotTask`/`WorldTask` traits and shared bookkeeping     |
//! | [`layout`]  | road graphs, reference points, speed table                |
//! | [`world`]   | the `World` aggregate: arena, tick, collisions, deltas    |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                            |
//!
//! # Tick order
//!
//! Within one `World::tick`: the active world task first, then every live
//! entity in id (= creation) order.  Robots tick their front task, then
//! move, then drag their slot cargo along; trucks move and drag cargo.  All
//! mutation happens on the scheduler thread — the world is plain `&mut`
//! state with no interior locking.

pub mod error;
pub mod layout;
pub mod robot;
pub mod shelf;
pub mod storage;
pub mod task;
pub mod truck;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use layout::{Layout, PointsOfInterest};
pub use robot::Robot;
pub use shelf::Shelf;
pub use storage::StoragePlot;
pub use task::{RobotTask, TaskCore, TaskStatus, WorldTask};
pub use truck::Truck;
pub use world::{EntityDelta, SlotRef, World, WorldEntity};
