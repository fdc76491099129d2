//! `wh-task` — the library of concrete task state machines.
//!
//! Each task is a private state enum advanced once per tick.  Transitions
//! fire when their condition holds and otherwise leave the state unchanged,
//! so waiting (for arrival, for a truck lock, for sub-tasks) is simply "the
//! condition wasn't true this tick".
//!
//! | Module       | Task                        | Target | Purpose                          |
//! |--------------|-----------------------------|--------|----------------------------------|
//! | [`pathfinder`]| `PathfinderTask`           | Robot  | drive to a position and stop     |
//! | [`unload`]   | `RobotUnloadTruckTask`      | Robot  | truck slot → storage slot        |
//! | [`load`]     | `RobotLoadTruckTask`        | Robot  | storage slot → truck slot        |
//! | [`receive`]  | `ReceiveShipmentTask`       | World  | spawn truck, unload it, despawn  |
//! | [`send`]     | `SendShipmentTask`          | World  | spawn truck, load it, despawn    |

pub mod load;
pub mod pathfinder;
pub mod receive;
pub mod send;
pub mod unload;

#[cfg(test)]
mod tests;

pub use load::RobotLoadTruckTask;
pub use pathfinder::PathfinderTask;
pub use receive::ReceiveShipmentTask;
pub use send::SendShipmentTask;
pub use unload::RobotUnloadTruckTask;
