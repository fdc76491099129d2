//! `wh-entity` — the capability structs entities are composed from.
//!
//! Rather than a deep "movable, then routable, then collidable" type
//! hierarchy, each capability is an independent struct and a concrete
//! entity (Robot, Truck, …) owns exactly the ones it needs:
//!
//! | Module        | Capability                                              |
//! |---------------|---------------------------------------------------------|
//! | [`core`]      | identity, pose, dirty flag, two-phase discard           |
//! | [`kinematics`]| acceleration, braking distance, turn-before-move        |
//! | [`route`]     | waypoint following and direct targets                   |
//! | [`footprint`] | collision polygon and the predictive trail              |
//! | [`cargo`]     | cargo-slot reservation/occupancy protocol               |
//! | [`occupancy`] | single-occupant lock (one robot inside a truck)         |
//! | [`motion`]    | the per-tick advance combining the four movement parts  |

pub mod cargo;
pub mod core;
pub mod footprint;
pub mod kinematics;
pub mod motion;
pub mod occupancy;
pub mod route;

#[cfg(test)]
mod tests;

pub use cargo::CargoSlot;
pub use self::core::{EntityCore, EntityKind};
pub use footprint::{Footprint, TRAIL_MARGIN};
pub use kinematics::{Kinematics, StepOutcome};
pub use motion::advance;
pub use occupancy::OccupancyLock;
pub use route::RouteFollower;
