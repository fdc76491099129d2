//! The per-tick advance of a collidable mover.
//!
//! Combines route following, kinematics, and collision avoidance in the
//! order the engine guarantees: predictive braking first (trail check),
//! then the kinematic step, then the hard-stop overlap rollback as the last
//! resort.  The world gathers `obstacles` — every *other* collidable's
//! footprint segments — before calling in, so this function needs no world
//! access of its own.

use wh_geometry::Segment2;

use crate::{
    footprint::TRAIL_MARGIN, EntityCore, Footprint, Kinematics, RouteFollower, StepOutcome,
};

/// Advance a mover one tick toward its current waypoint.
///
/// Returns `true` when the entity displaced (or rotated) this tick.
pub fn advance(
    core: &mut EntityCore,
    kinematics: &mut Kinematics,
    route: &mut RouteFollower,
    footprint: &Footprint,
    obstacles: &[Vec<Segment2>],
) -> bool {
    let Some(mut target) = route.current_target() else {
        return false;
    };
    if core.position() == target {
        // Routes may begin on the mover's own position; skip such waypoints
        // so the follower never stalls on a zero-length leg.
        if route.is_at_destination(core.position()) {
            return false;
        }
        route.waypoint_reached();
        match route.current_target() {
            Some(next) if next != core.position() => target = next,
            _ => return false,
        }
    }

    // Predictive avoidance: brake when the trail ahead touches anyone.
    let lookahead = kinematics.stopping_distance() + TRAIL_MARGIN;
    let trail = footprint.trail(core, lookahead);
    let obstructed = obstacles
        .iter()
        .any(|other| trail.iter().any(|s| s.intersects_any(other)));

    let before = core.position();
    let outcome = kinematics.step(core, target, obstructed);

    match outcome {
        StepOutcome::Moving | StepOutcome::Arrived => {
            // Last resort: a move that lands overlapping another footprint
            // is rejected outright.
            let overlapping = obstacles
                .iter()
                .any(|other| footprint.overlaps(core, other));
            if overlapping {
                core.move_to(before);
                kinematics.halt();
                return true;
            }
            if outcome == StepOutcome::Arrived {
                route.waypoint_reached();
            }
            true
        }
        StepOutcome::Turning => true,
        StepOutcome::Idle => false,
    }
}
