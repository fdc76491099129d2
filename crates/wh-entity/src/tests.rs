//! Unit tests for wh-entity.

#[cfg(test)]
mod helpers {
    use wh_core::{EntityId, Vec3};

    use crate::{EntityCore, EntityKind, Kinematics};

    pub fn robot_core(position: Vec3) -> EntityCore {
        EntityCore::new(EntityId(0), EntityKind::Robot, position)
    }

    /// Snappy test kinematics: top speed 0.5, accel 0.25, quarter-rad turns.
    pub fn test_kinematics() -> Kinematics {
        Kinematics::new(0.5, 0.25, 0.25)
    }
}

#[cfg(test)]
mod core {
    use wh_core::Vec3;

    use super::helpers::robot_core;

    #[test]
    fn entities_start_dirty() {
        let core = robot_core(Vec3::ZERO);
        assert!(core.is_dirty());
    }

    #[test]
    fn mutation_sets_dirty() {
        let mut core = robot_core(Vec3::ZERO);
        core.clear_dirty();
        core.move_to(Vec3::new(1.0, 0.0, 0.0));
        assert!(core.is_dirty());

        core.clear_dirty();
        core.set_yaw(1.0);
        assert!(core.is_dirty());
    }

    #[test]
    fn destroy_is_a_flag_not_a_removal() {
        let mut core = robot_core(Vec3::ZERO);
        assert!(!core.discard_requested());
        core.destroy();
        assert!(core.discard_requested());
    }

    #[test]
    fn forward_follows_yaw() {
        let mut core = robot_core(Vec3::ZERO);
        assert_eq!(core.forward(), Vec3::new(0.0, 0.0, 1.0));
        core.set_yaw(std::f32::consts::FRAC_PI_2);
        assert!((core.forward() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }
}

#[cfg(test)]
mod kinematics {
    use wh_core::Vec3;

    use super::helpers::{robot_core, test_kinematics};
    use crate::StepOutcome;

    #[test]
    fn at_target_is_idle() {
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        assert_eq!(k.step(&mut core, Vec3::ZERO, false), StepOutcome::Idle);
    }

    #[test]
    fn turns_before_moving() {
        // Facing +Z, target along +X: the first ticks only rotate.
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        let target = Vec3::new(10.0, 0.0, 0.0);

        let outcome = k.step(&mut core, target, false);
        assert_eq!(outcome, StepOutcome::Turning);
        assert_eq!(core.position(), Vec3::ZERO);
        assert_eq!(k.velocity(), 0.0);
        assert!(core.yaw() > 0.0);
    }

    #[test]
    fn moves_once_aligned() {
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        let target = Vec3::new(10.0, 0.0, 0.0);

        let mut moved = false;
        for _ in 0..40 {
            if k.step(&mut core, target, false) == StepOutcome::Moving {
                moved = true;
                break;
            }
        }
        assert!(moved, "mover never aligned with its target");
        assert!((core.yaw() - std::f32::consts::FRAC_PI_2).abs() < 0.01);
        assert!(core.position().x > 0.0);
    }

    #[test]
    fn accelerates_to_max_speed() {
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        let target = Vec3::new(0.0, 0.0, 100.0); // straight ahead

        k.step(&mut core, target, false);
        assert_eq!(k.velocity(), 0.25);
        k.step(&mut core, target, false);
        assert_eq!(k.velocity(), 0.5);
        k.step(&mut core, target, false);
        assert_eq!(k.velocity(), 0.5, "velocity must cap at max_speed");
    }

    #[test]
    fn braking_decelerates_to_zero() {
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        let target = Vec3::new(0.0, 0.0, 100.0);

        k.step(&mut core, target, false);
        k.step(&mut core, target, false);
        assert_eq!(k.velocity(), 0.5);

        k.step(&mut core, target, true);
        assert_eq!(k.velocity(), 0.25);
        let outcome = k.step(&mut core, target, true);
        assert_eq!(k.velocity(), 0.0);
        assert_eq!(outcome, StepOutcome::Idle);
    }

    #[test]
    fn snaps_onto_close_targets() {
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        let target = Vec3::new(0.0, 0.0, 0.2);

        let outcome = k.step(&mut core, target, false);
        assert_eq!(outcome, StepOutcome::Arrived);
        assert_eq!(core.position(), target);
    }

    #[test]
    fn stopping_distance_formula() {
        let mut core = robot_core(Vec3::ZERO);
        let mut k = test_kinematics();
        let target = Vec3::new(0.0, 0.0, 100.0);
        k.step(&mut core, target, false);
        k.step(&mut core, target, false);

        // v = 0.5, a = 0.25 → 2 ticks to stop → 0.5 * 2 / 2 = 0.5 units.
        assert_eq!(k.ticks_to_full_stop(), 2);
        assert_eq!(k.stopping_distance(), 0.5);
    }
}

#[cfg(test)]
mod route {
    use wh_core::Vec3;

    use crate::RouteFollower;

    #[test]
    fn follows_waypoints_in_order() {
        let mut r = RouteFollower::new();
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        r.set_route(vec![a, b]);

        assert_eq!(r.current_target(), Some(a));
        assert_eq!(r.destination(), Some(b));

        r.waypoint_reached();
        assert_eq!(r.current_target(), Some(b));

        r.waypoint_reached();
        assert_eq!(r.current_target(), Some(b), "final waypoint stays as target");
        assert!(r.is_at_destination(b));
    }

    #[test]
    fn direct_target_replaces_route() {
        let mut r = RouteFollower::new();
        r.set_route(vec![Vec3::new(1.0, 0.0, 0.0)]);
        let direct = Vec3::new(5.0, 0.0, 5.0);
        r.set_target(direct);
        assert_eq!(r.current_target(), Some(direct));
        assert_eq!(r.destination(), Some(direct));
    }

    #[test]
    fn no_target_means_arrived() {
        let r = RouteFollower::new();
        assert!(r.is_at_destination(Vec3::ZERO));
    }
}

#[cfg(test)]
mod cargo {
    use std::f32::consts::FRAC_PI_2;

    use wh_core::{EntityId, Vec3};

    use crate::CargoSlot;

    const SHELF: EntityId = EntityId(10);
    const OTHER: EntityId = EntityId(11);

    #[test]
    fn set_then_release_roundtrips() {
        let mut slot = CargoSlot::new(Vec3::ZERO);
        assert!(slot.set_cargo(SHELF));
        assert!(slot.is_occupied());

        assert_eq!(slot.release_cargo(), Some(SHELF));
        assert!(slot.is_available(), "slot must return to Empty");
    }

    #[test]
    fn reservation_excludes_other_cargo() {
        let mut slot = CargoSlot::new(Vec3::ZERO);
        assert!(slot.reserve_for(SHELF));

        assert!(!slot.reserve_for(OTHER));
        assert_eq!(slot.reservation(), Some(SHELF), "original reservation intact");

        assert!(!slot.set_cargo(OTHER));
        assert!(slot.set_cargo(SHELF));
    }

    #[test]
    fn occupied_slot_rejects_everything() {
        let mut slot = CargoSlot::new(Vec3::ZERO);
        slot.set_cargo(SHELF);
        assert!(!slot.reserve_for(OTHER));
        assert!(!slot.set_cargo(OTHER));
        assert!(!slot.cancel_reservation());
    }

    #[test]
    fn cancel_returns_to_empty() {
        let mut slot = CargoSlot::new(Vec3::ZERO);
        slot.reserve_for(SHELF);
        assert!(slot.cancel_reservation());
        assert!(slot.is_available());
        assert!(!slot.cancel_reservation(), "nothing left to cancel");
    }

    #[test]
    fn release_clears_matching_reservation() {
        let mut slot = CargoSlot::new(Vec3::ZERO);
        slot.reserve_for(SHELF);
        slot.set_cargo(SHELF);
        slot.release_cargo();
        assert!(!slot.is_reserved());
    }

    #[test]
    fn empty_release_is_none() {
        let mut slot = CargoSlot::new(Vec3::ZERO);
        assert_eq!(slot.release_cargo(), None);
    }

    #[test]
    fn world_position_rotates_the_offset() {
        let slot = CargoSlot::new(Vec3::new(1.0, 0.0, 0.0));
        let carrier = Vec3::new(10.0, 0.0, 0.0);
        let pos = slot.world_position(carrier, FRAC_PI_2);
        assert!((pos - Vec3::new(10.0, 0.0, -1.0)).length() < 1e-6);
    }
}

#[cfg(test)]
mod occupancy {
    use wh_core::EntityId;

    use crate::OccupancyLock;

    const R1: EntityId = EntityId(1);
    const R2: EntityId = EntityId(2);

    #[test]
    fn one_holder_at_a_time() {
        let mut lock = OccupancyLock::new();
        assert!(lock.try_acquire(R1));
        assert!(!lock.try_acquire(R2));
        assert_eq!(lock.holder(), Some(R1));
    }

    #[test]
    fn only_holder_releases() {
        let mut lock = OccupancyLock::new();
        lock.try_acquire(R1);
        assert!(!lock.release(R2));
        assert!(lock.is_held());
        assert!(lock.release(R1));
        assert!(lock.try_acquire(R2));
    }
}

#[cfg(test)]
mod motion {
    use wh_core::Vec3;
    use wh_geometry::Segment2;

    use super::helpers::{robot_core, test_kinematics};
    use crate::{advance, EntityCore, Footprint, RouteFollower};

    fn obstacle_at(position: Vec3) -> Vec<Segment2> {
        let core = robot_core(position);
        Footprint::robot().segments(&core)
    }

    fn mover_toward(target: Vec3) -> (EntityCore, RouteFollower) {
        let core = robot_core(Vec3::ZERO);
        let mut route = RouteFollower::new();
        route.set_route(vec![target]);
        (core, route)
    }

    #[test]
    fn moves_when_unobstructed() {
        let (mut core, mut route) = mover_toward(Vec3::new(0.0, 0.0, 5.0));
        let mut k = test_kinematics();
        let moved = advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[]);
        assert!(moved);
        assert!(core.position().z > 0.0);
    }

    #[test]
    fn trail_obstruction_brakes_before_contact() {
        let (mut core, mut route) = mover_toward(Vec3::new(0.0, 0.0, 5.0));
        let mut k = test_kinematics();
        let blocker = obstacle_at(Vec3::new(0.0, 0.0, 1.2));

        for _ in 0..10 {
            advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[blocker.clone()]);
        }
        assert_eq!(core.position(), Vec3::ZERO, "trail check must pin the mover");
        assert_eq!(k.velocity(), 0.0);
    }

    #[test]
    fn sidestepping_obstacles_are_ignored() {
        let (mut core, mut route) = mover_toward(Vec3::new(0.0, 0.0, 5.0));
        let mut k = test_kinematics();
        let bystander = obstacle_at(Vec3::new(4.0, 0.0, 0.0));

        let moved = advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[bystander]);
        assert!(moved);
        assert!(core.position().z > 0.0);
    }

    #[test]
    fn reaches_waypoints_and_stops() {
        let target = Vec3::new(0.0, 0.0, 2.0);
        let (mut core, mut route) = mover_toward(target);
        let mut k = test_kinematics();

        for _ in 0..50 {
            advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[]);
        }
        assert_eq!(core.position(), target);
        assert!(route.is_at_destination(core.position()));
        assert!(!advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[]));
    }

    #[test]
    fn skips_leading_waypoint_on_own_position() {
        let mut core = robot_core(Vec3::ZERO);
        let mut route = RouteFollower::new();
        route.set_route(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0)]);
        let mut k = test_kinematics();

        advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[]);
        assert_eq!(route.destination(), Some(Vec3::new(0.0, 0.0, 3.0)));
        for _ in 0..50 {
            advance(&mut core, &mut k, &mut route, &Footprint::robot(), &[]);
        }
        assert_eq!(core.position(), Vec3::new(0.0, 0.0, 3.0));
    }
}
