//! The warehouse robot: a collidable mover with one cargo slot and a FIFO
//! task queue.

use std::collections::VecDeque;

use wh_core::{EntityId, Vec3};
use wh_entity::{
    advance, CargoSlot, EntityCore, EntityKind, Footprint, Kinematics, RouteFollower,
};
use wh_geometry::Segment2;

use crate::RobotTask;

pub struct Robot {
    core: EntityCore,
    kinematics: Kinematics,
    route: RouteFollower,
    footprint: Footprint,
    slot: CargoSlot,
    tasks: VecDeque<Box<dyn RobotTask>>,
    /// Where the robot returns between jobs — its spawn bay.
    idle_position: Vec3,
}

impl Robot {
    pub fn new(id: EntityId, position: Vec3, kinematics: Kinematics) -> Self {
        Self {
            core: EntityCore::new(id, EntityKind::Robot, position),
            kinematics,
            route: RouteFollower::new(),
            footprint: Footprint::robot(),
            slot: CargoSlot::new(Vec3::ZERO),
            tasks: VecDeque::new(),
            idle_position: position,
        }
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn route(&self) -> &RouteFollower {
        &self.route
    }

    pub fn route_mut(&mut self) -> &mut RouteFollower {
        &mut self.route
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn slot(&self) -> &CargoSlot {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut CargoSlot {
        &mut self.slot
    }

    pub fn idle_position(&self) -> Vec3 {
        self.idle_position
    }

    pub fn is_at_destination(&self) -> bool {
        self.route.is_at_destination(self.core.position())
    }

    // ── Tasks ─────────────────────────────────────────────────────────────

    /// `true` when no task is queued — the robot can take a new job.
    pub fn is_standby(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn assign_task(&mut self, task: Box<dyn RobotTask>) {
        self.tasks.push_back(task);
    }

    /// Take the front task out for ticking (put it back if still running).
    pub(crate) fn take_front_task(&mut self) -> Option<Box<dyn RobotTask>> {
        self.tasks.pop_front()
    }

    pub(crate) fn put_front_task(&mut self, task: Box<dyn RobotTask>) {
        self.tasks.push_front(task);
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Advance one tick against the given obstacle set.
    pub(crate) fn advance(&mut self, obstacles: &[Vec<Segment2>]) {
        advance(
            &mut self.core,
            &mut self.kinematics,
            &mut self.route,
            &self.footprint,
            obstacles,
        );
    }
}
