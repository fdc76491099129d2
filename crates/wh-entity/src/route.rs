//! Waypoint routes and direct movement targets.
//!
//! A mover is always doing one of three things: nothing (no target), a
//! direct move (`set_target`, used for the short precise legs inside trucks
//! and storage plots), or following a planned waypoint route (`set_route`).
//! The follower only tracks positions — route *planning* lives in
//! `wh-graph`, and the per-tick displacement in [`crate::motion`].

use wh_core::Vec3;

/// Current movement goal of a mobile entity.
#[derive(Clone, Debug, Default)]
pub struct RouteFollower {
    route: Vec<Vec3>,
    next: usize,
    target: Option<Vec3>,
}

impl RouteFollower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `waypoints` in order.  An empty route clears the target.
    pub fn set_route(&mut self, waypoints: Vec<Vec3>) {
        self.route = waypoints;
        self.next = 0;
        self.target = self.route.first().copied();
    }

    /// Head straight for `position`, dropping any waypoint route.
    pub fn set_target(&mut self, position: Vec3) {
        self.route.clear();
        self.next = 0;
        self.target = Some(position);
    }

    pub fn clear(&mut self) {
        self.route.clear();
        self.next = 0;
        self.target = None;
    }

    /// The waypoint (or direct target) currently steered for.
    #[inline]
    pub fn current_target(&self) -> Option<Vec3> {
        self.target
    }

    /// The final goal: the route's last waypoint, or the direct target.
    pub fn destination(&self) -> Option<Vec3> {
        self.route.last().copied().or(self.target)
    }

    /// `true` when `position` is the final goal (or there is none).
    pub fn is_at_destination(&self, position: Vec3) -> bool {
        self.destination().is_none_or(|d| d == position)
    }

    /// Advance to the next waypoint after arriving on the current one.
    ///
    /// Consuming the last waypoint clears the route but keeps it as the
    /// direct target, so `is_at_destination` stays true afterwards.
    pub fn waypoint_reached(&mut self) {
        if self.route.is_empty() {
            return;
        }
        self.next += 1;
        if self.next < self.route.len() {
            self.target = Some(self.route[self.next]);
        } else {
            self.target = self.route.last().copied();
            self.route.clear();
            self.next = 0;
        }
    }
}
