//! Acceleration, braking, and the turn-before-move rule.
//!
//! All quantities are in per-tick units — configuration converts from
//! per-second values once, at construction.  A mover must face its target
//! before it accelerates: while the heading error exceeds a small epsilon
//! the velocity is pinned to zero and only the yaw changes.

use std::f32::consts::FRAC_PI_2;

use wh_core::Vec3;

use crate::EntityCore;

/// Heading-alignment threshold on the cross-product magnitude (≈ sin of the
/// remaining angle).
const HEADING_EPSILON: f32 = 1e-3;

/// What a kinematics step did to the entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Already at the target, or braked down to a standstill.
    Idle,
    /// Still rotating toward the target; no displacement this tick.
    Turning,
    /// Displaced toward the target.
    Moving,
    /// Snapped onto the target this tick.
    Arrived,
}

/// Velocity state and movement limits for a mobile entity.
#[derive(Clone, Debug)]
pub struct Kinematics {
    /// Top speed, units per tick.
    pub max_speed: f32,
    /// Velocity change per tick, both for speeding up and braking.
    pub acceleration: f32,
    /// Maximum yaw change per tick, radians.
    pub rotation_speed: f32,
    velocity: f32,
}

impl Kinematics {
    pub fn new(max_speed: f32, acceleration: f32, rotation_speed: f32) -> Self {
        Self { max_speed, acceleration, rotation_speed, velocity: 0.0 }
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Hard stop — used by the collision rollback.
    pub fn halt(&mut self) {
        self.velocity = 0.0;
    }

    /// Ticks needed to brake to a standstill, assuming linear deceleration.
    pub fn ticks_to_full_stop(&self) -> u32 {
        if self.acceleration <= 0.0 {
            return 0;
        }
        (self.velocity / self.acceleration).ceil() as u32
    }

    /// Distance covered while braking to a standstill.
    pub fn stopping_distance(&self) -> f32 {
        self.velocity * self.ticks_to_full_stop() as f32 / 2.0
    }

    /// Advance one tick toward `target`.
    ///
    /// `brake` requests deceleration regardless of the distance (collision
    /// avoidance).  Braking is also forced whenever the remaining distance
    /// is inside the stopping distance, so movers glide onto their targets
    /// instead of overshooting.
    pub fn step(&mut self, core: &mut EntityCore, target: Vec3, brake: bool) -> StepOutcome {
        let position = core.position();
        if position == target {
            return StepOutcome::Idle;
        }

        let desired = (target - position).normalized();
        let remaining = position.distance(target);

        if brake || remaining < self.stopping_distance() {
            self.velocity = (self.velocity - self.acceleration).max(0.0);
        } else {
            if self.rotation_speed > 0.0 && !self.turn_toward(core, desired) {
                self.velocity = 0.0;
                return StepOutcome::Turning;
            }
            self.velocity = (self.velocity + self.acceleration).min(self.max_speed);
        }

        if self.velocity <= 0.0 {
            return StepOutcome::Idle;
        }

        if self.velocity >= remaining {
            core.move_to(target);
            StepOutcome::Arrived
        } else {
            core.move_to(position + desired * self.velocity);
            StepOutcome::Moving
        }
    }

    /// Rotate toward `desired` by at most `rotation_speed`.  Returns `true`
    /// once the heading is aligned.
    fn turn_toward(&self, core: &mut EntityCore, desired: Vec3) -> bool {
        let forward = core.forward();
        // Signed sine of the remaining angle; positive turns increase yaw.
        let error = forward.cross(desired).y;
        let facing_away = forward.dot(desired) < 0.0;

        if error.abs() <= HEADING_EPSILON && !facing_away {
            return true;
        }

        let turn = if error.abs() <= HEADING_EPSILON {
            // Antiparallel: the cross product vanishes, so pick a full-rate
            // turn to break the symmetry.
            self.rotation_speed
        } else {
            (error * FRAC_PI_2).clamp(-self.rotation_speed, self.rotation_speed)
        };

        core.set_yaw(core.yaw() + turn);
        false
    }
}
