//! World-space vector type and conventions.
//!
//! The simulation floor is the X/Z plane with +Y up.  Rotations that matter
//! to movement are yaw rotations about +Y; an entity's heading is derived
//! from its yaw via [`Vec3::yaw_direction`].
//!
//! `Vec3` uses `f32` throughout.  Waypoint arrival snaps positions exactly
//! onto their targets, so positions reached by movement compare bitwise
//! equal to the waypoint that produced them; `PartialEq` is therefore the
//! intended way to test "has arrived".

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point or direction in simulation space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the direction of `self`, or `ZERO` for the zero vector.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len == 0.0 { Vec3::ZERO } else { self * (1.0 / len) }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Rotate about the +Y axis by `radians`.
    ///
    /// `(0, 0, 1).rotate_y(θ)` lands at `(sin θ, 0, cos θ)`, so positive
    /// angles swing +Z toward +X.
    pub fn rotate_y(self, radians: f32) -> Vec3 {
        let (sin, cos) = radians.sin_cos();
        Vec3 {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Heading unit vector for a yaw angle: `(sin yaw, 0, cos yaw)`.
    ///
    /// Yaw 0 faces +Z; this is the forward vector used by the kinematics
    /// turn-before-move step.
    #[inline]
    pub fn yaw_direction(yaw: f32) -> Vec3 {
        let (sin, cos) = yaw.sin_cos();
        Vec3 { x: sin, y: 0.0, z: cos }
    }

    /// Componentwise clamp of `self` between `min(a,b)` and `max(a,b)`.
    ///
    /// Used by route widening to keep a combined lane offset inside the band
    /// spanned by its two adjacent edges' offsets.
    pub fn clamp_between(self, a: Vec3, b: Vec3) -> Vec3 {
        Vec3 {
            x: self.x.clamp(a.x.min(b.x), a.x.max(b.x)),
            y: self.y.clamp(a.y.min(b.y), a.y.max(b.y)),
            z: self.z.clamp(a.z.min(b.z), a.z.max(b.z)),
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
