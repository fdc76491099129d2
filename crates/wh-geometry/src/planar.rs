//! Planar (X/Z ground plane) primitives for collision testing.
//!
//! Segment intersection follows the classic orientation-triplet method: two
//! segments cross when each straddles the carrier line of the other, with a
//! bounding-box containment check covering the colinear special cases.

use wh_core::Vec3;

// ── Vec2 ─────────────────────────────────────────────────────────────────────

/// A point on the ground plane.  `x` maps to world X, `y` to world Z.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Drop a world position onto the ground plane.
    #[inline]
    pub fn from_ground(v: Vec3) -> Self {
        Self { x: v.x, y: v.z }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ── Orientation ──────────────────────────────────────────────────────────────

/// Winding of an ordered point triplet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Colinear,
}

/// Orientation of the triplet `(p, q, r)`.
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if value == 0.0 {
        Orientation::Colinear
    } else if value > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

// ── Segment2 ─────────────────────────────────────────────────────────────────

/// A line segment on the ground plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment2 {
    pub p: Vec2,
    pub q: Vec2,
}

impl Segment2 {
    #[inline]
    pub fn new(p: Vec2, q: Vec2) -> Self {
        Self { p, q }
    }

    /// This segment translated by `offset`.
    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self { p: self.p + offset, q: self.q + offset }
    }

    /// `true` when `point` lies within this segment's bounding box.
    ///
    /// Only meaningful for points already known to be colinear with the
    /// segment; callers use it to resolve the colinear intersection cases.
    pub fn contains_colinear(self, point: Vec2) -> bool {
        point.x <= self.p.x.max(self.q.x)
            && point.x >= self.p.x.min(self.q.x)
            && point.y <= self.p.y.max(self.q.y)
            && point.y >= self.p.y.min(self.q.y)
    }

    /// Segment/segment intersection, including touching endpoints and
    /// colinear overlap.  Symmetric: `a.intersects(b) == b.intersects(a)`.
    pub fn intersects(self, other: Segment2) -> bool {
        let o1 = orientation(self.p, self.q, other.p);
        let o2 = orientation(self.p, self.q, other.q);
        let o3 = orientation(other.p, other.q, self.p);
        let o4 = orientation(other.p, other.q, self.q);

        // General case: each segment straddles the other's carrier line.
        if o1 != o2 && o3 != o4 {
            return true;
        }

        // Colinear special cases: an endpoint of one lies on the other.
        (o1 == Orientation::Colinear && self.contains_colinear(other.p))
            || (o2 == Orientation::Colinear && self.contains_colinear(other.q))
            || (o3 == Orientation::Colinear && other.contains_colinear(self.p))
            || (o4 == Orientation::Colinear && other.contains_colinear(self.q))
    }

    /// `true` when any segment of `set` intersects this one.
    pub fn intersects_any(self, set: &[Segment2]) -> bool {
        set.iter().any(|s| self.intersects(*s))
    }
}
