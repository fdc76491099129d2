//! 3-D line segments and point projection.

use wh_core::Vec3;

/// A directed line segment between two points in simulation space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub p: Vec3,
    pub q: Vec3,
}

impl Segment {
    #[inline]
    pub fn new(p: Vec3, q: Vec3) -> Self {
        Self { p, q }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.p.distance(self.q)
    }

    /// Unit vector from `p` toward `q` (`ZERO` for a degenerate segment).
    #[inline]
    pub fn direction(self) -> Vec3 {
        (self.q - self.p).normalized()
    }

    /// The point on this segment nearest to `point`.
    ///
    /// Projects `point` onto the carrier line and clamps the projection
    /// parameter to `[0, length]`, so the result always lies between the
    /// endpoints.  This is the primitive behind implied graph nodes: a
    /// position "lies on" an edge exactly when its nearest point is itself.
    pub fn nearest_point(self, point: Vec3) -> Vec3 {
        let direction = self.direction();
        let along = (point - self.p).dot(direction).clamp(0.0, self.length());
        self.p + direction * along
    }
}
