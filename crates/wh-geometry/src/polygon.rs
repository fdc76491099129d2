//! Closed polygons used as collision footprints.
//!
//! A `Polygon` stores vertices in local (entity-relative) ground-plane
//! coordinates; every query takes the entity's current ground position as
//! the `origin` translation.  The polygon is implicitly closed (last vertex
//! connects back to the first).

use crate::planar::{Segment2, Vec2};

/// A closed polygon in local coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Build a polygon from at least three vertices.
    ///
    /// # Panics
    /// Panics if fewer than three vertices are supplied — a footprint with
    /// no area cannot intersect anything.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        assert!(vertices.len() >= 3, "polygon needs at least 3 vertices");
        Self { vertices }
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new(vec![
            Vec2::new(min.x, min.y),
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
            Vec2::new(max.x, min.y),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// The polygon's boundary segments placed at `origin`.
    pub fn segments_at(&self, origin: Vec2) -> Vec<Segment2> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                Segment2::new(
                    self.vertices[i] + origin,
                    self.vertices[(i + 1) % n] + origin,
                )
            })
            .collect()
    }

    /// Boundary segments placed at `origin` and shifted by `offset`.
    pub fn segments_translated(&self, origin: Vec2, offset: Vec2) -> Vec<Segment2> {
        self.segments_at(origin + offset)
    }

    /// The axis-aligned bounding rectangle covering this polygon at `origin`
    /// together with its copy translated by `offset`, as four segments.
    ///
    /// This is the swept-area approximation used for predictive collision
    /// trails: cheap, conservative, and independent of the travel angle.
    pub fn swept_bounds(&self, origin: Vec2, offset: Vec2) -> [Segment2; 4] {
        let mut min = Vec2::new(f32::MAX, f32::MAX);
        let mut max = Vec2::new(f32::MIN, f32::MIN);

        for &v in &self.vertices {
            for corner in [v + origin, v + origin + offset] {
                min.x = min.x.min(corner.x);
                min.y = min.y.min(corner.y);
                max.x = max.x.max(corner.x);
                max.y = max.y.max(corner.y);
            }
        }

        let a = Vec2::new(min.x, min.y);
        let b = Vec2::new(min.x, max.y);
        let c = Vec2::new(max.x, max.y);
        let d = Vec2::new(max.x, min.y);

        [
            Segment2::new(a, b),
            Segment2::new(b, c),
            Segment2::new(c, d),
            Segment2::new(d, a),
        ]
    }

    /// `true` when any boundary segment of `self` at `origin` intersects any
    /// boundary segment of `other` at `other_origin`.
    pub fn intersects(&self, origin: Vec2, other: &Polygon, other_origin: Vec2) -> bool {
        let ours = self.segments_at(origin);
        let theirs = other.segments_at(other_origin);
        ours.iter().any(|s| s.intersects_any(&theirs))
    }
}
