//! Collision footprints and predictive trails.

use wh_geometry::{Polygon, Segment2, Vec2};

use crate::EntityCore;

/// Extra clearance added to the braking distance when projecting the trail,
/// in world units.
pub const TRAIL_MARGIN: f32 = 0.5;

/// A collidable entity's ground-plane outline.
///
/// The polygon is axis-aligned in entity-local coordinates and only
/// translated by the entity position — footprints are sized generously
/// enough that yaw is irrelevant to the safety argument.
#[derive(Clone, Debug)]
pub struct Footprint {
    polygon: Polygon,
}

impl Footprint {
    pub fn new(polygon: Polygon) -> Self {
        Self { polygon }
    }

    /// The square robot chassis.
    pub fn robot() -> Self {
        Self::new(Polygon::rect(Vec2::new(-0.4, -0.4), Vec2::new(0.4, 0.4)))
    }

    /// Cab plus trailer; the trailer extends behind the truck origin, which
    /// is also where its cargo-slot grid sits.
    pub fn truck() -> Self {
        Self::new(Polygon::rect(Vec2::new(-1.75, -14.0), Vec2::new(1.75, 4.0)))
    }

    /// Boundary segments at the entity's current position.
    pub fn segments(&self, core: &EntityCore) -> Vec<Segment2> {
        self.polygon.segments_at(core.ground())
    }

    /// The predictive trail: current boundary segments plus the bounding
    /// rectangle swept by travelling `lookahead` units along the heading.
    ///
    /// Any other footprint intersecting this set forces a braking tick.
    pub fn trail(&self, core: &EntityCore, lookahead: f32) -> Vec<Segment2> {
        let mut segments = self.segments(core);
        let ahead = core.forward() * lookahead;
        segments.extend(
            self.polygon
                .swept_bounds(core.ground(), Vec2::from_ground(ahead)),
        );
        segments
    }

    /// `true` when this footprint at the entity's position touches any of
    /// `obstacles`.
    pub fn overlaps(&self, core: &EntityCore, obstacles: &[Segment2]) -> bool {
        self.segments(core)
            .iter()
            .any(|s| s.intersects_any(obstacles))
    }
}
