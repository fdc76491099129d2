//! Entity identity, pose, and lifecycle flags.

use uuid::Uuid;

use wh_core::{EntityId, Vec3};
use wh_geometry::Vec2;

/// What an entity is, as shown to viewers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Robot,
    Truck,
    Shelf,
    Storage,
}

impl EntityKind {
    /// The model name the rendering client keys its assets by.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Robot => "robot",
            EntityKind::Truck => "truck",
            EntityKind::Shelf => "shelf",
            EntityKind::Storage => "storage",
        }
    }
}

/// Identity and pose shared by every entity.
///
/// Any pose mutation sets the `dirty` flag; the world clears it once the
/// change has been broadcast.  Deletion is two-phase: `destroy` only marks
/// the entity, and the world removes it after the discard has been
/// broadcast too.
#[derive(Clone, Debug)]
pub struct EntityCore {
    id: EntityId,
    guid: Uuid,
    kind: EntityKind,
    position: Vec3,
    rotation: Vec3,
    dirty: bool,
    discard: bool,
}

impl EntityCore {
    /// Entities start dirty so their first broadcast announces the creation.
    pub fn new(id: EntityId, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id,
            guid: Uuid::new_v4(),
            kind,
            position,
            rotation: Vec3::ZERO,
            dirty: true,
            discard: false,
        }
    }

    // ── Identity ──────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    // ── Pose ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Yaw angle (rotation about +Y) in radians.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Heading unit vector derived from the yaw.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::yaw_direction(self.yaw())
    }

    /// Position dropped onto the ground plane, for collision queries.
    #[inline]
    pub fn ground(&self) -> Vec2 {
        Vec2::from_ground(self.position)
    }

    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn rotate_to(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation.y = yaw;
        self.dirty = true;
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the latest state as broadcast.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Force a broadcast even without a pose change (door state, …).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Request discard.  The entity stays in the live set until the world
    /// has broadcast the discard to every observer.
    pub fn destroy(&mut self) {
        self.discard = true;
    }

    #[inline]
    pub fn discard_requested(&self) -> bool {
        self.discard
    }
}
