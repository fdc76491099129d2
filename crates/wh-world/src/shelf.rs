//! The cargo unit moved between trucks and storage.
//!
//! A shelf never moves itself: whichever cargo slot holds it repositions it
//! every tick, and between carriers it simply sits where it was put down.

use wh_core::{EntityId, Vec3};
use wh_entity::{EntityCore, EntityKind};

pub struct Shelf {
    core: EntityCore,
}

impl Shelf {
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self { core: EntityCore::new(id, EntityKind::Shelf, position) }
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}
