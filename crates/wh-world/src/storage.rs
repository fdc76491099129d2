//! Storage plots: fixed slot grids on the warehouse floor.

use wh_core::{EntityId, Vec3};
use wh_entity::{CargoSlot, EntityCore, EntityKind};

/// A `width × length` grid of cargo slots centred on the plot position,
/// one slot per floor cell.
pub struct StoragePlot {
    core: EntityCore,
    width: u32,
    length: u32,
    slots: Vec<CargoSlot>,
}

impl StoragePlot {
    pub fn new(id: EntityId, position: Vec3, width: u32, length: u32) -> Self {
        let start_x = -(width as f32) / 2.0 + 0.5;
        let start_z = -(length as f32) / 2.0 + 0.5;

        let mut slots = Vec::with_capacity((width * length) as usize);
        for x in 0..width {
            for z in 0..length {
                slots.push(CargoSlot::new(Vec3::new(
                    start_x + x as f32,
                    0.0,
                    start_z + z as f32,
                )));
            }
        }

        Self {
            core: EntityCore::new(id, EntityKind::Storage, position),
            width,
            length,
            slots,
        }
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn slots(&self) -> &[CargoSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&CargoSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut CargoSlot> {
        self.slots.get_mut(index)
    }

    pub fn free_slot_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_available())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn occupied_slot_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_occupied())
            .map(|(i, _)| i)
            .collect()
    }
}
