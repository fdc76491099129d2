//! The delivery truck: a collidable mover carrying a 3×10 slot grid in its
//! trailer, a rear door, and a single-robot occupancy lock.

use wh_core::{EntityId, Vec3};
use wh_entity::{
    advance, CargoSlot, EntityCore, EntityKind, Footprint, Kinematics, OccupancyLock,
    RouteFollower,
};
use wh_geometry::Segment2;

pub struct Truck {
    core: EntityCore,
    kinematics: Kinematics,
    route: RouteFollower,
    footprint: Footprint,
    slots: Vec<CargoSlot>,
    occupancy: OccupancyLock,
    door_open: bool,
}

impl Truck {
    pub fn new(id: EntityId, position: Vec3, kinematics: Kinematics) -> Self {
        // Trailer bed: 3 columns × 10 rows behind the cab, one unit apart,
        // raised to loading height.
        let mut slots = Vec::with_capacity(30);
        for z in -13..-3 {
            for x in -1..2 {
                slots.push(CargoSlot::new(Vec3::new(x as f32, 1.5, z as f32)));
            }
        }

        Self {
            core: EntityCore::new(id, EntityKind::Truck, position),
            kinematics,
            route: RouteFollower::new(),
            footprint: Footprint::truck(),
            slots,
            occupancy: OccupancyLock::new(),
            door_open: false,
        }
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn route(&self) -> &RouteFollower {
        &self.route
    }

    pub fn route_mut(&mut self) -> &mut RouteFollower {
        &mut self.route
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn is_at_destination(&self) -> bool {
        self.route.is_at_destination(self.core.position())
    }

    // ── Cargo slots ───────────────────────────────────────────────────────

    pub fn slots(&self) -> &[CargoSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&CargoSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut CargoSlot> {
        self.slots.get_mut(index)
    }

    /// Indices of slots free for new cargo (neither occupied nor reserved).
    pub fn free_slot_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_available())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of slots physically holding cargo.
    pub fn occupied_slot_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_occupied())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_free_slots(&self) -> bool {
        self.slots.iter().any(|s| s.is_available())
    }

    // ── Door & occupancy ──────────────────────────────────────────────────

    pub fn door_open(&self) -> bool {
        self.door_open
    }

    /// Open or close the rear door (broadcast to viewers on change).
    pub fn set_door_open(&mut self, open: bool) {
        if self.door_open != open {
            self.door_open = open;
            self.core.mark_dirty();
        }
    }

    pub fn occupancy(&self) -> &OccupancyLock {
        &self.occupancy
    }

    pub fn occupancy_mut(&mut self) -> &mut OccupancyLock {
        &mut self.occupancy
    }

    pub fn is_occupied(&self) -> bool {
        self.occupancy.is_held()
    }

    // ── Movement ──────────────────────────────────────────────────────────

    pub(crate) fn advance(&mut self, obstacles: &[Vec<Segment2>]) {
        advance(
            &mut self.core,
            &mut self.kinematics,
            &mut self.route,
            &self.footprint,
            obstacles,
        );
    }
}
