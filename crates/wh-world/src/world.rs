//! The aggregate root: entity arena, tick loop body, collision queries, and
//! the outbound delta stream.

use uuid::Uuid;

use wh_core::{EntityId, SimConfig, Vec3};
use wh_entity::{CargoSlot, EntityCore, EntityKind};
use wh_geometry::Segment2;
use wh_graph::{plan_route, Graph};

use crate::{
    Layout, Robot, Shelf, StoragePlot, TaskStatus, Truck, WorldError, WorldResult, WorldTask,
};

// ── Entity arena ──────────────────────────────────────────────────────────────

/// A live entity in the world arena.
pub enum WorldEntity {
    Robot(Robot),
    Truck(Truck),
    Shelf(Shelf),
    Storage(StoragePlot),
}

impl WorldEntity {
    pub fn core(&self) -> &EntityCore {
        match self {
            WorldEntity::Robot(r) => r.core(),
            WorldEntity::Truck(t) => t.core(),
            WorldEntity::Shelf(s) => s.core(),
            WorldEntity::Storage(p) => p.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            WorldEntity::Robot(r) => r.core_mut(),
            WorldEntity::Truck(t) => t.core_mut(),
            WorldEntity::Shelf(s) => s.core_mut(),
            WorldEntity::Storage(p) => p.core_mut(),
        }
    }
}

/// Non-owning address of one cargo slot: the carrier entity plus the slot
/// index within it (robots have a single slot at index 0).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotRef {
    pub carrier: EntityId,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(carrier: EntityId, slot: usize) -> Self {
        Self { carrier, slot }
    }
}

// ── Outbound deltas ───────────────────────────────────────────────────────────

/// One entity state change, drained once per tick per dirty entity.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityDelta {
    Update {
        guid: Uuid,
        kind: EntityKind,
        position: Vec3,
        rotation: Vec3,
        /// Truck door state; `None` for everything that has no door.
        door_open: Option<bool>,
    },
    Discard {
        guid: Uuid,
    },
}

// ── World ─────────────────────────────────────────────────────────────────────

/// All simulation state: the entity arena, both road graphs, and the active
/// top-level task.
///
/// Entities are addressed by `EntityId` — an index into the arena that is
/// never reused within a run — and iterated in id (= creation) order.
/// Discarded entities stay in the arena until their discard delta has been
/// drained, then their slot becomes `None` forever.
pub struct World {
    config: SimConfig,
    layout: Layout,
    robot_graph: Graph,
    truck_graph: Graph,
    entities: Vec<Option<WorldEntity>>,
    active_task: Option<Box<dyn WorldTask>>,
}

impl World {
    /// Build a world from a layout: graphs first, then storage plots, then
    /// one robot per bay.
    pub fn new(config: SimConfig, layout: Layout) -> Self {
        let robot_graph = layout.robot_graph();
        let truck_graph = layout.truck_graph();

        let mut world = Self {
            config,
            layout,
            robot_graph,
            truck_graph,
            entities: Vec::new(),
            active_task: None,
        };

        for (position, width, length) in world.layout.storage_plots.clone() {
            world.create_storage_plot(position, width, length);
        }
        for spawn in world.layout.poi.robot_spawns.clone() {
            world.create_robot(spawn);
        }
        world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn robot_graph(&self) -> &Graph {
        &self.robot_graph
    }

    pub fn truck_graph(&self) -> &Graph {
        &self.truck_graph
    }

    // ── Factories ─────────────────────────────────────────────────────────

    fn alloc_id(&self) -> EntityId {
        EntityId(self.entities.len() as u32)
    }

    pub fn create_robot(&mut self, position: Vec3) -> EntityId {
        let id = self.alloc_id();
        let kinematics = self.layout.robot_kinematics(&self.config);
        self.entities
            .push(Some(WorldEntity::Robot(Robot::new(id, position, kinematics))));
        id
    }

    pub fn create_truck(&mut self, position: Vec3) -> EntityId {
        let id = self.alloc_id();
        let kinematics = self.layout.truck_kinematics(&self.config);
        self.entities
            .push(Some(WorldEntity::Truck(Truck::new(id, position, kinematics))));
        id
    }

    /// Create a truck with `amount` shelves already loaded into its first
    /// slots, each shelf spawned at its slot's world position.
    pub fn create_truck_with_cargo(&mut self, position: Vec3, amount: usize) -> EntityId {
        let truck_id = self.create_truck(position);
        let slot_count = self
            .truck(truck_id)
            .map(|t| t.slots().len())
            .unwrap_or(0);

        for index in 0..amount.min(slot_count) {
            let at = SlotRef::new(truck_id, index);
            let Some(slot_position) = self.slot_world_position(at) else {
                break;
            };
            let shelf = self.create_shelf(slot_position);
            let accepted = self
                .slot_mut(at)
                .map(|slot| slot.set_cargo(shelf))
                .unwrap_or(false);
            debug_assert!(accepted, "fresh truck slot rejected its cargo");
        }
        truck_id
    }

    pub fn create_shelf(&mut self, position: Vec3) -> EntityId {
        let id = self.alloc_id();
        self.entities
            .push(Some(WorldEntity::Shelf(Shelf::new(id, position))));
        id
    }

    pub fn create_storage_plot(&mut self, position: Vec3, width: u32, length: u32) -> EntityId {
        let id = self.alloc_id();
        self.entities.push(Some(WorldEntity::Storage(StoragePlot::new(
            id, position, width, length,
        ))));
        id
    }

    /// Mark `id` for discard, cascading to any cargo its slots hold.  The
    /// entity leaves the arena only after the discard has been drained.
    pub fn destroy(&mut self, id: EntityId) {
        let mut cascade: Vec<EntityId> = Vec::new();
        match self.entity(id) {
            Some(WorldEntity::Robot(r)) => cascade.extend(r.slot().cargo()),
            Some(WorldEntity::Truck(t)) => {
                cascade.extend(t.slots().iter().filter_map(CargoSlot::cargo));
            }
            Some(WorldEntity::Storage(p)) => {
                cascade.extend(p.slots().iter().filter_map(CargoSlot::cargo));
            }
            _ => {}
        }

        if let Some(entity) = self.entity_mut(id) {
            entity.core_mut().destroy();
        }
        for cargo in cascade {
            if let Some(entity) = self.entity_mut(cargo) {
                entity.core_mut().destroy();
            }
        }
    }

    // ── Entity access ─────────────────────────────────────────────────────

    pub fn entity(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.get(id.index())?.as_ref()
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut WorldEntity> {
        self.entities.get_mut(id.index())?.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    pub fn live_entity_count(&self) -> usize {
        self.entities.iter().flatten().count()
    }

    pub fn robot(&self, id: EntityId) -> Option<&Robot> {
        match self.entity(id)? {
            WorldEntity::Robot(r) => Some(r),
            _ => None,
        }
    }

    pub fn robot_mut(&mut self, id: EntityId) -> Option<&mut Robot> {
        match self.entity_mut(id)? {
            WorldEntity::Robot(r) => Some(r),
            _ => None,
        }
    }

    pub fn truck(&self, id: EntityId) -> Option<&Truck> {
        match self.entity(id)? {
            WorldEntity::Truck(t) => Some(t),
            _ => None,
        }
    }

    pub fn truck_mut(&mut self, id: EntityId) -> Option<&mut Truck> {
        match self.entity_mut(id)? {
            WorldEntity::Truck(t) => Some(t),
            _ => None,
        }
    }

    pub fn shelf(&self, id: EntityId) -> Option<&Shelf> {
        match self.entity(id)? {
            WorldEntity::Shelf(s) => Some(s),
            _ => None,
        }
    }

    pub fn shelf_mut(&mut self, id: EntityId) -> Option<&mut Shelf> {
        match self.entity_mut(id)? {
            WorldEntity::Shelf(s) => Some(s),
            _ => None,
        }
    }

    pub fn plot(&self, id: EntityId) -> Option<&StoragePlot> {
        match self.entity(id)? {
            WorldEntity::Storage(p) => Some(p),
            _ => None,
        }
    }

    pub fn plot_mut(&mut self, id: EntityId) -> Option<&mut StoragePlot> {
        match self.entity_mut(id)? {
            WorldEntity::Storage(p) => Some(p),
            _ => None,
        }
    }

    pub fn robots(&self) -> impl Iterator<Item = &Robot> {
        self.entities.iter().flatten().filter_map(|e| match e {
            WorldEntity::Robot(r) => Some(r),
            _ => None,
        })
    }

    pub fn trucks(&self) -> impl Iterator<Item = &Truck> {
        self.entities.iter().flatten().filter_map(|e| match e {
            WorldEntity::Truck(t) => Some(t),
            _ => None,
        })
    }

    pub fn plots(&self) -> impl Iterator<Item = &StoragePlot> {
        self.entities.iter().flatten().filter_map(|e| match e {
            WorldEntity::Storage(p) => Some(p),
            _ => None,
        })
    }

    /// The first robot with an empty task queue, in creation order.
    pub fn idle_robot(&self) -> Option<EntityId> {
        self.robots()
            .find(|r| r.is_standby() && !r.core().discard_requested())
            .map(|r| r.core().id())
    }

    // ── Cargo slots ───────────────────────────────────────────────────────

    pub fn slot(&self, at: SlotRef) -> Option<&CargoSlot> {
        match self.entity(at.carrier)? {
            WorldEntity::Robot(r) => (at.slot == 0).then(|| r.slot()),
            WorldEntity::Truck(t) => t.slot(at.slot),
            WorldEntity::Storage(p) => p.slot(at.slot),
            WorldEntity::Shelf(_) => None,
        }
    }

    pub fn slot_mut(&mut self, at: SlotRef) -> Option<&mut CargoSlot> {
        match self.entity_mut(at.carrier)? {
            WorldEntity::Robot(r) => (at.slot == 0).then(|| r.slot_mut()),
            WorldEntity::Truck(t) => t.slot_mut(at.slot),
            WorldEntity::Storage(p) => p.slot_mut(at.slot),
            WorldEntity::Shelf(_) => None,
        }
    }

    /// World-space position of a slot (carrier position + rotated offset).
    pub fn slot_world_position(&self, at: SlotRef) -> Option<Vec3> {
        let core = self.entity(at.carrier)?.core();
        Some(self.slot(at)?.world_position(core.position(), core.yaw()))
    }

    /// The first free storage slot across all plots, in creation order.
    pub fn free_storage_slot(&self) -> Option<SlotRef> {
        for plot in self.plots() {
            if let Some(index) = plot.free_slot_indices().into_iter().next() {
                return Some(SlotRef::new(plot.core().id(), index));
            }
        }
        None
    }

    /// Every occupied storage slot across all plots, in creation order.
    pub fn occupied_storage_slots(&self) -> Vec<SlotRef> {
        self.plots()
            .flat_map(|plot| {
                let carrier = plot.core().id();
                plot.occupied_slot_indices()
                    .into_iter()
                    .map(move |index| SlotRef::new(carrier, index))
            })
            .collect()
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Plan a route over the robot graph and hand it to the robot.
    pub fn route_robot(&mut self, id: EntityId, destination: Vec3) -> WorldResult<()> {
        let from = self
            .robot(id)
            .ok_or(WorldError::EntityNotFound(id))?
            .core()
            .position();
        let waypoints = plan_route(&self.robot_graph, from, destination)?;
        self.robot_mut(id)
            .ok_or(WorldError::EntityNotFound(id))?
            .route_mut()
            .set_route(waypoints);
        Ok(())
    }

    /// Plan a route over the truck lane and hand it to the truck.
    pub fn route_truck(&mut self, id: EntityId, destination: Vec3) -> WorldResult<()> {
        let from = self
            .truck(id)
            .ok_or(WorldError::EntityNotFound(id))?
            .core()
            .position();
        let waypoints = plan_route(&self.truck_graph, from, destination)?;
        self.truck_mut(id)
            .ok_or(WorldError::EntityNotFound(id))?
            .route_mut()
            .set_route(waypoints);
        Ok(())
    }

    /// The graph node where robots queue for truck access.
    pub fn robot_queue_start(&self) -> Vec3 {
        let poi = self.layout.poi.robot_queue_start;
        self.robot_graph
            .nearest_explicit_node(poi)
            .map(|id| self.robot_graph.node(id).position)
            .unwrap_or(poi)
    }

    /// The graph node where robots leave the truck.
    pub fn robot_truck_exit(&self) -> Vec3 {
        let poi = self.layout.poi.robot_truck_exit;
        self.robot_graph
            .nearest_explicit_node(poi)
            .map(|id| self.robot_graph.node(id).position)
            .unwrap_or(poi)
    }

    // ── Collision queries ─────────────────────────────────────────────────

    /// All collidable entities whose footprints intersect `id`'s footprint.
    pub fn collisions_with(&self, id: EntityId) -> Vec<EntityId> {
        let Some(segments) = self.footprint_segments(id) else {
            return Vec::new();
        };
        self.collisions_on_segments(&segments, Some(id))
    }

    /// All collidable entities whose footprints intersect any of `segments`.
    pub fn collisions_on_segments(
        &self,
        segments: &[Segment2],
        exclude: Option<EntityId>,
    ) -> Vec<EntityId> {
        self.entities
            .iter()
            .flatten()
            .filter(|e| {
                let core = e.core();
                Some(core.id()) != exclude && !core.discard_requested()
            })
            .filter_map(|e| {
                let (own, id) = match e {
                    WorldEntity::Robot(r) => (r.footprint().segments(r.core()), r.core().id()),
                    WorldEntity::Truck(t) => (t.footprint().segments(t.core()), t.core().id()),
                    _ => return None,
                };
                own.iter()
                    .any(|s| s.intersects_any(segments))
                    .then_some(id)
            })
            .collect()
    }

    fn footprint_segments(&self, id: EntityId) -> Option<Vec<Segment2>> {
        match self.entity(id)? {
            WorldEntity::Robot(r) => Some(r.footprint().segments(r.core())),
            WorldEntity::Truck(t) => Some(t.footprint().segments(t.core())),
            _ => None,
        }
    }

    /// Footprint segment sets of every collidable entity except `id` and its
    /// lock partner.
    ///
    /// A robot holding a truck's occupancy lock is *inside* that truck; the
    /// pair is exempted from mutual collision for as long as the lock is
    /// held, which is precisely what the lock guarantees is safe.
    fn obstacles_for(&self, id: EntityId) -> Vec<Vec<Segment2>> {
        let exempt = self.lock_partner(id);
        self.entities
            .iter()
            .flatten()
            .filter(|e| {
                let core = e.core();
                core.id() != id
                    && Some(core.id()) != exempt
                    && !core.discard_requested()
            })
            .filter_map(|e| match e {
                WorldEntity::Robot(r) => Some(r.footprint().segments(r.core())),
                WorldEntity::Truck(t) => Some(t.footprint().segments(t.core())),
                _ => None,
            })
            .collect()
    }

    fn lock_partner(&self, id: EntityId) -> Option<EntityId> {
        match self.entity(id)? {
            WorldEntity::Robot(_) => self
                .trucks()
                .find(|t| t.occupancy().holder() == Some(id))
                .map(|t| t.core().id()),
            WorldEntity::Truck(t) => t.occupancy().holder(),
            _ => None,
        }
    }

    // ── Tasks ─────────────────────────────────────────────────────────────

    /// Install `task` as the single top-level task.  Fails (no-op, `false`)
    /// while a previous task is still running.
    pub fn run_task(&mut self, task: Box<dyn WorldTask>) -> bool {
        if self.active_task.is_some() {
            return false;
        }
        self.active_task = Some(task);
        true
    }

    pub fn has_active_task(&self) -> bool {
        self.active_task.is_some()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulation one tick: the world task first, then every
    /// live entity in creation order.
    pub fn tick(&mut self) {
        if let Some(mut task) = self.active_task.take() {
            match task.tick(self) {
                TaskStatus::Running => self.active_task = Some(task),
                TaskStatus::Finished => {
                    tracing::info!(
                        task = task.name(),
                        ticks = task.ticks_run(),
                        "world task finished"
                    );
                }
            }
        }

        for index in 0..self.entities.len() {
            let id = EntityId(index as u32);
            let kind = match self.entity(id) {
                Some(e) if !e.core().discard_requested() => e.core().kind(),
                _ => continue,
            };
            match kind {
                EntityKind::Robot => self.tick_robot(id),
                EntityKind::Truck => self.tick_truck(id),
                EntityKind::Storage => self.settle_slot_cargo(id),
                EntityKind::Shelf => {}
            }
        }
    }

    fn tick_robot(&mut self, id: EntityId) {
        // Task first: it may retarget the robot for this very tick.
        if let Some(mut task) = self.robot_mut(id).and_then(Robot::take_front_task) {
            match task.tick(self, id) {
                TaskStatus::Running => {
                    if let Some(robot) = self.robot_mut(id) {
                        robot.put_front_task(task);
                    }
                }
                TaskStatus::Finished => {
                    tracing::info!(
                        robot = %id,
                        task = task.name(),
                        ticks = task.ticks_run(),
                        "robot task finished"
                    );
                }
            }
        }

        let obstacles = self.obstacles_for(id);
        if let Some(robot) = self.robot_mut(id) {
            robot.advance(&obstacles);
        }
        self.settle_slot_cargo(id);
    }

    fn tick_truck(&mut self, id: EntityId) {
        let obstacles = self.obstacles_for(id);
        if let Some(truck) = self.truck_mut(id) {
            truck.advance(&obstacles);
        }
        self.settle_slot_cargo(id);
    }

    /// Drag every cargo unit held by `id`'s slots to its slot position.
    fn settle_slot_cargo(&mut self, id: EntityId) {
        let Some(entity) = self.entity(id) else {
            return;
        };
        let core = entity.core();
        let (position, yaw, rotation) = (core.position(), core.yaw(), core.rotation());

        let moves: Vec<(EntityId, Vec3)> = match entity {
            WorldEntity::Robot(r) => r
                .slot()
                .cargo()
                .map(|cargo| (cargo, r.slot().world_position(position, yaw)))
                .into_iter()
                .collect(),
            WorldEntity::Truck(t) => t
                .slots()
                .iter()
                .filter_map(|s| s.cargo().map(|c| (c, s.world_position(position, yaw))))
                .collect(),
            WorldEntity::Storage(p) => p
                .slots()
                .iter()
                .filter_map(|s| s.cargo().map(|c| (c, s.world_position(position, yaw))))
                .collect(),
            WorldEntity::Shelf(_) => Vec::new(),
        };

        for (cargo, target) in moves {
            if let Some(shelf) = self.shelf_mut(cargo) {
                if shelf.core().position() != target {
                    shelf.core_mut().move_to(target);
                }
                if shelf.core().rotation() != rotation {
                    shelf.core_mut().rotate_to(rotation);
                }
            }
        }
    }

    // ── Outbound deltas ───────────────────────────────────────────────────

    /// Collect this tick's deltas: a discard for every marked entity (which
    /// then leaves the arena) and an update for every dirty one (whose flag
    /// is cleared).
    pub fn drain_updates(&mut self) -> Vec<EntityDelta> {
        let mut deltas = Vec::new();
        for slot in &mut self.entities {
            let Some(entity) = slot else { continue };
            if entity.core().discard_requested() {
                deltas.push(EntityDelta::Discard { guid: entity.core().guid() });
                *slot = None;
            } else if entity.core().is_dirty() {
                deltas.push(Self::update_delta(entity));
                entity.core_mut().clear_dirty();
            }
        }
        deltas
    }

    /// Updates for every live entity, regardless of dirtiness — sent to a
    /// newly subscribed viewer so it can build the full scene.
    pub fn snapshot(&self) -> Vec<EntityDelta> {
        self.entities
            .iter()
            .flatten()
            .filter(|e| !e.core().discard_requested())
            .map(Self::update_delta)
            .collect()
    }

    fn update_delta(entity: &WorldEntity) -> EntityDelta {
        let core = entity.core();
        EntityDelta::Update {
            guid: core.guid(),
            kind: core.kind(),
            position: core.position(),
            rotation: core.rotation(),
            door_open: match entity {
                WorldEntity::Truck(t) => Some(t.door_open()),
                _ => None,
            },
        }
    }
}
