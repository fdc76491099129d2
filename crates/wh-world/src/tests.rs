//! Unit tests for wh-world.

#[cfg(test)]
mod helpers {
    use wh_core::SimConfig;

    use crate::{Layout, World};

    /// The default layout cut down to one robot bay and one storage plot.
    pub fn mini_layout() -> Layout {
        let mut layout = Layout::default();
        layout.poi.robot_spawns.truncate(1);
        layout.storage_plots.truncate(1);
        layout
    }

    pub fn mini_world() -> World {
        World::new(SimConfig::default(), mini_layout())
    }
}

#[cfg(test)]
mod construction {
    use wh_core::SimConfig;

    use super::helpers::mini_world;
    use crate::{Layout, World};

    #[test]
    fn default_layout_spawns_plots_and_robots() {
        let world = World::new(SimConfig::default(), Layout::default());
        assert_eq!(world.plots().count(), 6);
        assert_eq!(world.robots().count(), 5);
        assert_eq!(world.live_entity_count(), 11);
    }

    #[test]
    fn storage_plots_carry_slot_grids() {
        let world = mini_world();
        let plot = world.plots().next().unwrap();
        assert_eq!(plot.slots().len(), 10); // 2 × 5
        assert_eq!(plot.free_slot_indices().len(), 10);
    }

    #[test]
    fn queue_points_are_graph_nodes() {
        let world = mini_world();
        // Integration splices both reference points onto the robot graph,
        // so the nearest explicit node *is* the point itself.
        assert_eq!(world.robot_queue_start(), world.layout().poi.robot_queue_start);
        assert_eq!(world.robot_truck_exit(), world.layout().poi.robot_truck_exit);
    }

    #[test]
    fn trucks_spawn_with_requested_cargo() {
        let mut world = mini_world();
        let spawn = world.layout().poi.truck_spawn;
        let truck_id = world.create_truck_with_cargo(spawn, 3);

        let truck = world.truck(truck_id).unwrap();
        assert_eq!(truck.occupied_slot_indices().len(), 3);
        assert_eq!(truck.free_slot_indices().len(), 27);

        // Each shelf sits at its slot's world position.
        for index in truck.occupied_slot_indices() {
            let at = crate::SlotRef::new(truck_id, index);
            let cargo = world.slot(at).unwrap().cargo().unwrap();
            assert_eq!(
                world.shelf(cargo).unwrap().core().position(),
                world.slot_world_position(at).unwrap()
            );
        }
    }
}

#[cfg(test)]
mod lifecycle {
    use super::helpers::mini_world;
    use crate::EntityDelta;

    #[test]
    fn drain_reports_dirty_then_clears() {
        let mut world = mini_world();
        let first = world.drain_updates();
        // Everything is freshly created, so everything reports once...
        assert_eq!(first.len(), world.live_entity_count());
        // ...and nothing reports twice.
        assert!(world.drain_updates().is_empty());
    }

    #[test]
    fn discard_is_two_phase() {
        let mut world = mini_world();
        world.drain_updates();

        let spawn = world.layout().poi.truck_spawn;
        let truck_id = world.create_truck(spawn);
        world.drain_updates();

        world.destroy(truck_id);
        assert!(world.contains(truck_id), "still live until the discard drains");

        let deltas = world.drain_updates();
        assert!(matches!(deltas.as_slice(), [EntityDelta::Discard { .. }]));
        assert!(!world.contains(truck_id));
    }

    #[test]
    fn destroying_a_loaded_truck_takes_its_cargo_along() {
        let mut world = mini_world();
        let spawn = world.layout().poi.truck_spawn;
        let truck_id = world.create_truck_with_cargo(spawn, 2);
        world.drain_updates();

        let before = world.live_entity_count();
        world.destroy(truck_id);
        world.drain_updates();
        assert_eq!(world.live_entity_count(), before - 3); // truck + 2 shelves
    }

    #[test]
    fn snapshot_covers_all_live_entities() {
        let mut world = mini_world();
        world.drain_updates();
        let snapshot = world.snapshot();
        assert_eq!(snapshot.len(), world.live_entity_count());
        assert!(snapshot
            .iter()
            .all(|d| matches!(d, EntityDelta::Update { .. })));
    }
}

#[cfg(test)]
mod slots {
    use super::helpers::mini_world;
    use crate::SlotRef;

    #[test]
    fn free_storage_slot_scans_in_order() {
        let world = mini_world();
        let first = world.free_storage_slot().unwrap();
        assert_eq!(first.slot, 0);
        assert!(world.slot(first).unwrap().is_available());
    }

    #[test]
    fn occupied_storage_slots_track_cargo() {
        let mut world = mini_world();
        assert!(world.occupied_storage_slots().is_empty());

        let at = world.free_storage_slot().unwrap();
        let position = world.slot_world_position(at).unwrap();
        let shelf = world.create_shelf(position);
        assert!(world.slot_mut(at).unwrap().set_cargo(shelf));

        assert_eq!(world.occupied_storage_slots(), vec![at]);
        assert_ne!(world.free_storage_slot(), Some(at));
    }

    #[test]
    fn robot_slot_is_index_zero() {
        let world = mini_world();
        let robot_id = world.idle_robot().unwrap();
        assert!(world.slot(SlotRef::new(robot_id, 0)).is_some());
        assert!(world.slot(SlotRef::new(robot_id, 1)).is_none());
    }
}

#[cfg(test)]
mod movement {
    use super::helpers::mini_world;

    #[test]
    fn routed_robot_reaches_its_destination() {
        let mut world = mini_world();
        let robot_id = world.idle_robot().unwrap();
        let goal = world.robot_queue_start();

        world.route_robot(robot_id, goal).unwrap();
        for _ in 0..5_000 {
            world.tick();
            if world.robot(robot_id).unwrap().is_at_destination() {
                break;
            }
        }
        assert_eq!(world.robot(robot_id).unwrap().core().position(), goal);
    }

    #[test]
    fn carried_cargo_follows_the_robot() {
        let mut world = mini_world();
        let robot_id = world.idle_robot().unwrap();
        let start = world.robot(robot_id).unwrap().core().position();

        let shelf = world.create_shelf(start);
        assert!(world.robot_mut(robot_id).unwrap().slot_mut().set_cargo(shelf));

        let goal = world.robot_queue_start();
        world.route_robot(robot_id, goal).unwrap();
        for _ in 0..5_000 {
            world.tick();
        }

        let robot_pos = world.robot(robot_id).unwrap().core().position();
        let shelf_pos = world.shelf(shelf).unwrap().core().position();
        assert_eq!(robot_pos, goal);
        assert_eq!(shelf_pos, robot_pos, "cargo rides the robot's slot");
    }

    #[test]
    fn blocked_robot_holds_position() {
        let mut world = mini_world();
        let robot_id = world.idle_robot().unwrap();
        let start = world.robot(robot_id).unwrap().core().position();

        // Park a second robot directly on the first one's spawn approach.
        let blocker = world.create_robot(start + wh_core::Vec3::new(0.0, 0.0, 1.0));

        world
            .route_robot(robot_id, start + wh_core::Vec3::new(0.0, 0.0, 3.0))
            .unwrap();
        for _ in 0..100 {
            world.tick();
        }

        let moved = world.robot(robot_id).unwrap().core().position();
        assert_eq!(moved, start, "trail check must hold the robot in place");
        assert!(world.collisions_with(robot_id).is_empty());
        let _ = blocker;
    }
}

#[cfg(test)]
mod collisions {
    use wh_core::Vec3;

    use super::helpers::mini_world;

    #[test]
    fn overlapping_robots_are_reported() {
        let mut world = mini_world();
        let a = world.create_robot(Vec3::new(20.0, 0.0, 20.0));
        let b = world.create_robot(Vec3::new(20.5, 0.0, 20.0));
        assert_eq!(world.collisions_with(a), vec![b]);
        assert_eq!(world.collisions_with(b), vec![a]);
    }

    #[test]
    fn distant_robots_are_not() {
        let mut world = mini_world();
        let a = world.create_robot(Vec3::new(20.0, 0.0, 20.0));
        let _b = world.create_robot(Vec3::new(30.0, 0.0, 20.0));
        assert!(world.collisions_with(a).is_empty());
    }

    #[test]
    fn occupant_robot_ignores_its_truck() {
        let mut world = mini_world();
        let truck_id = world.create_truck(world.layout().poi.truck_stop);
        let robot_id = world.idle_robot().unwrap();

        assert!(world
            .truck_mut(truck_id)
            .unwrap()
            .occupancy_mut()
            .try_acquire(robot_id));

        // Teleport the robot inside the trailer; with the lock held the
        // pair is exempt, so movement toward a slot must not brake.
        let slot_pos = world
            .slot_world_position(crate::SlotRef::new(truck_id, 0))
            .unwrap();
        world.robot_mut(robot_id).unwrap().core_mut().move_to(slot_pos);
        world
            .robot_mut(robot_id)
            .unwrap()
            .route_mut()
            .set_target(slot_pos + Vec3::new(0.0, 0.0, 2.0));

        let before = world.robot(robot_id).unwrap().core().position();
        for _ in 0..20 {
            world.tick();
        }
        assert_ne!(world.robot(robot_id).unwrap().core().position(), before);
    }
}

#[cfg(test)]
mod tasks {
    use super::helpers::mini_world;
    use crate::{TaskCore, TaskStatus, World, WorldTask};

    /// Finishes after a fixed number of ticks.
    struct CountdownTask {
        core: TaskCore,
        remaining: u32,
    }

    impl CountdownTask {
        fn new(ticks: u32) -> Self {
            Self { core: TaskCore::new(), remaining: ticks }
        }
    }

    impl WorldTask for CountdownTask {
        fn tick(&mut self, _world: &mut World) -> TaskStatus {
            self.core.count_tick();
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.core.finish();
            }
            self.core.status()
        }

        fn name(&self) -> &'static str {
            "countdown"
        }

        fn ticks_run(&self) -> u64 {
            self.core.ticks_run()
        }
    }

    #[test]
    fn single_top_level_task() {
        let mut world = mini_world();
        assert!(world.run_task(Box::new(CountdownTask::new(5))));
        assert!(
            !world.run_task(Box::new(CountdownTask::new(5))),
            "second task must be rejected while the first runs"
        );
    }

    #[test]
    fn finished_task_frees_the_slot() {
        let mut world = mini_world();
        world.run_task(Box::new(CountdownTask::new(2)));
        world.tick();
        assert!(world.has_active_task());
        world.tick();
        assert!(!world.has_active_task());
        assert!(world.run_task(Box::new(CountdownTask::new(1))));
    }

    #[test]
    fn task_core_is_monotonic() {
        let mut core = TaskCore::new();
        core.count_tick();
        core.finish();
        core.count_tick();
        assert_eq!(core.ticks_run(), 1, "finished tasks stop counting");
        assert!(core.is_finished());
        assert_eq!(core.status(), TaskStatus::Finished);
    }
}
