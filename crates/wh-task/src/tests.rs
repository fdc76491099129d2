//! Unit and scenario tests for wh-task.

#[cfg(test)]
mod helpers {
    use wh_core::SimConfig;
    use wh_world::{Layout, World};

    /// Default layout with the robot fleet cut to `robots` bays.
    pub fn world_with_robots(robots: usize) -> World {
        let mut layout = Layout::default();
        layout.poi.robot_spawns.truncate(robots);
        World::new(SimConfig::default(), layout)
    }

    /// Tick until the world task slot frees up (task finished) or the bound
    /// runs out.  Returns the number of ticks consumed.
    pub fn run_until_task_done(world: &mut World, bound: u64) -> u64 {
        for tick in 0..bound {
            world.tick();
            world.drain_updates();
            if !world.has_active_task() {
                return tick + 1;
            }
        }
        panic!("world task still running after {bound} ticks");
    }
}

#[cfg(test)]
mod pathfinder {
    use wh_world::World;

    use super::helpers::world_with_robots;
    use crate::PathfinderTask;

    fn tick_robot_until_standby(world: &mut World, bound: u64) -> u64 {
        let robot = world.robots().next().unwrap().core().id();
        for tick in 0..bound {
            world.tick();
            if world.robot(robot).unwrap().is_standby() {
                return tick + 1;
            }
        }
        panic!("robot task still running after {bound} ticks");
    }

    #[test]
    fn already_at_target_finishes_in_two_ticks() {
        let mut world = world_with_robots(1);
        let robot = world.idle_robot().unwrap();
        let here = world.robot(robot).unwrap().core().position();

        world
            .robot_mut(robot)
            .unwrap()
            .assign_task(Box::new(PathfinderTask::new(here)));

        let ticks = tick_robot_until_standby(&mut world, 5);
        assert!(ticks <= 2, "took {ticks} ticks");
        assert_eq!(world.robot(robot).unwrap().core().position(), here);
    }

    #[test]
    fn drives_the_robot_to_the_goal() {
        let mut world = world_with_robots(1);
        let robot = world.idle_robot().unwrap();
        let goal = world.robot_queue_start();

        world
            .robot_mut(robot)
            .unwrap()
            .assign_task(Box::new(PathfinderTask::new(goal)));

        tick_robot_until_standby(&mut world, 5_000);
        assert_eq!(world.robot(robot).unwrap().core().position(), goal);
    }

    #[test]
    fn queued_tasks_run_in_fifo_order() {
        let mut world = world_with_robots(1);
        let robot = world.idle_robot().unwrap();
        let first = world.robot_queue_start();
        let second = world.robot_truck_exit();

        {
            let r = world.robot_mut(robot).unwrap();
            r.assign_task(Box::new(PathfinderTask::new(first)));
            r.assign_task(Box::new(PathfinderTask::new(second)));
        }

        tick_robot_until_standby(&mut world, 10_000);
        assert_eq!(world.robot(robot).unwrap().core().position(), second);
    }
}

#[cfg(test)]
mod reservations {
    use wh_world::SlotRef;

    use super::helpers::world_with_robots;
    use crate::RobotUnloadTruckTask;

    #[test]
    #[should_panic(expected = "could not reserve its destination slot")]
    fn occupied_destination_panics_at_construction() {
        let mut world = world_with_robots(1);
        let truck = world.create_truck_with_cargo(world.layout().poi.truck_stop, 1);

        let destination = world.free_storage_slot().unwrap();
        let squatter = world.create_shelf(wh_core::Vec3::ZERO);
        assert!(world.slot_mut(destination).unwrap().set_cargo(squatter));

        let cargo = world
            .slot_mut(SlotRef::new(truck, 0))
            .unwrap()
            .release_cargo()
            .unwrap();
        let _ = RobotUnloadTruckTask::new(&mut world, truck, cargo, destination);
    }

    #[test]
    fn construction_reserves_the_destination() {
        let mut world = world_with_robots(1);
        let truck = world.create_truck_with_cargo(world.layout().poi.truck_stop, 1);
        let destination = world.free_storage_slot().unwrap();
        let cargo = world
            .slot_mut(SlotRef::new(truck, 0))
            .unwrap()
            .release_cargo()
            .unwrap();

        let _task = RobotUnloadTruckTask::new(&mut world, truck, cargo, destination);
        assert_eq!(world.slot(destination).unwrap().reservation(), Some(cargo));
    }
}

#[cfg(test)]
mod receive_shipment {
    use super::helpers::{run_until_task_done, world_with_robots};
    use crate::ReceiveShipmentTask;

    #[test]
    fn three_unit_shipment_lands_in_storage() {
        let mut world = world_with_robots(3);
        assert!(world.run_task(Box::new(ReceiveShipmentTask::new(3))));

        run_until_task_done(&mut world, 20_000);

        assert_eq!(world.trucks().count(), 0, "truck must despawn");
        assert_eq!(world.occupied_storage_slots().len(), 3);
        // The three shelves moved from the truck into storage and survive it.
        let shelves: Vec<_> = world
            .occupied_storage_slots()
            .into_iter()
            .map(|at| world.slot(at).unwrap().cargo().unwrap())
            .collect();
        for shelf in shelves {
            assert!(world.shelf(shelf).is_some());
        }
    }

    #[test]
    fn empty_shipment_just_cycles_the_truck() {
        let mut world = world_with_robots(1);
        assert!(world.run_task(Box::new(ReceiveShipmentTask::new(0))));
        run_until_task_done(&mut world, 5_000);
        assert_eq!(world.trucks().count(), 0);
        assert!(world.occupied_storage_slots().is_empty());
    }

    #[test]
    fn second_task_rejected_while_running() {
        let mut world = world_with_robots(1);
        assert!(world.run_task(Box::new(ReceiveShipmentTask::new(1))));
        assert!(!world.run_task(Box::new(ReceiveShipmentTask::new(1))));
    }
}

#[cfg(test)]
mod send_shipment {
    use super::helpers::{run_until_task_done, world_with_robots};
    use crate::SendShipmentTask;

    #[test]
    fn drains_storage_into_the_truck() {
        let mut world = world_with_robots(2);

        // Seed two occupied storage slots.
        for _ in 0..2 {
            let at = world.free_storage_slot().unwrap();
            let position = world.slot_world_position(at).unwrap();
            let shelf = world.create_shelf(position);
            assert!(world.slot_mut(at).unwrap().set_cargo(shelf));
        }

        // Amount larger than stock: bounded by the two occupied slots.
        assert!(world.run_task(Box::new(SendShipmentTask::new(5))));
        run_until_task_done(&mut world, 20_000);

        assert!(world.occupied_storage_slots().is_empty(), "storage drained");
        // The truck despawned and took its freshly loaded cargo with it.
        assert_eq!(world.trucks().count(), 0);
        let live_shelves = world
            .snapshot()
            .iter()
            .filter(|d| {
                matches!(
                    d,
                    wh_world::EntityDelta::Update {
                        kind: wh_entity::EntityKind::Shelf,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(live_shelves, 0);
    }

    #[test]
    fn nothing_to_send_still_completes() {
        let mut world = world_with_robots(1);
        assert!(world.run_task(Box::new(SendShipmentTask::new(3))));
        run_until_task_done(&mut world, 5_000);
        assert_eq!(world.trucks().count(), 0);
    }
}
