//! Carrying one cargo unit from storage into a truck slot.

use wh_core::EntityId;
use wh_world::{RobotTask, SlotRef, TaskCore, TaskStatus, World};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Init,
    MoveToItem,
    PickupCargo,
    MoveToQueue,
    AwaitTruckAvailable,
    DropOffDestination,
    LeaveTruck,
    Finished,
}

/// The mirror image of the unload trip: fetch `cargo` from the warehouse
/// floor, queue at the truck, wait for exclusive access, drop the cargo
/// into the reserved truck slot, and leave.
pub struct RobotLoadTruckTask {
    core: TaskCore,
    state: State,
    truck: EntityId,
    cargo: EntityId,
    destination: SlotRef,
}

impl RobotLoadTruckTask {
    /// # Panics
    ///
    /// Panics when the destination slot cannot be reserved for `cargo` —
    /// the caller picks a free truck slot first, so this is a scheduling
    /// bug, not a runtime condition.
    pub fn new(world: &mut World, truck: EntityId, cargo: EntityId, destination: SlotRef) -> Self {
        let reserved = world
            .slot_mut(destination)
            .map(|slot| slot.reserve_for(cargo))
            .unwrap_or(false);
        assert!(reserved, "load task could not reserve its destination slot");

        Self {
            core: TaskCore::new(),
            state: State::Init,
            truck,
            cargo,
            destination,
        }
    }
}

impl RobotTask for RobotLoadTruckTask {
    fn tick(&mut self, world: &mut World, robot: EntityId) -> TaskStatus {
        self.core.count_tick();

        let at_destination = world.robot(robot).is_some_and(|r| r.is_at_destination());

        match self.state {
            State::Init => {
                if let Some(item_position) =
                    world.shelf(self.cargo).map(|s| s.core().position())
                {
                    world
                        .route_robot(robot, item_position)
                        .expect("robot route must exist on a connected layout");
                }
                self.state = State::MoveToItem;
            }

            State::MoveToItem => {
                if at_destination {
                    self.state = State::PickupCargo;
                }
            }

            State::PickupCargo => {
                let picked = world
                    .robot_mut(robot)
                    .is_some_and(|r| r.slot_mut().set_cargo(self.cargo));
                if !picked {
                    return self.core.status();
                }
                let queue = world.robot_queue_start();
                world
                    .route_robot(robot, queue)
                    .expect("robot route must exist on a connected layout");
                self.state = State::MoveToQueue;
            }

            State::MoveToQueue => {
                if at_destination {
                    self.state = State::AwaitTruckAvailable;
                }
            }

            State::AwaitTruckAvailable => {
                let acquired = world
                    .truck_mut(self.truck)
                    .is_some_and(|t| t.occupancy_mut().try_acquire(robot));
                if !acquired {
                    return self.core.status();
                }
                let goal = world.slot_world_position(self.destination);
                if let Some(goal) = goal {
                    if let Some(r) = world.robot_mut(robot) {
                        r.route_mut().set_target(goal);
                    }
                }
                self.state = State::DropOffDestination;
            }

            State::DropOffDestination => {
                if !at_destination {
                    return self.core.status();
                }
                let released = world
                    .robot_mut(robot)
                    .and_then(|r| r.slot_mut().release_cargo());
                if let Some(cargo) = released {
                    let stored = world
                        .slot_mut(self.destination)
                        .map(|slot| slot.set_cargo(cargo))
                        .unwrap_or(false);
                    debug_assert!(stored, "reserved truck slot rejected its cargo");
                }
                let exit = world.robot_truck_exit();
                if let Some(r) = world.robot_mut(robot) {
                    r.route_mut().set_target(exit);
                }
                self.state = State::LeaveTruck;
            }

            State::LeaveTruck => {
                if !at_destination {
                    return self.core.status();
                }
                let home = world.robot(robot).map(|r| r.idle_position());
                if let Some(home) = home {
                    world
                        .route_robot(robot, home)
                        .expect("robot route must exist on a connected layout");
                }
                if let Some(t) = world.truck_mut(self.truck) {
                    t.occupancy_mut().release(robot);
                }
                self.state = State::Finished;
                self.core.finish();
            }

            State::Finished => {}
        }

        self.core.status()
    }

    fn name(&self) -> &'static str {
        "load-truck"
    }

    fn ticks_run(&self) -> u64 {
        self.core.ticks_run()
    }
}
