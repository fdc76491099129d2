//! Carrying one cargo unit out of a truck into a storage slot.

use wh_core::EntityId;
use wh_world::{RobotTask, SlotRef, TaskCore, TaskStatus, World};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Init,
    MoveToQueue,
    AwaitTruckAvailable,
    MoveToCargo,
    PickupCargo,
    LeaveTruck,
    MoveToDestination,
    DropOffDestination,
    Finished,
}

/// One robot trip: queue at the truck, wait for exclusive access, pick up
/// `cargo` inside, carry it to the reserved storage slot, and return to the
/// robot's bay.
///
/// The destination slot is reserved eagerly at construction, so no other
/// trip can claim it while this robot is underway.
pub struct RobotUnloadTruckTask {
    core: TaskCore,
    state: State,
    truck: EntityId,
    cargo: EntityId,
    destination: SlotRef,
}

impl RobotUnloadTruckTask {
    /// # Panics
    ///
    /// Panics when the destination slot cannot be reserved for `cargo`.
    /// The caller picks a free slot before constructing the task, so a
    /// failed reservation is a scheduling bug, not a runtime condition.
    pub fn new(world: &mut World, truck: EntityId, cargo: EntityId, destination: SlotRef) -> Self {
        let reserved = world
            .slot_mut(destination)
            .map(|slot| slot.reserve_for(cargo))
            .unwrap_or(false);
        assert!(reserved, "unload task could not reserve its destination slot");

        Self {
            core: TaskCore::new(),
            state: State::Init,
            truck,
            cargo,
            destination,
        }
    }
}

impl RobotTask for RobotUnloadTruckTask {
    fn tick(&mut self, world: &mut World, robot: EntityId) -> TaskStatus {
        self.core.count_tick();

        let at_destination = world.robot(robot).is_some_and(|r| r.is_at_destination());

        match self.state {
            State::Init => {
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
                // Poll until the truck admits us; contention is not an error.
                let acquired = world
                    .truck_mut(self.truck)
                    .is_some_and(|t| t.occupancy_mut().try_acquire(robot));
                if !acquired {
                    return self.core.status();
                }
                let cargo_position = world.shelf(self.cargo).map(|s| s.core().position());
                if let Some(position) = cargo_position {
                    if let Some(r) = world.robot_mut(robot) {
                        r.route_mut().set_target(position);
                    }
                }
                self.state = State::MoveToCargo;
            }

            State::MoveToCargo => {
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
                if let Some(goal) = world.slot_world_position(self.destination) {
                    world
                        .route_robot(robot, goal)
                        .expect("robot route must exist on a connected layout");
                }
                if let Some(t) = world.truck_mut(self.truck) {
                    t.occupancy_mut().release(robot);
                }
                self.state = State::MoveToDestination;
            }

            State::MoveToDestination => {
                if at_destination {
                    self.state = State::DropOffDestination;
                }
            }

            State::DropOffDestination => {
                let released = world
                    .robot_mut(robot)
                    .and_then(|r| r.slot_mut().release_cargo());
                if let Some(cargo) = released {
                    let stored = world
                        .slot_mut(self.destination)
                        .map(|slot| slot.set_cargo(cargo))
                        .unwrap_or(false);
                    debug_assert!(stored, "reserved storage slot rejected its cargo");
                }
                // Fire-and-forget: head home while the task reports done.
                let home = world.robot(robot).map(|r| r.idle_position());
                if let Some(home) = home {
                    world
                        .route_robot(robot, home)
                        .expect("robot route must exist on a connected layout");
                }
                self.state = State::Finished;
                self.core.finish();
            }

            State::Finished => {}
        }

        self.core.status()
    }

    fn name(&self) -> &'static str {
        "unload-truck"
    }

    fn ticks_run(&self) -> u64 {
        self.core.ticks_run()
    }
}
