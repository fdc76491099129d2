//! Receiving a shipment: truck in, robots unload it, truck out.

use std::collections::VecDeque;

use wh_core::EntityId;
use wh_world::{SlotRef, TaskCore, TaskStatus, World, WorldTask};

use crate::RobotUnloadTruckTask;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Init,
    WaitTruckArrival,
    WaitTruckUnloaded,
    WaitCargoTasksFinished,
    WaitTruckExit,
    Finished,
}

/// Top-level orchestration of an incoming shipment.
///
/// Spawns a truck loaded with `amount` cargo units, parks it at the stop,
/// and hands out one [`RobotUnloadTruckTask`] per tick — each pairing one
/// idle robot, one occupied truck slot, and one free storage slot — until
/// the truck is drained.  Once every dispatched robot is back on standby
/// the truck departs and despawns.
pub struct ReceiveShipmentTask {
    core: TaskCore,
    state: State,
    amount: usize,
    truck: EntityId,
    pending: VecDeque<usize>,
    dispatched: Vec<EntityId>,
}

impl ReceiveShipmentTask {
    pub fn new(amount: usize) -> Self {
        Self {
            core: TaskCore::new(),
            state: State::Init,
            amount,
            truck: EntityId::INVALID,
            pending: VecDeque::new(),
            dispatched: Vec::new(),
        }
    }

    fn all_dispatched_standby(&self, world: &World) -> bool {
        self.dispatched
            .iter()
            .all(|&id| world.robot(id).is_none_or(|r| r.is_standby()))
    }
}

impl WorldTask for ReceiveShipmentTask {
    fn tick(&mut self, world: &mut World) -> TaskStatus {
        self.core.count_tick();

        match self.state {
            State::Init => {
                let spawn = world.layout().poi.truck_spawn;
                let stop = world.layout().poi.truck_stop;
                self.truck = world.create_truck_with_cargo(spawn, self.amount);
                world
                    .route_truck(self.truck, stop)
                    .expect("truck lane must reach the stop");
                self.state = State::WaitTruckArrival;
            }

            State::WaitTruckArrival => {
                let arrived = world
                    .truck(self.truck)
                    .is_some_and(|t| t.is_at_destination());
                if !arrived {
                    return self.core.status();
                }
                if let Some(truck) = world.truck_mut(self.truck) {
                    truck.set_door_open(true);
                    self.pending = truck.occupied_slot_indices().into();
                }
                self.state = State::WaitTruckUnloaded;
            }

            State::WaitTruckUnloaded => {
                if self.pending.is_empty() {
                    self.state = State::WaitCargoTasksFinished;
                    return self.core.status();
                }

                // One dispatch per tick: one idle robot, one truck slot, one
                // free storage slot.  Missing any of the three, try again
                // next tick.
                let Some(robot) = world.idle_robot() else {
                    return self.core.status();
                };
                let Some(storage) = world.free_storage_slot() else {
                    return self.core.status();
                };

                let slot_index = self.pending.pop_front().expect("pending checked non-empty");
                let cargo = world
                    .slot_mut(SlotRef::new(self.truck, slot_index))
                    .and_then(|slot| slot.release_cargo())
                    .expect("occupied truck slot must release its cargo");

                let task = RobotUnloadTruckTask::new(world, self.truck, cargo, storage);
                if let Some(r) = world.robot_mut(robot) {
                    r.assign_task(Box::new(task));
                }
                tracing::debug!(%robot, %cargo, "dispatched unload trip");
                self.dispatched.push(robot);
            }

            State::WaitCargoTasksFinished => {
                if !self.all_dispatched_standby(world) {
                    return self.core.status();
                }
                let despawn = world.layout().poi.truck_despawn;
                if let Some(truck) = world.truck_mut(self.truck) {
                    truck.set_door_open(false);
                }
                world
                    .route_truck(self.truck, despawn)
                    .expect("truck lane must reach the despawn point");
                self.state = State::WaitTruckExit;
            }

            State::WaitTruckExit => {
                let arrived = world
                    .truck(self.truck)
                    .is_some_and(|t| t.is_at_destination());
                if !arrived {
                    return self.core.status();
                }
                world.destroy(self.truck);
                self.state = State::Finished;
                self.core.finish();
            }

            State::Finished => {}
        }

        self.core.status()
    }

    fn name(&self) -> &'static str {
        "receive-shipment"
    }

    fn ticks_run(&self) -> u64 {
        self.core.ticks_run()
    }
}
