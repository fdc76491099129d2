//! Sending a shipment: truck in, robots load it from storage, truck out.

use std::collections::VecDeque;

use wh_core::EntityId;
use wh_world::{SlotRef, TaskCore, TaskStatus, World, WorldTask};

use crate::RobotLoadTruckTask;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Init,
    WaitTruckArrival,
    WaitTruckLoaded,
    WaitCargoTasksFinished,
    WaitTruckExit,
    Finished,
}

/// Top-level orchestration of an outgoing shipment.
///
/// Spawns an empty truck and drains occupied storage slots into it, one
/// [`RobotLoadTruckTask`] per tick, bounded by
/// `min(occupied storage, free truck slots, amount)`.
pub struct SendShipmentTask {
    core: TaskCore,
    state: State,
    amount: usize,
    truck: EntityId,
    pending: VecDeque<SlotRef>,
    dispatched: Vec<EntityId>,
}

impl SendShipmentTask {
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

impl WorldTask for SendShipmentTask {
    fn tick(&mut self, world: &mut World) -> TaskStatus {
        self.core.count_tick();

        match self.state {
            State::Init => {
                let spawn = world.layout().poi.truck_spawn;
                let stop = world.layout().poi.truck_stop;
                self.truck = world.create_truck(spawn);
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
                let occupied = world.occupied_storage_slots();
                let capacity = world
                    .truck(self.truck)
                    .map(|t| t.free_slot_indices().len())
                    .unwrap_or(0);
                let take = occupied.len().min(capacity).min(self.amount);
                self.pending = occupied.into_iter().take(take).collect();
                self.state = State::WaitTruckLoaded;
            }

            State::WaitTruckLoaded => {
                if self.pending.is_empty() {
                    self.state = State::WaitCargoTasksFinished;
                    return self.core.status();
                }

                let Some(robot) = world.idle_robot() else {
                    return self.core.status();
                };
                // Fill the trailer back to front so robots never squeeze
                // past already-delivered cargo.
                let Some(slot_index) = world
                    .truck(self.truck)
                    .and_then(|t| t.free_slot_indices().pop())
                else {
                    return self.core.status();
                };

                let source = self.pending.pop_front().expect("pending checked non-empty");
                let cargo = world
                    .slot_mut(source)
                    .and_then(|slot| slot.release_cargo())
                    .expect("occupied storage slot must release its cargo");

                let destination = SlotRef::new(self.truck, slot_index);
                let task = RobotLoadTruckTask::new(world, self.truck, cargo, destination);
                if let Some(r) = world.robot_mut(robot) {
                    r.assign_task(Box::new(task));
                }
                tracing::debug!(%robot, %cargo, "dispatched load trip");
                self.dispatched.push(robot);
            }

            State::WaitCargoTasksFinished => {
                if !self.all_dispatched_standby(world) {
                    return self.core.status();
                }
                let despawn = world.layout().poi.truck_despawn;
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
        "send-shipment"
    }

    fn ticks_run(&self) -> u64 {
        self.core.ticks_run()
    }
}
