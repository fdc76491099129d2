//! The fixed-cadence simulation loop.
//!
//! One scheduler owns the world and drives it:
//!
//! 1. `World::tick` — the simulation advances.
//! 2. Drain the world's entity deltas and fan them out to every viewer's
//!    outbound queue.
//! 3. Drain each viewer's inbound queue and execute the commands against
//!    the world, one by one, with per-command failure isolation: a failed
//!    command is logged and the tick carries on.
//! 4. Sleep until the next tick boundary.  An overrunning tick starts the
//!    next one immediately — no catch-up — and shows up in the metrics as
//!    a workload above 100%.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use wh_core::{TickClock, ViewerId};
use wh_task::{PathfinderTask, ReceiveShipmentTask, SendShipmentTask};
use wh_world::World;

use crate::{ClientCommand, RuntimeError, RuntimeResult, ServerEnvelope, TickMetrics, Viewer};

pub struct Scheduler {
    world: World,
    clock: TickClock,
    metrics: TickMetrics,
    viewers: Vec<Arc<Viewer>>,
    next_viewer_id: u32,
}

impl Scheduler {
    pub fn new(world: World) -> Self {
        let clock = world.config().make_clock();
        let metrics = TickMetrics::new(clock.tick_interval_ms());
        Self {
            world,
            clock,
            metrics,
            viewers: Vec::new(),
            next_viewer_id: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }

    // ── Viewers ───────────────────────────────────────────────────────────

    /// Register a new viewer and seed its outbound queue with a full scene
    /// snapshot, so the remote side can build every model immediately.
    pub fn add_viewer(&mut self) -> Arc<Viewer> {
        let viewer = Arc::new(Viewer::new(ViewerId(self.next_viewer_id)));
        self.next_viewer_id += 1;

        viewer.push_updates(
            self.world
                .snapshot()
                .iter()
                .map(ServerEnvelope::from_delta),
        );

        self.viewers.push(Arc::clone(&viewer));
        tracing::info!(viewer = %viewer.id(), "viewer subscribed");
        viewer
    }

    pub fn remove_viewer(&mut self, id: ViewerId) {
        self.viewers.retain(|v| v.id() != id);
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    // ── The loop ──────────────────────────────────────────────────────────

    /// One full tick: simulate, broadcast, execute queued commands.
    pub fn step(&mut self) {
        self.world.tick();

        let deltas = self.world.drain_updates();
        if !deltas.is_empty() {
            let envelopes: Vec<ServerEnvelope> =
                deltas.iter().map(ServerEnvelope::from_delta).collect();
            for viewer in &self.viewers {
                viewer.push_updates(envelopes.iter().cloned());
            }
        }

        let viewers = self.viewers.clone();
        for viewer in &viewers {
            for command in viewer.drain_commands() {
                if let Err(error) = execute_command(&mut self.world, &command) {
                    tracing::warn!(%error, ?command, viewer = %viewer.id(), "command failed");
                }
            }
        }

        self.clock.advance();
    }

    /// Run `ticks` iterations at full speed (tests, headless batch runs).
    pub fn run_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            let start = Instant::now();
            self.step();
            self.metrics.record(start.elapsed());
        }
    }

    /// Run at the configured cadence until `total_ticks` (forever when the
    /// config leaves it unset).
    pub fn run(&mut self) {
        let interval = Duration::from_millis(self.clock.tick_interval_ms());
        let total = self.world.config().total_ticks;

        loop {
            if let Some(total) = total
                && self.clock.current_tick.0 >= total
            {
                break;
            }

            let start = Instant::now();
            self.step();
            let elapsed = start.elapsed();
            let workload = self.metrics.record(elapsed);

            match interval.checked_sub(elapsed) {
                Some(remaining) => thread::sleep(remaining),
                None => {
                    tracing::debug!(workload, tick = %self.clock, "tick overran its budget");
                }
            }
        }
    }
}

/// Execute one viewer command against the world.
///
/// Each command maps to exactly one world mutation; failures are reported,
/// never retried.
pub fn execute_command(world: &mut World, command: &ClientCommand) -> RuntimeResult<()> {
    match command {
        ClientCommand::ReceiveShipmentCommand { amount } => {
            let task = Box::new(ReceiveShipmentTask::new(*amount as usize));
            if !world.run_task(task) {
                return Err(RuntimeError::TaskSlotBusy);
            }
        }
        ClientCommand::SendShipmentCommand { amount } => {
            let task = Box::new(SendShipmentTask::new(*amount as usize));
            if !world.run_task(task) {
                return Err(RuntimeError::TaskSlotBusy);
            }
        }
        ClientCommand::TestCommand { target } => {
            let robot = world
                .idle_robot()
                .ok_or(wh_world::WorldError::NoIdleRobot)?;
            if let Some(r) = world.robot_mut(robot) {
                r.assign_task(Box::new(PathfinderTask::new(*target)));
            }
        }
    }
    Ok(())
}
