//! The task framework: multi-tick workflows bound to one target.
//!
//! A task is a little state machine advanced once per simulation tick.  It
//! never blocks — a transition that cannot fire yet simply leaves the state
//! unchanged and tries again next tick (this is how truck-occupancy
//! contention and "wait until arrived" conditions are expressed).  A task
//! terminates only by reaching its own terminal state; there is no
//! cancellation.
//!
//! Robots own a FIFO queue of [`RobotTask`]s and run one to completion
//! before starting the next; the world owns at most one [`WorldTask`].
//! During a tick the owner temporarily takes the task out of its slot, so
//! `tick` receives the full `&mut World` without aliasing the owner.

use wh_core::EntityId;

use crate::World;

/// Whether a task has reached its terminal state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
}

/// Bookkeeping shared by every task: a tick counter and the monotonic
/// finished flag.
#[derive(Clone, Debug, Default)]
pub struct TaskCore {
    ticks: u64,
    finished: bool,
}

impl TaskCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one tick of runtime (stops counting once finished).
    pub fn count_tick(&mut self) {
        if !self.finished {
            self.ticks += 1;
        }
    }

    /// Enter the terminal state.  Idempotent; never un-finishes.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn ticks_run(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn status(&self) -> TaskStatus {
        if self.finished {
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }
}

/// A workflow bound to one robot.
pub trait RobotTask: Send {
    /// Advance one tick.  `robot` is the owning robot's id; the robot itself
    /// is reached through `world` like every other entity.
    fn tick(&mut self, world: &mut World, robot: EntityId) -> TaskStatus;

    /// Short name for completion logging.
    fn name(&self) -> &'static str;

    /// Ticks this task has been running.
    fn ticks_run(&self) -> u64;
}

/// A workflow bound to the world itself (shipment orchestration).
pub trait WorldTask: Send {
    fn tick(&mut self, world: &mut World) -> TaskStatus;

    fn name(&self) -> &'static str;

    fn ticks_run(&self) -> u64;
}
