//! Point-to-point pathfinding as a task.

use wh_core::{EntityId, Vec3};
use wh_world::{RobotTask, TaskCore, TaskStatus, World};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Init,
    MoveToDestination,
    Finished,
}

/// Drive one robot to `destination` over the robot graph, then finish.
pub struct PathfinderTask {
    core: TaskCore,
    state: State,
    destination: Vec3,
}

impl PathfinderTask {
    pub fn new(destination: Vec3) -> Self {
        Self { core: TaskCore::new(), state: State::Init, destination }
    }
}

impl RobotTask for PathfinderTask {
    fn tick(&mut self, world: &mut World, robot: EntityId) -> TaskStatus {
        self.core.count_tick();

        match self.state {
            State::Init => {
                world
                    .route_robot(robot, self.destination)
                    .expect("robot route must exist on a connected layout");
                self.state = State::MoveToDestination;
            }
            State::MoveToDestination => {
                let arrived = world.robot(robot).is_some_and(|r| r.is_at_destination());
                if arrived {
                    self.state = State::Finished;
                    self.core.finish();
                }
            }
            State::Finished => {}
        }

        self.core.status()
    }

    fn name(&self) -> &'static str {
        "pathfinder"
    }

    fn ticks_run(&self) -> u64 {
        self.core.ticks_run()
    }
}
