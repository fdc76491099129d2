//! The warehouse floor plan: road graphs, reference points, speed table.
//!
//! Everything the `World` constructor needs to lay out a site.  The default
//! is a compact depot: a 3×4 road grid for robots, a single north-south
//! lane for trucks, six storage plots flanking the roads, and five robot
//! bays along the south wall.

use wh_core::{SimConfig, Vec3};
use wh_entity::Kinematics;
use wh_graph::{Graph, GraphBuilder};

/// Named positions the shipment workflows steer by.
#[derive(Clone, Debug)]
pub struct PointsOfInterest {
    /// Robot bays — one robot is created in each at startup, and robots
    /// return to theirs between jobs.
    pub robot_spawns: Vec<Vec3>,

    /// Where trucks enter the scene.
    pub truck_spawn: Vec3,
    /// Where trucks park for loading/unloading.
    pub truck_stop: Vec3,
    /// Where trucks leave the scene and despawn.
    pub truck_despawn: Vec3,

    /// Where a robot queues for truck access ("RobotQueueStart").
    pub robot_queue_start: Vec3,
    /// Where a robot leaves the truck before re-entering traffic
    /// ("RobotTruckExit").
    pub robot_truck_exit: Vec3,
}

/// Full site description plus the per-second movement constants.
#[derive(Clone, Debug)]
pub struct Layout {
    pub poi: PointsOfInterest,
    pub lane_width: f32,

    /// Road-grid corner positions, linked by `road_links` index pairs.
    pub road_nodes: Vec<Vec3>,
    pub road_links: Vec<(usize, usize)>,

    /// Storage plots as `(position, width, length)`.
    pub storage_plots: Vec<(Vec3, u32, u32)>,

    // Movement constants, units per second (converted per-tick by
    // `SimConfig` at entity construction).
    pub robot_speed: f32,
    pub robot_acceleration: f32,
    pub robot_rotation_speed: f32,
    pub truck_speed: f32,
    pub truck_acceleration: f32,
    pub truck_rotation_speed: f32,
}

impl Layout {
    /// The robot road graph: the declared grid with the truck queue/exit
    /// points spliced onto it, so robots can path all the way to the truck.
    pub fn robot_graph(&self) -> Graph {
        let mut builder = GraphBuilder::new();
        for &(a, b) in &self.road_links {
            builder.road(self.road_nodes[a], self.road_nodes[b], self.lane_width);
        }
        let mut graph = builder.build();
        graph.integrate_vertices(
            &[self.poi.robot_queue_start, self.poi.robot_truck_exit],
            0.0,
        );
        graph
    }

    /// The truck lane: spawn → stop → despawn.
    pub fn truck_graph(&self) -> Graph {
        let mut builder = GraphBuilder::new();
        builder.road(self.poi.truck_spawn, self.poi.truck_stop, self.lane_width);
        if self.poi.truck_despawn != self.poi.truck_spawn {
            builder.road(self.poi.truck_stop, self.poi.truck_despawn, self.lane_width);
        }
        builder.build()
    }

    pub fn robot_kinematics(&self, config: &SimConfig) -> Kinematics {
        Kinematics::new(
            config.per_tick(self.robot_speed),
            config.per_tick(self.robot_acceleration),
            config.per_tick(self.robot_rotation_speed),
        )
    }

    pub fn truck_kinematics(&self, config: &SimConfig) -> Kinematics {
        Kinematics::new(
            config.per_tick(self.truck_speed),
            config.per_tick(self.truck_acceleration),
            config.per_tick(self.truck_rotation_speed),
        )
    }
}

impl Default for Layout {
    fn default() -> Self {
        // The 3×4 road grid, west to east, north to south:
        //
        //   A───B───C        z = 15
        //       │
        //   D───E───F        z = 10
        //       │
        //   G───H───I        z = 5
        //       │
        //   J───K───L        z = 0
        let road_nodes = vec![
            Vec3::new(-6.5, 0.0, 15.0), // 0  A
            Vec3::new(0.0, 0.0, 15.0),  // 1  B
            Vec3::new(6.5, 0.0, 15.0),  // 2  C
            Vec3::new(-6.5, 0.0, 10.0), // 3  D
            Vec3::new(0.0, 0.0, 10.0),  // 4  E
            Vec3::new(6.5, 0.0, 10.0),  // 5  F
            Vec3::new(-6.5, 0.0, 5.0),  // 6  G
            Vec3::new(0.0, 0.0, 5.0),   // 7  H
            Vec3::new(6.5, 0.0, 5.0),   // 8  I
            Vec3::new(-6.5, 0.0, 0.0),  // 9  J
            Vec3::new(0.0, 0.0, 0.0),   // 10 K
            Vec3::new(6.5, 0.0, 0.0),   // 11 L
        ];
        let road_links = vec![
            (0, 1),
            (1, 2),
            (1, 4),
            (3, 4),
            (4, 5),
            (4, 7),
            (6, 7),
            (7, 8),
            (7, 10),
            (9, 10),
            (10, 11),
        ];

        Self {
            poi: PointsOfInterest {
                robot_spawns: vec![
                    Vec3::new(5.0, 0.0, -5.0),
                    Vec3::new(2.5, 0.0, -5.0),
                    Vec3::new(0.0, 0.0, -5.0),
                    Vec3::new(-2.5, 0.0, -5.0),
                    Vec3::new(-5.0, 0.0, -5.0),
                ],
                truck_spawn: Vec3::new(-5.75, -1.5, 150.0),
                truck_stop: Vec3::new(-5.75, -1.5, 42.5),
                truck_despawn: Vec3::new(-5.75, -1.5, 150.0),
                robot_queue_start: Vec3::new(-6.5, 0.0, 24.0),
                robot_truck_exit: Vec3::new(-5.0, 0.0, 24.0),
            },
            lane_width: 2.0,
            road_nodes,
            road_links,
            storage_plots: vec![
                (Vec3::new(-4.0, 0.0, 2.5), 2, 5),
                (Vec3::new(4.0, 0.0, 2.5), 2, 5),
                (Vec3::new(-4.0, 0.0, 7.5), 2, 5),
                (Vec3::new(4.0, 0.0, 7.5), 2, 5),
                (Vec3::new(-4.0, 0.0, 12.5), 2, 5),
                (Vec3::new(4.0, 0.0, 12.5), 2, 5),
            ],
            robot_speed: 8.0,
            robot_acceleration: 2.0,
            robot_rotation_speed: 6.0,
            truck_speed: 15.0,
            truck_acceleration: 1.2,
            truck_rotation_speed: 5.0,
        }
    }
}
