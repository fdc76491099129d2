//! Unit tests for wh-runtime.

#[cfg(test)]
mod helpers {
    use wh_core::SimConfig;
    use wh_world::{Layout, World};

    use crate::Scheduler;

    pub fn small_world() -> World {
        let mut layout = Layout::default();
        layout.poi.robot_spawns.truncate(2);
        layout.storage_plots.truncate(1);
        World::new(SimConfig::default(), layout)
    }

    pub fn scheduler() -> Scheduler {
        Scheduler::new(small_world())
    }
}

#[cfg(test)]
mod decoding {
    use wh_core::Vec3;

    use crate::protocol::decode;
    use crate::ClientCommand;

    #[test]
    fn receive_shipment_command() {
        let cmd = decode(r#"{"type":"ReceiveShipmentCommand","parameters":{"amount":3}}"#)
            .unwrap();
        assert_eq!(cmd, ClientCommand::ReceiveShipmentCommand { amount: 3 });
    }

    #[test]
    fn send_shipment_command() {
        let cmd = decode(r#"{"type":"SendShipmentCommand","parameters":{"amount":7}}"#)
            .unwrap();
        assert_eq!(cmd, ClientCommand::SendShipmentCommand { amount: 7 });
    }

    #[test]
    fn test_command_carries_a_vector() {
        let cmd = decode(
            r#"{"type":"TestCommand","parameters":{"target":{"x":1.0,"y":0.0,"z":-2.5}}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            ClientCommand::TestCommand { target: Vec3::new(1.0, 0.0, -2.5) }
        );
    }

    #[test]
    fn unknown_command_type_is_an_error() {
        assert!(decode(r#"{"type":"FormatDiskCommand","parameters":{}}"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(decode("{{{").is_err());
    }
}

#[cfg(test)]
mod encoding {
    use wh_core::Vec3;
    use wh_entity::EntityKind;
    use wh_world::EntityDelta;

    use crate::ServerEnvelope;

    fn update_delta(door_open: Option<bool>) -> EntityDelta {
        EntityDelta::Update {
            guid: uuid::Uuid::new_v4(),
            kind: EntityKind::Truck,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            door_open,
        }
    }

    #[test]
    fn update_envelope_shape() {
        let envelope = ServerEnvelope::from_delta(&update_delta(Some(true)));
        let json: serde_json::Value =
            serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

        assert_eq!(json["command"], "UpdateModel3DCommand");
        assert!(json["id"].is_string());
        assert_eq!(json["parameters"]["Type"], "truck");
        assert_eq!(json["parameters"]["X"], 1.0);
        assert_eq!(json["parameters"]["Z"], 3.0);
        assert_eq!(json["parameters"]["RotationY"], 0.0);
        assert_eq!(json["parameters"]["DoorOpen"], true);
    }

    #[test]
    fn doorless_update_omits_the_field() {
        let envelope = ServerEnvelope::from_delta(&update_delta(None));
        let json: serde_json::Value =
            serde_json::from_str(&envelope.to_json().unwrap()).unwrap();
        assert!(json["parameters"].get("DoorOpen").is_none());
    }

    #[test]
    fn discard_envelope_shape() {
        let guid = uuid::Uuid::new_v4();
        let envelope = ServerEnvelope::from_delta(&EntityDelta::Discard { guid });
        let json: serde_json::Value =
            serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

        assert_eq!(json["command"], "DiscardModel3DCommand");
        assert_eq!(json["parameters"]["Guid"], guid.to_string());
    }
}

#[cfg(test)]
mod viewers {
    use wh_core::ViewerId;

    use crate::{ClientCommand, Viewer};

    #[test]
    fn inbound_queue_is_fifo() {
        let viewer = Viewer::new(ViewerId(0));
        viewer.push_command(ClientCommand::ReceiveShipmentCommand { amount: 1 });
        viewer.push_command(ClientCommand::SendShipmentCommand { amount: 2 });

        let drained = viewer.drain_commands();
        assert_eq!(
            drained,
            vec![
                ClientCommand::ReceiveShipmentCommand { amount: 1 },
                ClientCommand::SendShipmentCommand { amount: 2 },
            ]
        );
        assert!(viewer.drain_commands().is_empty());
    }
}

#[cfg(test)]
mod scheduling {
    use std::time::Duration;

    use wh_core::Vec3;

    use super::helpers::scheduler;
    use crate::{execute_command, ClientCommand, RuntimeError, TickMetrics};

    #[test]
    fn new_viewer_receives_a_snapshot() {
        let mut sched = scheduler();
        let viewer = sched.add_viewer();
        let snapshot = viewer.drain_outbound();
        assert_eq!(snapshot.len(), sched.world().live_entity_count());
    }

    #[test]
    fn step_broadcasts_fresh_state_once() {
        let mut sched = scheduler();
        let viewer = sched.add_viewer();
        viewer.drain_outbound();

        sched.step();
        // Every entity was freshly created (dirty), so the first tick
        // re-broadcasts them all; the second tick is quiet.
        assert_eq!(viewer.drain_outbound().len(), sched.world().live_entity_count());
        sched.step();
        assert!(viewer.drain_outbound().is_empty());
    }

    #[test]
    fn queued_command_executes_between_ticks() {
        let mut sched = scheduler();
        let viewer = sched.add_viewer();

        viewer.push_command(ClientCommand::ReceiveShipmentCommand { amount: 1 });
        assert!(!sched.world().has_active_task());
        sched.step();
        assert!(sched.world().has_active_task());
    }

    #[test]
    fn failing_command_does_not_stop_the_tick() {
        let mut sched = scheduler();
        let viewer = sched.add_viewer();

        // Two shipment commands: the second hits the busy task slot and is
        // dropped, the simulation keeps running.
        viewer.push_command(ClientCommand::ReceiveShipmentCommand { amount: 1 });
        viewer.push_command(ClientCommand::SendShipmentCommand { amount: 1 });
        sched.step();
        assert!(sched.world().has_active_task());
        sched.step(); // still alive
    }

    #[test]
    fn test_command_dispatches_an_idle_robot() {
        let mut sched = scheduler();
        let robot = sched.world().idle_robot().unwrap();

        execute_command(
            sched.world_mut(),
            &ClientCommand::TestCommand { target: Vec3::new(0.0, 0.0, 15.0) },
        )
        .unwrap();
        assert!(!sched.world().robot(robot).unwrap().is_standby());
    }

    #[test]
    fn busy_task_slot_is_reported() {
        let mut sched = scheduler();
        execute_command(
            sched.world_mut(),
            &ClientCommand::ReceiveShipmentCommand { amount: 1 },
        )
        .unwrap();

        let second = execute_command(
            sched.world_mut(),
            &ClientCommand::SendShipmentCommand { amount: 1 },
        );
        assert!(matches!(second, Err(RuntimeError::TaskSlotBusy)));
    }

    #[test]
    fn clock_advances_per_step() {
        let mut sched = scheduler();
        sched.run_ticks(3);
        assert_eq!(sched.clock().current_tick.0, 3);
        assert_eq!(sched.metrics().tick_count(), 3);
    }

    #[test]
    fn workload_math() {
        let mut metrics = TickMetrics::new(40);
        assert_eq!(metrics.record(Duration::from_millis(20)), 0.5);
        assert_eq!(metrics.record(Duration::from_millis(60)), 1.5); // overrun
        assert_eq!(metrics.last_workload(), 1.5);
        assert_eq!(metrics.average_workload(2), 1.0);
        assert_eq!(metrics.max_workload(2), 1.5);
        assert_eq!(metrics.average_workload(0), 0.0);
    }
}
