//! headless — smallest runnable warehouse scenario.
//!
//! Builds the default warehouse, attaches one viewer, queues a
//! receive-shipment command followed by a send-shipment command, and runs
//! the scheduler at full speed until both shipments complete.  The viewer's
//! outbound queue is drained to stdout-as-JSON so the run is observable
//! without any socket transport.

use wh_core::SimConfig;
use wh_runtime::{ClientCommand, Scheduler};
use wh_world::{Layout, World};

const SHIPMENT_SIZE: u32 = 5;
const TICK_BUDGET: u64 = 60_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let world = World::new(SimConfig::default(), Layout::default());
    let mut scheduler = Scheduler::new(world);
    let viewer = scheduler.add_viewer();

    tracing::info!(
        entities = scheduler.world().live_entity_count(),
        "warehouse ready"
    );

    viewer.push_command(ClientCommand::ReceiveShipmentCommand { amount: SHIPMENT_SIZE });
    run_until_idle(&mut scheduler, &viewer);
    tracing::info!(
        stored = scheduler.world().occupied_storage_slots().len(),
        "shipment received"
    );

    viewer.push_command(ClientCommand::SendShipmentCommand { amount: SHIPMENT_SIZE });
    run_until_idle(&mut scheduler, &viewer);
    tracing::info!(
        stored = scheduler.world().occupied_storage_slots().len(),
        avg_workload = scheduler.metrics().average_workload(100),
        ticks = scheduler.metrics().tick_count(),
        "shipment sent"
    );
}

/// Step until the world task slot frees up, echoing a sample of the
/// outbound traffic.
fn run_until_idle(scheduler: &mut Scheduler, viewer: &wh_runtime::Viewer) {
    for tick in 0..TICK_BUDGET {
        scheduler.run_ticks(1);

        // One delta per second of simulated time is plenty for a log.
        let envelopes = viewer.drain_outbound();
        if tick % 24 == 0
            && let Some(sample) = envelopes.first()
            && let Ok(json) = sample.to_json()
        {
            println!("{json}");
        }

        if tick > 0 && !scheduler.world().has_active_task() {
            return;
        }
    }
    tracing::warn!("scenario did not finish within {TICK_BUDGET} ticks");
}
