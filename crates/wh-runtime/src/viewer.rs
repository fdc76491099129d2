//! Per-viewer message queues.
//!
//! One `Viewer` is shared (via `Arc`) between the scheduler thread and the
//! viewer's transport thread.  Both queues are mutex-guarded because the
//! two threads touch them from opposite ends: the transport writes inbound
//! and reads outbound, the scheduler does the reverse between ticks.
//! Contention is negligible — each lock is held only to push or swap out a
//! batch.

use std::collections::VecDeque;
use std::sync::Mutex;

use wh_core::ViewerId;

use crate::{ClientCommand, ServerEnvelope};

pub struct Viewer {
    id: ViewerId,
    inbound: Mutex<VecDeque<ClientCommand>>,
    outbound: Mutex<VecDeque<ServerEnvelope>>,
}

impl Viewer {
    pub fn new(id: ViewerId) -> Self {
        Self {
            id,
            inbound: Mutex::new(VecDeque::new()),
            outbound: Mutex::new(VecDeque::new()),
        }
    }

    pub fn id(&self) -> ViewerId {
        self.id
    }

    // ── Transport side ────────────────────────────────────────────────────

    /// Queue a decoded command for execution at the next tick boundary.
    pub fn push_command(&self, command: ClientCommand) {
        self.inbound
            .lock()
            .expect("viewer inbound queue poisoned")
            .push_back(command);
    }

    /// Take every pending outbound envelope (oldest first).
    pub fn drain_outbound(&self) -> Vec<ServerEnvelope> {
        self.outbound
            .lock()
            .expect("viewer outbound queue poisoned")
            .drain(..)
            .collect()
    }

    // ── Scheduler side ────────────────────────────────────────────────────

    /// Take every pending inbound command (oldest first).
    pub fn drain_commands(&self) -> Vec<ClientCommand> {
        self.inbound
            .lock()
            .expect("viewer inbound queue poisoned")
            .drain(..)
            .collect()
    }

    /// Append this tick's envelopes to the outbound queue.
    pub fn push_updates(&self, envelopes: impl IntoIterator<Item = ServerEnvelope>) {
        self.outbound
            .lock()
            .expect("viewer outbound queue poisoned")
            .extend(envelopes);
    }
}
