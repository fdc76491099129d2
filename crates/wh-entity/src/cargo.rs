//! The cargo-slot reservation/occupancy protocol.
//!
//! A slot belongs to exactly one carrier at a fixed local offset and moves
//! through three states:
//!
//! ```text
//!            reserve_for             set_cargo
//!   Empty ───────────────▶ Reserved ───────────▶ Occupied
//!     ▲                       │                     │
//!     └── cancel_reservation ─┘                     │
//!     └──────────────── release_cargo ──────────────┘
//! ```
//!
//! Reservation is how tasks claim a destination before the cargo is
//! physically there; a slot never accepts cargo it is reserved against.
//! All cargo references are non-owning `EntityId` handles — the world owns
//! the shelf entities themselves.

use wh_core::{EntityId, Vec3};

/// One cargo-carrying position on a robot, truck, or storage plot.
#[derive(Clone, Debug)]
pub struct CargoSlot {
    offset: Vec3,
    cargo: Option<EntityId>,
    reserved_for: Option<EntityId>,
}

impl CargoSlot {
    pub fn new(offset: Vec3) -> Self {
        Self { offset, cargo: None, reserved_for: None }
    }

    // ── State queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn cargo(&self) -> Option<EntityId> {
        self.cargo
    }

    #[inline]
    pub fn reservation(&self) -> Option<EntityId> {
        self.reserved_for
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.cargo.is_some()
    }

    /// Empty and unreserved — free for any new cargo.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.cargo.is_none() && self.reserved_for.is_none()
    }

    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.reserved_for.is_some()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Claim the slot for `cargo` before it physically arrives.
    ///
    /// Fails (returning `false`, leaving any existing reservation intact)
    /// when the slot is occupied or already reserved.
    pub fn reserve_for(&mut self, cargo: EntityId) -> bool {
        if !self.is_available() {
            return false;
        }
        self.reserved_for = Some(cargo);
        true
    }

    /// Put `cargo` into the slot.
    ///
    /// Succeeds when the slot is fully available (reserving on the fly) or
    /// reserved for exactly this cargo.  Fails when occupied or reserved
    /// for a different unit.
    pub fn set_cargo(&mut self, cargo: EntityId) -> bool {
        if self.cargo.is_some() {
            return false;
        }
        match self.reserved_for {
            None => {
                self.reserved_for = Some(cargo);
                self.cargo = Some(cargo);
                true
            }
            Some(expected) if expected == cargo => {
                self.cargo = Some(cargo);
                true
            }
            Some(_) => false,
        }
    }

    /// Take the cargo out, transferring ownership of the handle to the
    /// caller.  Clears the reservation when it matched the released unit.
    pub fn release_cargo(&mut self) -> Option<EntityId> {
        let cargo = self.cargo.take()?;
        if self.reserved_for == Some(cargo) {
            self.reserved_for = None;
        }
        Some(cargo)
    }

    /// Drop a pending reservation.  Fails when nothing is reserved or the
    /// cargo already arrived.
    pub fn cancel_reservation(&mut self) -> bool {
        if self.cargo.is_some() || self.reserved_for.is_none() {
            return false;
        }
        self.reserved_for = None;
        true
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// World-space position of this slot: the carrier's position plus the
    /// locally-rotated offset.  Occupied slots drag their cargo here every
    /// tick so cargo follows its carrier.
    pub fn world_position(&self, carrier_position: Vec3, carrier_yaw: f32) -> Vec3 {
        carrier_position + self.offset.rotate_y(carrier_yaw)
    }
}
