//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  All movement
//! quantities are stored in per-tick units: configuration speaks in units
//! per second, and [`SimConfig::per_tick`] performs the conversion exactly
//! once, at entity construction.  The wall-clock mapping (tick interval in
//! milliseconds) is only consulted by the scheduler.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 24 ticks per second a u64 lasts ~24 billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick and its wall-clock pacing.
///
/// `TickClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickClock {
    /// Nominal simulation rate in ticks per second.
    pub ticks_per_second: u32,
    /// The current tick — advanced by `TickClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self { ticks_per_second, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// The nominal duration of one tick in milliseconds (`1000 / TPS`).
    #[inline]
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.ticks_per_second as u64
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 / self.ticks_per_second as f64
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Geometry (road graphs, storage plots, reference points) lives in the
/// world layout; this struct only carries the quantities the scheduler and
/// entity constructors need.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulation rate.  The tick interval is `1000 / ticks_per_second` ms.
    pub ticks_per_second: u32,

    /// Total ticks to simulate, or `None` to run until stopped.
    pub total_ticks: Option<u64>,
}

impl SimConfig {
    /// Convert a per-second quantity (speed, acceleration, turn rate) into
    /// the per-tick unit every kinematic field is stored in.
    #[inline]
    pub fn per_tick(&self, per_second: f32) -> f32 {
        per_second / self.ticks_per_second as f32
    }

    /// Construct a `TickClock` pre-configured for this run.
    pub fn make_clock(&self) -> TickClock {
        TickClock::new(self.ticks_per_second)
    }
}

impl Default for SimConfig {
    /// 24 ticks per second — smooth enough for viewers, cheap enough to
    /// never overrun on a laptop.
    fn default() -> Self {
        Self { ticks_per_second: 24, total_ticks: None }
    }
}
