//! Periodic animation state machines shared by the widgets.
//!
//! Two cyclic animations exist in the engine:
//! - **Wave motion** ([`WavePhase`]): a continuous perturbation of the sketch
//!   figure's fill surface, advanced a fixed phase step per tick.
//! - **Heartbeat pulse** ([`BeatCycle`]): a scale keyframe sequence whose
//!   period is derived from the latest sample and re-derived at fixed
//!   checkpoints.
//!
//! # Tick Model
//!
//! The engine never owns a timer. A host loop calls [`Animated::tick`] with
//! the elapsed time since the previous tick; between ticks nothing moves.
//! Tick handlers read the widget's *latest* committed state (current fill
//! level, most recent sample), never a snapshot taken when the animation
//! started. Dropping a widget drops its animation state with it, so no
//! pending cycle can outlive its widget.

use std::f32::consts::TAU;

use crate::config::{BEAT_CYCLE_ITERATIONS, BEAT_FLOOR_BPM};

/// A component advanced by the host's periodic animation ticks.
pub trait Animated {
    /// Advance the animation by `dt` seconds.
    ///
    /// `dt` is the host's tick interval; fixed-step animations (the wave)
    /// ignore it and move one step per call.
    fn tick(&mut self, dt: f32);
}

// =============================================================================
// Wave Phase Accumulator
// =============================================================================

/// Monotonically advancing wave phase, wrapped modulo 2π.
///
/// The wrap keeps the accumulator from growing without bound over long
/// sessions; `sin` is periodic, so wrapping never produces a visible jump.
#[derive(Clone, Copy, Debug, Default)]
pub struct WavePhase {
    phase: f32,
}

impl WavePhase {
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase in `[0, 2π)`.
    #[inline]
    pub const fn value(&self) -> f32 {
        self.phase
    }

    /// Advance the phase by one fixed step.
    #[inline]
    pub fn step(&mut self, step: f32) {
        self.phase = (self.phase + step) % TAU;
    }
}

// =============================================================================
// Heartbeat Cycle State Machine
// =============================================================================

/// One animation cycle of the pulsating heart.
///
/// A cycle plays [`BEAT_CYCLE_ITERATIONS`] beats, each lasting
/// `60 / max(bpm, BEAT_FLOOR_BPM)` seconds. When the iterations complete the
/// cycle restarts immediately with a period derived from the most recently
/// received sample: leftover tick time rolls into the new cycle, so retiming
/// neither leaves a gap nor double-plays a beat. This amortized re-timing is
/// how the pulse adapts to a changing heart rate without restarting on every
/// single sample.
#[derive(Clone, Copy, Debug)]
pub struct BeatCycle {
    /// Seconds per beat in the current cycle.
    period: f32,

    /// Time elapsed within the current beat, `0 <= elapsed < period`.
    elapsed: f32,

    /// Beats remaining in the current cycle, counts down from
    /// `BEAT_CYCLE_ITERATIONS`.
    iterations_left: u32,

    /// Number of completed cycles since the animation started.
    completed_cycles: u32,
}

impl BeatCycle {
    /// Derive the beat period from a sample, with the divide-by-zero floor.
    #[inline]
    fn period_for(bpm: f32) -> f32 {
        60.0 / bpm.max(BEAT_FLOOR_BPM)
    }

    /// Start a new cycle timed from the given sample.
    pub fn start(bpm: f32) -> Self {
        Self {
            period: Self::period_for(bpm),
            elapsed: 0.0,
            iterations_left: BEAT_CYCLE_ITERATIONS,
            completed_cycles: 0,
        }
    }

    /// Advance the cycle by `dt` seconds.
    ///
    /// `latest_bpm` is the most recently received sample; it is only read at
    /// cycle boundaries, where the next cycle's period is derived from it.
    pub fn advance(&mut self, dt: f32, latest_bpm: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;

        // Consume whole beats, re-deriving the period whenever a full cycle
        // of iterations completes. Leftover time carries into the new cycle.
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.iterations_left -= 1;
            if self.iterations_left == 0 {
                self.period = Self::period_for(latest_bpm);
                self.iterations_left = BEAT_CYCLE_ITERATIONS;
                self.completed_cycles += 1;
            }
        }
    }

    /// Progress through the current beat, in `[0, 1)`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.elapsed / self.period
    }

    /// Seconds per beat in the current cycle.
    #[inline]
    pub const fn period(&self) -> f32 {
        self.period
    }

    /// Completed cycles since the animation started.
    #[inline]
    pub const fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
