//! Engine configuration constants and named defaults.
//!
//! # Optimization: Pre-computed Defaults
//!
//! Every fallback value the validation layer can substitute has a named `const`
//! here. Diagnostics reference these names, so a log line like
//! "minValue reset to default 40" always matches what the engine actually used.
//! Derived values (arc splits, wave sample spacing) are computed at compile
//! time instead of per update.

use core::time::Duration;

// =============================================================================
// Signal Range Defaults
// =============================================================================

/// Default lower bound of the visualizable heart rate range (beats/minute).
pub const DEFAULT_MIN_BPM: f32 = 40.0;

/// Default upper bound of the visualizable heart rate range (beats/minute).
pub const DEFAULT_MAX_BPM: f32 = 180.0;

/// Default reference ("normal") heart rate. Visual and color midpoint.
pub const DEFAULT_REFERENCE_BPM: f32 = 70.0;

// =============================================================================
// Gauge Configuration
// =============================================================================

/// Total sweep of the half-circle dial in degrees.
pub const DIAL_SWEEP_DEG: f32 = 180.0;

/// Length of the gauge mask arc path in the dial artwork.
/// The mask reveal is `fill_fraction * MASK_PATH_LENGTH`.
pub const MASK_PATH_LENGTH: f32 = 141.51956;

// =============================================================================
// Sketch Figure Configuration
// =============================================================================

/// Relative divergence from the reference value required to advance one
/// color step. 5% offsets change the color by default.
pub const DEFAULT_LEVEL_OFFSET: f32 = 0.05;

/// Y coordinate of the highest fill level in figure coordinates.
/// Screen Y grows downward, so this is the top of the figure's torso.
pub const FIGURE_Y_MIN: f32 = 89.0;

/// Y coordinate of the lowest fill level in figure coordinates.
pub const FIGURE_Y_MAX: f32 = 176.0;

/// Left and right X bounds of the figure, in figure coordinates.
/// The wave surface spans this range.
pub const FIGURE_X_MIN: f32 = 128.0;
pub const FIGURE_X_MAX: f32 = 164.0;

/// Number of sample points along the wave surface.
/// Enough for a smooth curve across the 36-unit figure width.
pub const WAVE_POINTS: usize = 9;

/// Horizontal distance between adjacent wave sample points.
pub const WAVE_POINT_SPACING: f32 = (FIGURE_X_MAX - FIGURE_X_MIN) / (WAVE_POINTS as f32 - 1.0);

/// Vertical amplitude of the wave perturbation in figure coordinates.
pub const WAVE_AMPLITUDE: f32 = 2.0;

/// Spatial frequency of the wave along the figure width (radians per unit).
pub const WAVE_FREQUENCY: f32 = 0.35;

/// Phase advance per animation tick (radians).
/// At 50 ticks/second this is roughly one full wave period per 1.5 seconds.
pub const WAVE_PHASE_STEP: f32 = 0.085;

// =============================================================================
// Pulsating Heart Configuration
// =============================================================================

/// Default peak scale of the heartbeat keyframe sequence (1 -> 1.5 -> 1).
pub const DEFAULT_SCALE_FACTOR: f32 = 1.5;

/// Lower bound applied to the sample before deriving the beat period.
/// Prevents `60 / bpm` from blowing up for near-zero samples.
pub const BEAT_FLOOR_BPM: f32 = 20.0;

/// Number of beats played per animation cycle. After this many iterations the
/// cycle restarts with a period derived from the most recent sample.
pub const BEAT_CYCLE_ITERATIONS: u32 = 3;

// =============================================================================
// Screen Overlay Configuration
// =============================================================================

/// Default externally exposed tunnel intensity knob value.
pub const DEFAULT_TUNNEL_INTENSITY: f32 = 0.1;

/// Internal rescale applied to the tunnel intensity knob.
///
/// Clients declare intensity intuitively in [0, 1], but only values in
/// (0, 0.1] produce a visible, non-overwhelming vignette. The division is a
/// deliberate UX decision, not a defect.
pub const TUNNEL_INTENSITY_RESCALE: f32 = 10.0;

/// Exponent of the concave blur growth curve (width^0.8 * 0.02).
pub const BLUR_GROWTH_EXPONENT: f32 = 0.8;

/// Scale of the blur growth curve.
pub const BLUR_GROWTH_SCALE: f32 = 0.02;

// =============================================================================
// History Graph Configuration
// =============================================================================

/// Default number of evenly spaced timestamp labels on the x-axis.
/// Also sets the minimum visible time span: the domain never shrinks below
/// `DEFAULT_NUMBER_TIMESTAMPS - 1` seconds even with sparse data.
pub const DEFAULT_NUMBER_TIMESTAMPS: usize = 5;

/// Fixed step between y-axis ticks in beats/minute.
pub const Y_TICK_STEP: f32 = 10.0;

/// Fraction of the plot height kept clear above the largest y value so the
/// top tick label is not cut off.
pub const Y_AXIS_PADDING: f32 = 0.03;

// =============================================================================
// Simulator Layout
// =============================================================================

/// Simulator screen dimensions in pixels.
pub const SCREEN_WIDTH: u32 = 480;
pub const SCREEN_HEIGHT: u32 = 320;

/// Width of one widget panel in the top row (three panels across).
pub const PANEL_WIDTH: u32 = SCREEN_WIDTH / 3;

/// Height of the top widget row; the history chart takes the rest.
pub const PANEL_HEIGHT: u32 = 170;

/// Target frame duration (~50 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(20);
