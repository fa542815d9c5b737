//! Half-circle gauge widget.
//!
//! The gauge maps the current sample onto a 180° dial: a needle rotation, a
//! mask reveal exposing the colored gradient arc, and an optional reference
//! line marking the configured normal value. The mapping is stateless per
//! update (a pure function of sample and configuration); only the latest
//! clamped sample is stored.
//!
//! # Gradient Handling
//!
//! Clients may supply their own gradient as `{color, deg}` stops. The stops
//! are sorted ascending by angle before use; a single malformed stop (invalid
//! color, non-finite degree) rejects the whole definition and the default
//! 8-stop rainbow is substituted. The default splits proportionally at the
//! reference angle: four cool stops spread evenly below it, four warm stops
//! above, so the reference value always sits at the cool/warm boundary
//! regardless of where it lies in the range.

use embedded_graphics::pixelcolor::Rgb888;
use tracing::warn;

use crate::colors::{
    AQUA, DEEP_SKY_BLUE, GREEN_YELLOW, LIME, MEDIUM_SPRING_GREEN, ORANGE, RED, YELLOW, parse_color,
    unsupported_color_message,
};
use crate::config::{DIAL_SWEEP_DEG, MASK_PATH_LENGTH};
use crate::error::ConfigError;
use crate::range::SignalRange;
use crate::widgets::Widget;

/// One client-supplied gradient stop: a color declaration and its angle on
/// the dial in degrees.
#[derive(Clone, Debug)]
pub struct GradientStop {
    pub color: String,
    pub deg: f32,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, deg: f32) -> Self {
        Self { color: color.into(), deg }
    }
}

/// A validated gradient stop with its color resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStop {
    pub color: Rgb888,
    pub deg: f32,
}

/// Gauge configuration. All fields repair to documented defaults.
#[derive(Clone, Debug)]
pub struct GaugeConfig {
    pub min_value: f32,
    pub max_value: f32,
    pub reference_value: f32,
    /// Custom gradient stops. Empty means the default gradient.
    pub colors: Vec<GradientStop>,
    pub show_reference_line: bool,
    pub value_visible: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        let range = SignalRange::default_bpm();
        Self {
            min_value: range.min(),
            max_value: range.max(),
            reference_value: range.reference(),
            colors: Vec::new(),
            show_reference_line: true,
            value_visible: true,
        }
    }
}

/// Half-circle gauge for heart rate values.
pub struct Gauge {
    range: SignalRange,
    gradient: Vec<ResolvedStop>,
    show_reference_line: bool,
    value_visible: bool,
    current_bpm: f32,
}

impl Gauge {
    /// Validate the configuration and compute the initial state.
    ///
    /// Gauge construction never fails: every invalid field has a safe default.
    /// The `Result` keeps the construction contract uniform across widgets.
    pub fn new(config: GaugeConfig) -> Result<Self, ConfigError> {
        let range = SignalRange::repaired(config.min_value, config.max_value, config.reference_value);
        let gradient =
            parse_gradient_definition(&config.colors).unwrap_or_else(|| default_gradient(&range));

        Ok(Self {
            range,
            gradient,
            show_reference_line: config.show_reference_line,
            value_visible: config.value_visible,
            current_bpm: range.min(),
        })
    }

    /// Fraction of the dial filled by the current sample, in `[0, 1]`.
    #[inline]
    pub fn fill_fraction(&self) -> f32 {
        self.range.fraction(self.current_bpm)
    }

    /// Needle rotation in degrees, `0` at the minimum and `180` at the
    /// maximum of the range.
    #[inline]
    pub fn needle_angle_deg(&self) -> f32 {
        self.fill_fraction() * DIAL_SWEEP_DEG
    }

    /// Dash offset of the mask arc. Growing the offset reveals more of the
    /// gradient underneath, so higher samples expose a longer arc.
    #[inline]
    pub fn mask_dash_offset(&self) -> f32 {
        self.fill_fraction() * MASK_PATH_LENGTH
    }

    /// Angle of the reference line in the centered dial convention:
    /// `-90°` at the minimum, `+90°` at the maximum.
    #[inline]
    pub fn reference_line_angle_deg(&self) -> f32 {
        self.range.reference_fraction() * DIAL_SWEEP_DEG - 90.0
    }

    /// The gradient stops, sorted ascending by angle.
    #[inline]
    pub fn gradient(&self) -> &[ResolvedStop] {
        &self.gradient
    }

    #[inline]
    pub const fn show_reference_line(&self) -> bool {
        self.show_reference_line
    }

    /// The latest sample after clamping.
    #[inline]
    pub const fn current_value(&self) -> f32 {
        self.current_bpm
    }

    #[inline]
    pub const fn range(&self) -> &SignalRange {
        &self.range
    }
}

impl Widget for Gauge {
    fn update(&mut self, bpm: f32) {
        self.current_bpm = self.range.clamp(bpm);
    }

    fn value_visible(&self) -> bool {
        self.value_visible
    }
}

/// Parse and sort a client-supplied gradient definition.
///
/// Returns `None` (caller substitutes the default) when the definition is
/// empty or any stop is malformed. Partial acceptance would silently shift
/// the meaning of the remaining stops, so the whole definition is rejected.
fn parse_gradient_definition(stops: &[GradientStop]) -> Option<Vec<ResolvedStop>> {
    if stops.is_empty() {
        return None;
    }

    let mut resolved = Vec::with_capacity(stops.len());
    for stop in stops {
        if !stop.deg.is_finite() {
            warn!(
                deg = stop.deg,
                "gradient stop angle must be a finite number of degrees, default gradient is applied"
            );
            return None;
        }
        let Some(color) = parse_color(&stop.color) else {
            warn!(
                "gradient syntax error: {}, default gradient is applied",
                unsupported_color_message(&stop.color)
            );
            return None;
        };
        resolved.push(ResolvedStop { color, deg: stop.deg });
    }

    resolved.sort_by(|a, b| a.deg.total_cmp(&b.deg));
    Some(resolved)
}

/// Synthesize the default 8-stop gradient for a range.
///
/// The below-reference arc gets four cool stops, the above-reference arc four
/// warm stops, each set evenly spaced by angle within its arc.
fn default_gradient(range: &SignalRange) -> Vec<ResolvedStop> {
    const BELOW: [Rgb888; 4] = [DEEP_SKY_BLUE, AQUA, MEDIUM_SPRING_GREEN, LIME];
    const ABOVE: [Rgb888; 4] = [GREEN_YELLOW, YELLOW, ORANGE, RED];

    let reference_angle = range.reference_fraction() * DIAL_SWEEP_DEG;
    let remaining_angle = DIAL_SWEEP_DEG - reference_angle;

    let mut stops = Vec::with_capacity(BELOW.len() + ABOVE.len());
    for (i, color) in BELOW.iter().enumerate() {
        let deg = reference_angle * (i + 1) as f32 / BELOW.len() as f32;
        stops.push(ResolvedStop { color: *color, deg });
    }
    for (i, color) in ABOVE.iter().enumerate() {
        let deg = reference_angle + remaining_angle * (i + 1) as f32 / ABOVE.len() as f32;
        stops.push(ResolvedStop { color: *color, deg });
    }
    stops
}

// =============================================================================
// Unit Tests
// =============================================================================
