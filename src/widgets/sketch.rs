//! Sketch figure widget: fill level, quantized color, wave surface.
//!
//! The figure fills like a vessel: low samples sit near the bottom of the
//! torso, high samples near the top. Two independent mappings run per sample:
//!
//! - **Fill level**: the visualizable band around the reference value is
//!   derived from the color table geometry (`level_offset` per step, plus one
//!   extra step of headroom on each side), then the sample maps linearly onto
//!   the figure's Y band, inverted because screen Y grows downward.
//! - **Fill color**: the relative divergence from the reference is quantized
//!   into whole color steps (`floor(offset / level_offset)`, ties rounded
//!   down) and indexed symmetrically around the reference color, saturating
//!   at the table bounds. Divergence below one `level_offset` never changes
//!   the color, so small fluctuations cannot flicker.
//!
//! # Wave Animation
//!
//! When animated, the fill surface is a small set of sample points across the
//! figure width, each offset by `amplitude * sin(frequency * x + phase)`. The
//! phase accumulator advances a fixed step per tick independently of sample
//! updates, and the surface is regenerated around the *current* fill level on
//! every tick, so the wave rides the latest level even between samples.

use embedded_graphics::pixelcolor::Rgb888;
use tracing::warn;

use crate::animations::{Animated, WavePhase};
use crate::colors::{DARK_CYAN, FOREST_GREEN, KHAKI, ORANGE, RED, parse_color};
use crate::config::{
    DEFAULT_LEVEL_OFFSET, DEFAULT_REFERENCE_BPM, FIGURE_X_MIN, FIGURE_Y_MAX, FIGURE_Y_MIN, WAVE_AMPLITUDE,
    WAVE_FREQUENCY, WAVE_PHASE_STEP, WAVE_POINT_SPACING, WAVE_POINTS,
};
use crate::error::ConfigError;
use crate::widgets::Widget;

/// Sketch figure configuration.
#[derive(Clone, Debug)]
pub struct SketchFigureConfig {
    pub reference_value: f32,
    pub value_visible: bool,
    /// Relative divergence from the reference required per color step.
    /// Must be a positive finite number; there is no safe default to
    /// substitute for garbage here, so invalid values fail construction.
    pub level_offset: f32,
    /// Ordered color table, coolest to warmest. Empty means the default
    /// 5-step table. Every entry must parse; a required color that does not
    /// fails construction.
    pub color_steps: Vec<String>,
    /// Index of the color shown at the reference value. `None` or an
    /// out-of-range index falls back to 1 for tables of 3+ colors, else 0.
    pub reference_color_index: Option<usize>,
    pub animated: bool,
}

impl Default for SketchFigureConfig {
    fn default() -> Self {
        Self {
            reference_value: DEFAULT_REFERENCE_BPM,
            value_visible: true,
            level_offset: DEFAULT_LEVEL_OFFSET,
            color_steps: Vec::new(),
            reference_color_index: None,
            animated: true,
        }
    }
}

/// Default 5-step color table, coolest to warmest.
const DEFAULT_COLOR_STEPS: [Rgb888; 5] = [DARK_CYAN, FOREST_GREEN, KHAKI, ORANGE, RED];

/// Sketch figure visualization of heart rate.
pub struct SketchFigure {
    reference: f32,
    level_offset: f32,
    color_steps: Vec<Rgb888>,
    reference_index: usize,
    animated: bool,
    value_visible: bool,
    current_bpm: f32,
    wave: WavePhase,
}

impl SketchFigure {
    pub fn new(config: SketchFigureConfig) -> Result<Self, ConfigError> {
        if !config.level_offset.is_finite() || config.level_offset <= 0.0 {
            return Err(ConfigError::InvalidLevelOffset(config.level_offset));
        }

        // A non-positive reference would zero the divergence denominator and
        // poison every color and level calculation
        let mut reference = config.reference_value;
        if !reference.is_finite() || reference <= 0.0 {
            warn!(
                reference,
                "referenceValue must be a positive number, reset to default {DEFAULT_REFERENCE_BPM}"
            );
            reference = DEFAULT_REFERENCE_BPM;
        }

        let color_steps = if config.color_steps.is_empty() {
            DEFAULT_COLOR_STEPS.to_vec()
        } else {
            let mut parsed = Vec::with_capacity(config.color_steps.len());
            for declaration in &config.color_steps {
                let color = parse_color(declaration)
                    .ok_or_else(|| ConfigError::UnsupportedColor(declaration.clone()))?;
                parsed.push(color);
            }
            parsed
        };

        let default_index = if color_steps.len() >= 3 { 1 } else { 0 };
        let reference_index = match config.reference_color_index {
            Some(index) if index < color_steps.len() => index,
            Some(index) => {
                warn!(
                    index,
                    steps = color_steps.len(),
                    "referenceColorIndex is outside the color table, default {default_index} is applied"
                );
                default_index
            }
            None => default_index,
        };

        Ok(Self {
            reference,
            level_offset: config.level_offset,
            color_steps,
            reference_index,
            animated: config.animated,
            value_visible: config.value_visible,
            current_bpm: reference,
            wave: WavePhase::new(),
        })
    }

    /// Y coordinate of the fill surface for a sample, clamped to the figure.
    ///
    /// The visualizable band extends one step past each end of the color
    /// table so the extreme colors still have room to display as levels.
    pub fn fill_level_y(&self, bpm: f32) -> f32 {
        let steps_above = (self.color_steps.len() - 1 - self.reference_index) as f32;
        let steps_below = self.reference_index as f32;
        let max_visualizable = self.reference + self.reference * self.level_offset * (steps_above + 1.0);
        let min_visualizable = self.reference - self.reference * self.level_offset * (steps_below + 1.0);

        let coordinate_per_bpm = (FIGURE_Y_MAX - FIGURE_Y_MIN) / (max_visualizable - min_visualizable);
        let y = FIGURE_Y_MAX - (bpm - min_visualizable) * coordinate_per_bpm;
        y.clamp(FIGURE_Y_MIN, FIGURE_Y_MAX)
    }

    /// Fill color for a sample, quantized symmetrically around the reference.
    pub fn fill_color(&self, bpm: f32) -> Rgb888 {
        let offset = (bpm - self.reference).abs() / self.reference;
        // Saturating cast: enormous divergence just pins the extreme color
        let steps = (offset / self.level_offset).floor() as usize;

        let index = if bpm <= self.reference {
            self.reference_index.saturating_sub(steps)
        } else {
            self.reference_index
                .saturating_add(steps)
                .min(self.color_steps.len() - 1)
        };
        self.color_steps[index]
    }

    /// The fill surface as sample points `(x, y)` across the figure width,
    /// perturbed by the wave around the current fill level.
    ///
    /// Without animation the surface is flat at the current fill level.
    pub fn wave_surface(&self) -> [(f32, f32); WAVE_POINTS] {
        let base_y = self.fill_level_y(self.current_bpm);
        let mut points = [(0.0, base_y); WAVE_POINTS];
        for (i, point) in points.iter_mut().enumerate() {
            let x = FIGURE_X_MIN + i as f32 * WAVE_POINT_SPACING;
            point.0 = x;
            if self.animated {
                point.1 = base_y
                    + WAVE_AMPLITUDE * (WAVE_FREQUENCY * x + self.wave.value()).sin();
            }
        }
        points
    }

    /// The latest accepted sample.
    #[inline]
    pub const fn current_value(&self) -> f32 {
        self.current_bpm
    }

    /// Fill color of the latest sample.
    #[inline]
    pub fn current_color(&self) -> Rgb888 {
        self.fill_color(self.current_bpm)
    }

    #[inline]
    pub const fn is_animated(&self) -> bool {
        self.animated
    }

    #[inline]
    pub fn color_steps(&self) -> &[Rgb888] {
        &self.color_steps
    }
}

impl Widget for SketchFigure {
    fn update(&mut self, bpm: f32) {
        // Non-finite samples carry no level information; keep the last state
        if !bpm.is_finite() {
            return;
        }
        self.current_bpm = bpm;
    }

    fn value_visible(&self) -> bool {
        self.value_visible
    }
}

impl Animated for SketchFigure {
    fn tick(&mut self, _dt: f32) {
        // Fixed phase step per tick; the host's tick cadence sets wave speed
        if self.animated {
            self.wave.step(WAVE_PHASE_STEP);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_figure() -> SketchFigure {
        SketchFigure::new(SketchFigureConfig::default()).expect("default config is valid")
    }

    // -------------------------------------------------------------------------
    // Construction Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_default_color_table() {
        let figure = default_figure();
        assert_eq!(figure.color_steps().len(), 5);
        assert_eq!(figure.reference_index, 1, "5-step table defaults to reference index 1");
    }

    #[test]
    fn test_two_step_table_reference_index_zero() {
        let config = SketchFigureConfig {
            color_steps: vec!["lime".into(), "red".into()],
            ..SketchFigureConfig::default()
        };
        let figure = SketchFigure::new(config).unwrap();
        assert_eq!(figure.reference_index, 0, "tables under 3 colors default to index 0");
    }

    #[test]
    fn test_out_of_range_reference_index_repaired() {
        let config = SketchFigureConfig {
            reference_color_index: Some(9),
            ..SketchFigureConfig::default()
        };
        let figure = SketchFigure::new(config).unwrap();
        assert_eq!(figure.reference_index, 1, "out-of-range index falls back to the default");
    }

    #[test]
    fn test_invalid_level_offset_fails_construction() {
        for bad in [0.0, -0.05, f32::NAN] {
            let config = SketchFigureConfig { level_offset: bad, ..SketchFigureConfig::default() };
            assert!(
                matches!(SketchFigure::new(config), Err(ConfigError::InvalidLevelOffset(_))),
                "level offset {bad} must abort construction"
            );
        }
    }

    #[test]
    fn test_unparsable_color_step_fails_construction() {
        let config = SketchFigureConfig {
            color_steps: vec!["lime".into(), "definitely-not-a-color".into()],
            ..SketchFigureConfig::default()
        };
        assert!(matches!(
            SketchFigure::new(config),
            Err(ConfigError::UnsupportedColor(_))
        ));
    }

    // -------------------------------------------------------------------------
    // Fill Level Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_fill_level_band_endpoints() {
        // Defaults: ref=70, offset=0.05, index=1 of 5
        // steps_above=3, steps_below=1
        // max_vis = 70 + 70*0.05*4 = 84, min_vis = 70 - 70*0.05*2 = 63
        let figure = default_figure();
        assert!((figure.fill_level_y(63.0) - FIGURE_Y_MAX).abs() < 1e-3, "band minimum sits at the bottom");
        assert!((figure.fill_level_y(84.0) - FIGURE_Y_MIN).abs() < 1e-3, "band maximum sits at the top");
    }

    #[test]
    fn test_fill_level_inverted_and_clamped() {
        let figure = default_figure();
        let low = figure.fill_level_y(65.0);
        let high = figure.fill_level_y(80.0);
        assert!(high < low, "higher samples fill higher (smaller Y)");

        assert_eq!(figure.fill_level_y(0.0), FIGURE_Y_MAX, "far-below samples clamp to the bottom");
        assert_eq!(figure.fill_level_y(500.0), FIGURE_Y_MIN, "far-above samples clamp to the top");
    }

    // -------------------------------------------------------------------------
    // Color Quantization Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_reference_sample_keeps_reference_color() {
        let figure = default_figure();
        assert_eq!(figure.fill_color(70.0), FOREST_GREEN);
    }

    #[test]
    fn test_sub_step_divergence_never_changes_color() {
        // One level offset is 5% of 70 = 3.5 bpm; anything under it holds
        let figure = default_figure();
        assert_eq!(figure.fill_color(73.4), FOREST_GREEN);
        assert_eq!(figure.fill_color(66.6), FOREST_GREEN);
    }

    #[test]
    fn test_color_selection_symmetric() {
        // Equal divergence selects steps equidistant from the reference index
        let figure = default_figure();
        assert_eq!(figure.fill_color(73.5), KHAKI, "one step above reference");
        assert_eq!(figure.fill_color(66.5), DARK_CYAN, "one step below reference");

        // floor quantization: ties round down in both directions
        assert_eq!(figure.fill_color(70.0 + 3.49), FOREST_GREEN);
        assert_eq!(figure.fill_color(70.0 - 3.49), FOREST_GREEN);
    }

    #[test]
    fn test_color_saturates_at_table_bounds() {
        let figure = default_figure();
        assert_eq!(figure.fill_color(500.0), RED, "large positive divergence pins the warmest color");
        assert_eq!(figure.fill_color(1.0), DARK_CYAN, "large negative divergence pins the coolest color");
    }

    // -------------------------------------------------------------------------
    // Wave Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_wave_surface_rides_current_level() {
        let mut figure = default_figure();
        figure.update(80.0);
        let base = figure.fill_level_y(80.0);
        for (x, y) in figure.wave_surface() {
            assert!((y - base).abs() <= WAVE_AMPLITUDE + 1e-4, "wave stays within amplitude of the level");
            assert!((FIGURE_X_MIN..=164.0 + 1e-3).contains(&x));
        }
    }

    #[test]
    fn test_wave_surface_moves_between_samples() {
        // Ticks perturb the surface without any new sample arriving
        let mut figure = default_figure();
        figure.update(75.0);
        let before = figure.wave_surface();
        figure.tick(0.02);
        figure.tick(0.02);
        let after = figure.wave_surface();
        assert_ne!(before, after, "ticks alone must move the wave surface");
    }

    #[test]
    fn test_unanimated_surface_is_flat() {
        let config = SketchFigureConfig { animated: false, ..SketchFigureConfig::default() };
        let mut figure = SketchFigure::new(config).unwrap();
        figure.update(75.0);
        figure.tick(0.02);
        let base = figure.fill_level_y(75.0);
        for (_, y) in figure.wave_surface() {
            assert_eq!(y, base, "non-animated fill surface is flat");
        }
    }

    #[test]
    fn test_non_finite_sample_ignored() {
        let mut figure = default_figure();
        figure.update(90.0);
        figure.update(f32::NAN);
        assert_eq!(figure.current_value(), 90.0, "NaN samples must not corrupt state");
    }
}
