//! Screen overlay (vignette) widget.
//!
//! The overlay darkens the edges of its container when the signal climbs
//! above the reference value, like tunnel vision under load. The mapping is a
//! pure function of the sample; there is no animation state.
//!
//! The effect is deliberately asymmetric: samples at or below the reference
//! produce nothing at all, and only the elevated fraction
//! `(sample - reference) / (max - reference)` drives both the shadow spread
//! and its opacity, so the two grow in lockstep by construction.
//!
//! # Intensity Rescale
//!
//! `tunnel_intensity` is exposed as an intuitive `[0, 1]` knob but divided by
//! 10 internally: visual testing showed only a tenth of the declared range
//! produces a visible effect that does not overwhelm the screen. This rescale
//! is a deliberate UX decision, not a defect.

use tracing::{info, warn};

use crate::colors::{RED, Rgba, Translucent, parse_color, unsupported_color_message};
use crate::config::{
    BLUR_GROWTH_EXPONENT, BLUR_GROWTH_SCALE, DEFAULT_REFERENCE_BPM, DEFAULT_TUNNEL_INTENSITY,
    TUNNEL_INTENSITY_RESCALE,
};
use crate::error::ConfigError;
use crate::widgets::Widget;

/// Screen overlay configuration.
#[derive(Clone, Debug)]
pub struct ScreenOverlayConfig {
    pub reference_value: f32,
    /// Vignette color declaration. Unparsable values repair to red.
    pub color: String,
    /// Sample value at which the vignette reaches full strength. Must exceed
    /// the reference; missing or invalid values become `max(ref + 20, 140)`.
    pub max_value: Option<f32>,
    /// Effect strength knob in `[0, 1]`, internally rescaled by /10.
    pub tunnel_intensity: f32,
    /// Width of the render container in pixels. The overlay cannot size its
    /// shadow without a container, so a missing one fails construction.
    pub container_width: f32,
}

impl Default for ScreenOverlayConfig {
    fn default() -> Self {
        Self {
            reference_value: DEFAULT_REFERENCE_BPM,
            color: "red".into(),
            max_value: None,
            tunnel_intensity: DEFAULT_TUNNEL_INTENSITY,
            container_width: 0.0,
        }
    }
}

/// Computed vignette parameters for one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteParams {
    /// Shadow spread in pixels.
    pub spread: f32,
    /// Shadow blur in em units.
    pub blur: f32,
    /// Shadow opacity in `[0, 1]`.
    pub opacity: f32,
    /// The vignette color with the computed opacity applied.
    pub color: Rgba,
}

/// Vignette effect driven by elevated heart rate.
pub struct ScreenOverlay {
    reference: f32,
    max_value: f32,
    tunnel_intensity: f32,
    color: Translucent,
    container_width: f32,
    current_bpm: f32,
}

impl ScreenOverlay {
    pub fn new(config: ScreenOverlayConfig) -> Result<Self, ConfigError> {
        if !config.container_width.is_finite() || config.container_width <= 0.0 {
            return Err(ConfigError::EmptyViewport(config.container_width));
        }

        let mut reference = config.reference_value;
        if !reference.is_finite() || reference < 0.0 {
            warn!(
                reference,
                "referenceValue must be a number that is at least 0, reset to default {DEFAULT_REFERENCE_BPM}"
            );
            reference = DEFAULT_REFERENCE_BPM;
        }

        let fallback_max = (reference + 20.0).max(140.0);
        let max_value = match config.max_value {
            Some(max) if max.is_finite() && max > reference => max,
            Some(max) => {
                warn!(
                    max,
                    reference,
                    "maxValue must not be smaller than referenceValue, set to {fallback_max}"
                );
                fallback_max
            }
            None => {
                info!(
                    "maxValue determines the extent of the tunnel effect and is set to {fallback_max} by default"
                );
                fallback_max
            }
        };

        let tunnel_intensity = if config.tunnel_intensity.is_finite()
            && (0.0..=1.0).contains(&config.tunnel_intensity)
        {
            config.tunnel_intensity / TUNNEL_INTENSITY_RESCALE
        } else {
            warn!(
                intensity = config.tunnel_intensity,
                "tunnelIntensity must be between 0 and 1, default {DEFAULT_TUNNEL_INTENSITY} is applied"
            );
            DEFAULT_TUNNEL_INTENSITY / TUNNEL_INTENSITY_RESCALE
        };

        let color = Translucent::new(parse_color(&config.color).unwrap_or_else(|| {
            warn!(
                "{}, default color red is applied",
                unsupported_color_message(&config.color)
            );
            RED
        }));

        Ok(Self {
            reference,
            max_value,
            tunnel_intensity,
            color,
            container_width: config.container_width,
            current_bpm: reference,
        })
    }

    /// Elevated fraction of the sample above the reference, in `[0, 1]`.
    /// Zero at or below the reference; the necessary condition for any
    /// visible shadow.
    fn positive_offset(&self) -> f32 {
        let offset = (self.current_bpm - self.reference) / (self.max_value - self.reference);
        offset.clamp(0.0, 1.0)
    }

    /// Shadow spread in pixels for the current sample.
    pub fn shadow_spread(&self) -> f32 {
        self.positive_offset() * self.container_width * self.tunnel_intensity
    }

    /// Shadow blur in em units. A concave function of the container width
    /// only; the blur does not react to the signal.
    pub fn shadow_blur(&self) -> f32 {
        self.container_width.powf(BLUR_GROWTH_EXPONENT) * BLUR_GROWTH_SCALE
    }

    /// Shadow opacity for the current sample. Reuses the elevated fraction,
    /// coupling opacity and spread by construction.
    pub fn shadow_opacity(&self) -> f32 {
        self.positive_offset()
    }

    /// All vignette parameters for the current sample.
    pub fn vignette(&self) -> VignetteParams {
        let opacity = self.shadow_opacity();
        VignetteParams {
            spread: self.shadow_spread(),
            blur: self.shadow_blur(),
            opacity,
            color: self.color.with_alpha(opacity),
        }
    }

    #[inline]
    pub const fn current_value(&self) -> f32 {
        self.current_bpm
    }
}

impl Widget for ScreenOverlay {
    fn update(&mut self, bpm: f32) {
        if !bpm.is_finite() {
            return;
        }
        self.current_bpm = bpm;
    }

    fn value_visible(&self) -> bool {
        // The vignette has no numeric display surface
        false
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
