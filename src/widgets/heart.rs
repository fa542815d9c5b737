//! Pulsating heart widget.
//!
//! A heart shape pulses at the pace of the signal itself: each beat scales
//! `1 -> scale_factor -> 1` over `60 / max(bpm, floor)` seconds. The state
//! machine has two states, `Idle` and `Beating`; the first sample moves it to
//! `Beating` (when animation is enabled) and it stays there for the widget's
//! lifetime. Retiming happens at cycle checkpoints, every three beats, using
//! the most recently received sample — see
//! [`BeatCycle`](crate::animations::BeatCycle) for the no-gap restart
//! guarantee.

use embedded_graphics::pixelcolor::Rgb888;
use std::f32::consts::TAU;
use tracing::warn;

use crate::animations::{Animated, BeatCycle};
use crate::colors::{RED, parse_color, unsupported_color_message};
use crate::config::DEFAULT_SCALE_FACTOR;
use crate::error::ConfigError;
use crate::widgets::Widget;

/// Pulsating heart configuration.
#[derive(Clone, Debug)]
pub struct PulsatingHeartConfig {
    /// Peak scale of the beat keyframes. Must be at least 1; smaller or
    /// non-finite values repair to the default 1.5.
    pub scale_factor: f32,
    /// Heart fill color declaration. Unparsable values repair to red.
    pub heart_color: String,
    pub animated: bool,
    pub value_visible: bool,
}

impl Default for PulsatingHeartConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            heart_color: "red".into(),
            animated: true,
            value_visible: true,
        }
    }
}

/// Beat animation state.
#[derive(Clone, Copy, Debug)]
enum BeatState {
    /// No sample received yet; the heart rests at scale 1.
    Idle,
    /// The beat cycle is running.
    Beating(BeatCycle),
}

/// Heart shape pulsing at the sampled heart rate.
pub struct PulsatingHeart {
    scale_factor: f32,
    heart_color: Rgb888,
    animated: bool,
    value_visible: bool,
    last_bpm: f32,
    state: BeatState,
}

impl PulsatingHeart {
    pub fn new(config: PulsatingHeartConfig) -> Result<Self, ConfigError> {
        let mut scale_factor = config.scale_factor;
        if !scale_factor.is_finite() || scale_factor < 1.0 {
            warn!(
                scale_factor,
                "scaleFactor must be a number that is at least 1, default {DEFAULT_SCALE_FACTOR} is applied"
            );
            scale_factor = DEFAULT_SCALE_FACTOR;
        }

        let heart_color = parse_color(&config.heart_color).unwrap_or_else(|| {
            warn!(
                "{}, default color red is applied",
                unsupported_color_message(&config.heart_color)
            );
            RED
        });

        Ok(Self {
            scale_factor,
            heart_color,
            animated: config.animated,
            value_visible: config.value_visible,
            last_bpm: 0.0,
            state: BeatState::Idle,
        })
    }

    /// Current render scale of the heart shape.
    ///
    /// Follows a smooth `1 -> scale_factor -> 1` keyframe curve over each
    /// beat, eased with a cosine so the pulse has no velocity discontinuity
    /// at either keyframe.
    pub fn scale(&self) -> f32 {
        match self.state {
            BeatState::Idle => 1.0,
            BeatState::Beating(cycle) => {
                let progress = cycle.progress();
                1.0 + (self.scale_factor - 1.0) * 0.5 * (1.0 - (TAU * progress).cos())
            }
        }
    }

    /// Seconds per beat of the running cycle, `None` while idle.
    pub fn beat_period(&self) -> Option<f32> {
        match self.state {
            BeatState::Idle => None,
            BeatState::Beating(cycle) => Some(cycle.period()),
        }
    }

    #[inline]
    pub const fn is_beating(&self) -> bool {
        matches!(self.state, BeatState::Beating(_))
    }

    #[inline]
    pub const fn heart_color(&self) -> Rgb888 {
        self.heart_color
    }

    /// The most recently received sample.
    #[inline]
    pub const fn current_value(&self) -> f32 {
        self.last_bpm
    }
}

impl Widget for PulsatingHeart {
    fn update(&mut self, bpm: f32) {
        if !bpm.is_finite() {
            return;
        }
        self.last_bpm = bpm;

        // First sample starts the animation; later samples only retime it
        // at the next cycle checkpoint
        if self.animated && !self.is_beating() {
            self.state = BeatState::Beating(BeatCycle::start(bpm));
        }
    }

    fn value_visible(&self) -> bool {
        self.value_visible
    }
}

impl Animated for PulsatingHeart {
    fn tick(&mut self, dt: f32) {
        if let BeatState::Beating(ref mut cycle) = self.state {
            cycle.advance(dt, self.last_bpm);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_heart() -> PulsatingHeart {
        PulsatingHeart::new(PulsatingHeartConfig::default()).expect("default config is valid")
    }

    // -------------------------------------------------------------------------
    // Construction Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_invalid_scale_factor_repaired() {
        for bad in [0.5, -2.0, f32::NAN] {
            let config = PulsatingHeartConfig { scale_factor: bad, ..PulsatingHeartConfig::default() };
            let heart = PulsatingHeart::new(config).unwrap();
            assert_eq!(
                heart.scale_factor, DEFAULT_SCALE_FACTOR,
                "scale factor {bad} should repair to the default"
            );
        }
    }

    #[test]
    fn test_invalid_color_repairs_to_red() {
        let config = PulsatingHeartConfig {
            heart_color: "heartbeat-magenta".into(),
            ..PulsatingHeartConfig::default()
        };
        let heart = PulsatingHeart::new(config).unwrap();
        assert_eq!(heart.heart_color(), RED);
    }

    // -------------------------------------------------------------------------
    // State Machine Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_idle_until_first_sample() {
        let mut heart = default_heart();
        assert!(!heart.is_beating(), "heart starts idle");
        assert_eq!(heart.scale(), 1.0, "idle heart rests at scale 1");

        heart.update(72.0);
        assert!(heart.is_beating(), "first sample starts the beat");
        assert!((heart.beat_period().unwrap() - 60.0 / 72.0).abs() < 1e-6);
    }

    #[test]
    fn test_animation_disabled_stays_idle() {
        let config = PulsatingHeartConfig { animated: false, ..PulsatingHeartConfig::default() };
        let mut heart = PulsatingHeart::new(config).unwrap();
        heart.update(72.0);
        heart.tick(0.5);
        assert!(!heart.is_beating());
        assert_eq!(heart.scale(), 1.0);
    }

    #[test]
    fn test_scale_peaks_mid_beat() {
        let mut heart = default_heart();
        heart.update(60.0); // 1s beats

        heart.tick(0.5); // halfway through the beat
        assert!(
            (heart.scale() - DEFAULT_SCALE_FACTOR).abs() < 1e-4,
            "scale should peak at scale_factor mid-beat"
        );

        heart.tick(0.4999);
        assert!(heart.scale() < 1.01, "scale should return to 1 at the end of the beat");
    }

    #[test]
    fn test_retiming_uses_latest_sample_at_checkpoint() {
        // Samples [80, 80, 80, 120], one per 3-iteration cycle: the 4th
        // cycle must run at 60/120
        let mut heart = default_heart();
        let cycle_80 = 3.0 * (60.0 / 80.0);

        heart.update(80.0);
        heart.tick(cycle_80);
        heart.update(80.0);
        heart.tick(cycle_80);
        heart.update(80.0);
        heart.tick(cycle_80 - 0.01);
        heart.update(120.0); // arrives just before the checkpoint
        heart.tick(0.01);

        assert!(
            (heart.beat_period().unwrap() - 0.5).abs() < 1e-4,
            "4th cycle should beat at 60/120 = 0.5s, got {:?}",
            heart.beat_period()
        );
    }

    #[test]
    fn test_near_zero_sample_floors_period() {
        let mut heart = default_heart();
        heart.update(0.1);
        let period = heart.beat_period().unwrap();
        assert!((period - 3.0).abs() < 1e-6, "period floors at 60/20 seconds");
    }

    #[test]
    fn test_scale_bounded_over_long_run() {
        let mut heart = default_heart();
        heart.update(110.0);
        for i in 0..2_000 {
            heart.tick(0.02);
            let s = heart.scale();
            assert!(
                (1.0..=DEFAULT_SCALE_FACTOR + 1e-4).contains(&s),
                "tick {i}: scale {s} escaped [1, scale_factor]"
            );
        }
    }
}
