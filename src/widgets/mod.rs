//! The five heart rate widget variants.
//!
//! - [`gauge`]: half-circle dial with gradient arc, needle, and mask reveal
//! - [`sketch`]: sketch figure filled to a level with quantized color and wave
//! - [`heart`]: pulsating heart with a sample-timed beat cycle
//! - [`overlay`]: full-screen vignette driven by elevated heart rate
//! - [`history`]: rolling line chart with an elastic time axis
//!
//! # Architecture
//!
//! Every widget follows the same contract: a config struct with `Default`,
//! a `new(config) -> Result<Self, ConfigError>` constructor that validates and
//! repairs the configuration, and [`Widget::update`] feeding one sample at a
//! time. Widgets own their configuration and animation state exclusively;
//! instances never share state. Animated widgets additionally implement
//! [`Animated`](crate::animations::Animated) and are advanced by the host's
//! periodic ticks.
//!
//! Updates are total over finite input: out-of-range samples clamp, repeated
//! samples are idempotent, and no `update` call ever panics or fails.

pub mod gauge;
pub mod heart;
pub mod history;
pub mod overlay;
pub mod sketch;

pub use gauge::{Gauge, GaugeConfig, GradientStop};
pub use heart::{PulsatingHeart, PulsatingHeartConfig};
pub use history::{HistoryGraph, HistoryGraphConfig, HistoryPoint};
pub use overlay::{ScreenOverlay, ScreenOverlayConfig, VignetteParams};
pub use sketch::{SketchFigure, SketchFigureConfig};

/// Common runtime contract of all widget variants.
///
/// `update` translates the newest sample into the widget's visual parameters.
/// It is idempotent per sample and never fails for finite input; out-of-range
/// values are clamped, not rejected.
pub trait Widget {
    /// Feed the next heart rate sample (beats/minute).
    fn update(&mut self, bpm: f32);

    /// Whether the numeric value display is enabled for this widget.
    fn value_visible(&self) -> bool;
}
