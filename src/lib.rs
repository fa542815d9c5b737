//! Heart rate visualization widget engine.
//!
//! This library maps a stream of heart rate samples (beats/minute) onto the
//! visual parameters of five widget variants: a half-circle gauge, a sketch
//! figure that fills like a vessel, a pulsating heart, a full-screen vignette,
//! and a rolling history chart. All of the signal-to-visual math lives here
//! and is testable on the host; the binary (`main.rs`) adds the simulator
//! window and a synthetic signal.
//!
//! # Architecture
//!
//! Each widget is an independent state machine: construct it from its config
//! struct, feed samples through [`widgets::Widget::update`], and advance any
//! animation through [`animations::Animated::tick`]. Construction validates
//! the configuration, repairing recoverable mistakes to documented defaults
//! (with a `tracing` warning) and failing with [`error::ConfigError`] only
//! where no safe default exists.
//!
//! ```
//! use heartrate_widgets::widgets::{Gauge, GaugeConfig, Widget};
//!
//! let mut gauge = Gauge::new(GaugeConfig::default()).unwrap();
//! gauge.update(72.0);
//! assert!(gauge.needle_angle_deg() > 0.0);
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

// === Signal mapping and animation (pure logic, testable on host) ===

pub mod animations;
pub mod colors;
pub mod config;
pub mod contrast;
pub mod error;
pub mod range;
pub mod widgets;

// === Simulator rendering support ===

pub mod render;
pub mod styles;

pub use error::ConfigError;
pub use range::SignalRange;
pub use widgets::Widget;
