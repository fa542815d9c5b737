//! Construction errors.
//!
//! Most configuration mistakes are repaired in place with a documented default
//! and a `tracing::warn!` diagnostic. Construction only fails for values where
//! no safe default exists; those cases surface here as typed, catchable errors
//! so callers can distinguish them from success.

use thiserror::Error;

/// Errors that abort widget construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The level offset drives a division; zero or negative values have no
    /// usable substitute.
    #[error("levelOffset {0} must be a positive number representing the relative divergence per color step")]
    InvalidLevelOffset(f32),

    /// A color in a required, client-supplied table could not be parsed.
    /// Falling back would silently change the meaning of every step index.
    #[error("{0:?} is not a supported color declaration")]
    UnsupportedColor(String),

    /// The widget has no render target to size itself against.
    #[error("viewport must have a positive width, got {0}")]
    EmptyViewport(f32),
}
