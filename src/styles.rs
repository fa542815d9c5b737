//! Pre-computed static text styles for the simulator demo.
//!
//! `MonoTextStyle` and `TextStyle` are `const`-constructible in
//! embedded-graphics 0.8, so the fixed-color styles live in read-only data
//! instead of being rebuilt every frame. Styles whose color depends on the
//! widget background (contrast-picked chrome) still need runtime
//! construction; those callers use the exposed font references with
//! `MonoTextStyle::new(LABEL_FONT, color)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb888,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use crate::colors::{GRAY, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text. Used for widget value readouts.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for axis labels on the history chart.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Used for y-axis tick labels.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic contrast-picked styles)
// =============================================================================

/// Small label font (6x10 pixels) for tick labels and widget captions.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Large value font (`ProFont` 24pt) for BPM readouts.
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Small white text for labels on dark backgrounds.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small gray text for axis tick labels.
pub const LABEL_STYLE_GRAY: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Medium white text for the demo window title row.
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Large white text for BPM value readouts (`ProFont` 24pt).
pub const VALUE_STYLE_WHITE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);
