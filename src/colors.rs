//! Color palette, parsing, and translucency support.
//!
//! Widgets accept colors as CSS-style declarations (named colors, `#rrggbb`,
//! `#rgb`, `rgb(r,g,b)`) so client configuration stays portable across hosts.
//! [`parse_color`] is the single validation point: a declaration either
//! resolves to an [`Rgb888`] or the whole value is rejected and the caller
//! substitutes its documented default.
//!
//! # Translucency
//!
//! Translucent overlays never store a finished RGBA value. They keep the RGB
//! triple in a [`Translucent`] template and append the alpha channel at render
//! time ([`Translucent::with_alpha`]), because the alpha is recomputed from the
//! live signal on every update while the base color is fixed at construction.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

// =============================================================================
// Named Palette (const - zero runtime cost)
// =============================================================================

pub const BLACK: Rgb888 = Rgb888::new(0, 0, 0);
pub const WHITE: Rgb888 = Rgb888::new(255, 255, 255);
pub const RED: Rgb888 = Rgb888::new(255, 0, 0);
pub const LIME: Rgb888 = Rgb888::new(0, 255, 0);
pub const BLUE: Rgb888 = Rgb888::new(0, 0, 255);
pub const YELLOW: Rgb888 = Rgb888::new(255, 255, 0);
pub const ORANGE: Rgb888 = Rgb888::new(255, 165, 0);
pub const AQUA: Rgb888 = Rgb888::new(0, 255, 255);
pub const DEEP_SKY_BLUE: Rgb888 = Rgb888::new(0, 191, 255);
pub const MEDIUM_SPRING_GREEN: Rgb888 = Rgb888::new(0, 250, 154);
pub const GREEN_YELLOW: Rgb888 = Rgb888::new(173, 255, 47);
pub const DARK_CYAN: Rgb888 = Rgb888::new(0, 139, 139);
pub const FOREST_GREEN: Rgb888 = Rgb888::new(34, 139, 34);
pub const KHAKI: Rgb888 = Rgb888::new(240, 230, 140);
pub const STEEL_BLUE: Rgb888 = Rgb888::new(70, 130, 180);
pub const GREEN: Rgb888 = Rgb888::new(0, 128, 0);
pub const PURPLE: Rgb888 = Rgb888::new(128, 0, 128);
pub const PINK: Rgb888 = Rgb888::new(255, 192, 203);
pub const GRAY: Rgb888 = Rgb888::new(128, 128, 128);
pub const CRIMSON: Rgb888 = Rgb888::new(220, 20, 60);

/// Name-to-color lookup table for [`parse_color`].
/// Covers every name the default configurations use plus common extras.
const NAMED_COLORS: &[(&str, Rgb888)] = &[
    ("black", BLACK),
    ("white", WHITE),
    ("red", RED),
    ("lime", LIME),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("orange", ORANGE),
    ("aqua", AQUA),
    ("cyan", AQUA),
    ("deepskyblue", DEEP_SKY_BLUE),
    ("mediumspringgreen", MEDIUM_SPRING_GREEN),
    ("greenyellow", GREEN_YELLOW),
    ("darkcyan", DARK_CYAN),
    ("forestgreen", FOREST_GREEN),
    ("khaki", KHAKI),
    ("steelblue", STEEL_BLUE),
    ("green", GREEN),
    ("purple", PURPLE),
    ("pink", PINK),
    ("gray", GRAY),
    ("grey", GRAY),
    ("crimson", CRIMSON),
];

// =============================================================================
// Color Parsing
// =============================================================================

/// Parse a CSS-style color declaration.
///
/// Accepted forms:
/// - named colors from the palette table (case-insensitive): `"steelblue"`
/// - 6-digit hex: `"#ff8800"`
/// - 3-digit hex: `"#f80"` (each digit doubled)
/// - functional: `"rgb(255, 136, 0)"`
///
/// Returns `None` for anything else. Callers treat `None` as "not a supported
/// color declaration" and either substitute their default or fail
/// construction, depending on whether a safe default exists.
pub fn parse_color(value: &str) -> Option<Rgb888> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(body) = value.strip_prefix("rgb(").and_then(|v| v.strip_suffix(')')) {
        return parse_rgb_components(body);
    }

    let lowered = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, color)| *color)
}

/// Check whether a declaration is a recognized color value.
#[inline]
pub fn is_valid_color(value: &str) -> bool {
    parse_color(value).is_some()
}

/// Diagnostic text for a rejected color declaration.
/// Shared so every widget reports the failure identically.
pub fn unsupported_color_message(value: &str) -> String {
    format!("{value:?} is not a supported color declaration")
}

fn parse_hex(hex: &str) -> Option<Rgb888> {
    match hex.len() {
        6 => {
            let raw = u32::from_str_radix(hex, 16).ok()?;
            Some(Rgb888::new((raw >> 16) as u8, (raw >> 8) as u8, raw as u8))
        }
        3 => {
            let raw = u32::from_str_radix(hex, 16).ok()?;
            let (r, g, b) = ((raw >> 8) as u8 & 0xF, (raw >> 4) as u8 & 0xF, raw as u8 & 0xF);
            // Double each nibble: 0xF -> 0xFF
            Some(Rgb888::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        _ => None,
    }
}

fn parse_rgb_components(body: &str) -> Option<Rgb888> {
    let mut components = body.split(',').map(str::trim);
    let r = components.next()?.parse::<u8>().ok()?;
    let g = components.next()?.parse::<u8>().ok()?;
    let b = components.next()?.parse::<u8>().ok()?;
    if components.next().is_some() {
        return None; // rgb() takes exactly three components
    }
    Some(Rgb888::new(r, g, b))
}

// =============================================================================
// Translucency
// =============================================================================

/// A color with an alpha channel in `[0, 1]`.
///
/// `alpha == 0.0` is fully transparent. Used both for overlay output and for
/// the ancestor-chain background resolution in [`crate::contrast`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb888,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(rgb: Rgb888, alpha: f32) -> Self {
        Self { rgb, alpha }
    }

    /// Fully transparent black, the "no background" layer.
    pub const TRANSPARENT: Self = Self::new(BLACK, 0.0);

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Alpha-blend this color over an opaque background.
    /// Used by renderers that have no native alpha support.
    pub fn over(&self, background: Rgb888) -> Rgb888 {
        let a = self.alpha.clamp(0.0, 1.0);
        let blend = |fg: u8, bg: u8| -> u8 { (f32::from(fg) * a + f32::from(bg) * (1.0 - a)) as u8 };
        Rgb888::new(
            blend(self.rgb.r(), background.r()),
            blend(self.rgb.g(), background.g()),
            blend(self.rgb.b(), background.b()),
        )
    }
}

/// An RGB triple waiting for a runtime-computed alpha channel.
///
/// Widgets with translucent output store their configured color in this
/// template and call [`Translucent::with_alpha`] with a per-update opacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Translucent {
    rgb: Rgb888,
}

impl Translucent {
    pub const fn new(rgb: Rgb888) -> Self {
        Self { rgb }
    }

    /// The base color without alpha.
    #[inline]
    pub const fn rgb(&self) -> Rgb888 {
        self.rgb
    }

    /// Append the alpha channel as a fourth, separately supplied component.
    #[inline]
    pub fn with_alpha(&self, alpha: f32) -> Rgba {
        Rgba::new(self.rgb, alpha.clamp(0.0, 1.0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
