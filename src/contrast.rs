//! Background resolution and black/white contrast decisions.
//!
//! Widgets must stay legible against an arbitrary host background. The host
//! hands the engine an ordered ancestor chain of background layers (innermost
//! container first); [`resolve_background_color`] walks it outward until a
//! non-transparent layer is found and falls back to opaque white at the root.
//! [`contrasting_color`] then picks black or white chrome for that background.
//!
//! The brightness formula is the W3C AERT color-contrast weighting
//! (0.299 R + 0.587 G + 0.114 B): human eyes perceive green as brighter than
//! red or blue, so the channels are weighted accordingly.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::colors::{BLACK, Rgba, WHITE};

/// Brightness threshold for the black/white decision.
///
/// Deliberately low: anything brighter than a quarter of full brightness gets
/// black chrome, matching the perceptual bias toward light UI backgrounds.
const CONTRAST_THRESHOLD: f32 = 0.25;

/// Perceived brightness of a color, in `[0, 1]` where 1 is brightest.
#[inline]
pub fn brightness(color: Rgb888) -> f32 {
    let r = f32::from(color.r());
    let g = f32::from(color.g());
    let b = f32::from(color.b());
    r.mul_add(0.299, g.mul_add(0.587, b * 0.114)) / 255.0
}

/// Pick black or white chrome for the given background color.
///
/// Bright backgrounds get black elements, dark backgrounds get white.
#[inline]
pub fn contrasting_color(background: Rgb888) -> Rgb888 {
    if brightness(background) > CONTRAST_THRESHOLD { BLACK } else { WHITE }
}

/// Resolve the optical background color of a container.
///
/// `ancestors` is the container's background layer followed by its ancestors
/// in order, outermost last. The first non-transparent layer wins. If the
/// chain is exhausted without finding one (root reached, or no container at
/// all), opaque white is returned.
pub fn resolve_background_color<I>(ancestors: I) -> Rgb888
where
    I: IntoIterator<Item = Rgba>,
{
    ancestors
        .into_iter()
        .find(|layer| !layer.is_transparent())
        .map_or(WHITE, |layer| layer.rgb)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ORANGE, RED, STEEL_BLUE, YELLOW};

    // -------------------------------------------------------------------------
    // Brightness Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_brightness_extremes() {
        assert_eq!(brightness(BLACK), 0.0, "black has zero brightness");
        assert!((brightness(WHITE) - 1.0).abs() < 1e-5, "white has full brightness");
    }

    #[test]
    fn test_brightness_weights_green_highest() {
        let pure_r = brightness(Rgb888::new(255, 0, 0));
        let pure_g = brightness(Rgb888::new(0, 255, 0));
        let pure_b = brightness(Rgb888::new(0, 0, 255));
        assert!(pure_g > pure_r, "green should read brighter than red");
        assert!(pure_r > pure_b, "red should read brighter than blue");
    }

    // -------------------------------------------------------------------------
    // Contrast Decision Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_contrasting_color_on_dark() {
        assert_eq!(contrasting_color(BLACK), WHITE);
        assert_eq!(contrasting_color(Rgb888::new(0, 0, 60)), WHITE);
    }

    #[test]
    fn test_contrasting_color_on_bright() {
        assert_eq!(contrasting_color(WHITE), BLACK);
        assert_eq!(contrasting_color(YELLOW), BLACK);
        assert_eq!(contrasting_color(ORANGE), BLACK);
    }

    #[test]
    fn test_contrast_threshold_favors_black() {
        // Pure red sits at brightness 0.299, just past the low threshold,
        // so it already gets black chrome
        assert_eq!(contrasting_color(RED), BLACK);
    }

    // -------------------------------------------------------------------------
    // Background Resolution Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_resolve_background_first_opaque_wins() {
        let chain = [
            Rgba::TRANSPARENT,
            Rgba::new(STEEL_BLUE, 1.0),
            Rgba::new(RED, 1.0),
        ];
        assert_eq!(resolve_background_color(chain), STEEL_BLUE);
    }

    #[test]
    fn test_resolve_background_skips_transparent_layers() {
        let chain = [Rgba::TRANSPARENT, Rgba::TRANSPARENT, Rgba::new(ORANGE, 0.8)];
        assert_eq!(
            resolve_background_color(chain),
            ORANGE,
            "partially translucent layers still count as a background"
        );
    }

    #[test]
    fn test_resolve_background_defaults_to_white() {
        assert_eq!(resolve_background_color([]), WHITE, "no container resolves to white");
        let all_transparent = [Rgba::TRANSPARENT; 4];
        assert_eq!(
            resolve_background_color(all_transparent),
            WHITE,
            "root reached without opaque layer resolves to white"
        );
    }
}
