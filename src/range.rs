//! Signal range validation, repair, and clamping.
//!
//! Every widget that maps samples onto geometry shares the same
//! `(min, max, reference)` range with the invariant `min <= reference <= max`.
//! Client configuration can violate it in several ways (inverted bounds, empty
//! span, reference outside the bounds, non-finite values). The engine never
//! carries an invalid range: [`SignalRange::repaired`] normalizes the input,
//! substitutes documented defaults where needed, and logs a diagnostic for
//! every repair. Construction always succeeds.
//!
//! An empty span (`min == max`) counts as inversion: the fill fraction divides
//! by `max - min`, and a zero denominator would poison every downstream value.

use tracing::warn;

use crate::config::{DEFAULT_MAX_BPM, DEFAULT_MIN_BPM, DEFAULT_REFERENCE_BPM};

/// A validated heart rate range. `min < max` and `min <= reference <= max`
/// hold for every constructed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalRange {
    min: f32,
    max: f32,
    reference: f32,
}

impl SignalRange {
    /// Build a range from raw configuration values, repairing invalid input.
    ///
    /// Repair policy:
    /// - non-finite or negative `min`/`max`, or `min >= max`: both reset to
    ///   the defaults 40/180
    /// - non-finite or negative `reference`: reset to the default 70, then
    ///   re-checked against the (possibly repaired) bounds
    /// - `reference` outside `[min, max]`: clamped to the range midpoint
    ///
    /// Every repair emits a diagnostic naming the substituted value.
    pub fn repaired(min: f32, max: f32, reference: f32) -> Self {
        let (mut min, mut max) = (min, max);

        if !min.is_finite() || min < 0.0 {
            warn!(min, "minValue must be a number that is at least 0, reset to default {DEFAULT_MIN_BPM}");
            min = DEFAULT_MIN_BPM;
        }
        if !max.is_finite() || max < 1.0 {
            warn!(max, "maxValue must be a number that is at least 1, reset to default {DEFAULT_MAX_BPM}");
            max = DEFAULT_MAX_BPM;
        }
        if min >= max {
            warn!(
                min,
                max,
                "minimum value must be smaller than maximum value, both reset to defaults {DEFAULT_MIN_BPM}/{DEFAULT_MAX_BPM}"
            );
            min = DEFAULT_MIN_BPM;
            max = DEFAULT_MAX_BPM;
        }

        let mut reference = reference;
        if !reference.is_finite() || reference < 0.0 {
            warn!(
                reference,
                "referenceValue must be a number that is at least 0, reset to default {DEFAULT_REFERENCE_BPM}"
            );
            reference = DEFAULT_REFERENCE_BPM;
        }
        if reference < min || reference > max {
            let midpoint = min + (max - min) / 2.0;
            warn!(
                reference,
                min, max, "referenceValue must lie between minimum and maximum, clamped to midpoint {midpoint}"
            );
            reference = midpoint;
        }

        Self { min, max, reference }
    }

    /// The default 40/180 range around the default reference of 70.
    pub fn default_bpm() -> Self {
        Self {
            min: DEFAULT_MIN_BPM,
            max: DEFAULT_MAX_BPM,
            reference: DEFAULT_REFERENCE_BPM,
        }
    }

    #[inline]
    pub const fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub const fn reference(&self) -> f32 {
        self.reference
    }

    /// Clamp a sample into the range. Out-of-range input is a normal runtime
    /// condition, never an error. NaN clamps to the minimum.
    #[inline]
    pub fn clamp(&self, sample: f32) -> f32 {
        if sample.is_nan() {
            return self.min;
        }
        sample.clamp(self.min, self.max)
    }

    /// Linear position of a sample within the range, clamped to `[0, 1]`.
    /// The span is never empty, so the division is always defined.
    #[inline]
    pub fn fraction(&self, sample: f32) -> f32 {
        ((self.clamp(sample) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Position of the reference value within the range, in `[0, 1]`.
    #[inline]
    pub fn reference_fraction(&self) -> f32 {
        (self.reference - self.min) / (self.max - self.min)
    }
}

impl Default for SignalRange {
    fn default() -> Self {
        Self::default_bpm()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Repair Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_valid_range_passes_through() {
        let range = SignalRange::repaired(40.0, 180.0, 70.0);
        assert_eq!(range.min(), 40.0);
        assert_eq!(range.max(), 180.0);
        assert_eq!(range.reference(), 70.0);
    }

    #[test]
    fn test_inverted_range_resets_to_defaults() {
        // min=100, max=50 is inverted: both reset, construction still succeeds
        let range = SignalRange::repaired(100.0, 50.0, 70.0);
        assert_eq!(range.min(), DEFAULT_MIN_BPM, "inverted min should reset to default 40");
        assert_eq!(range.max(), DEFAULT_MAX_BPM, "inverted max should reset to default 180");
        assert_eq!(range.reference(), 70.0, "reference inside repaired bounds is kept");
    }

    #[test]
    fn test_empty_span_resets_to_defaults() {
        // min == max would divide by zero in fraction()
        let range = SignalRange::repaired(100.0, 100.0, 100.0);
        assert_eq!(range.min(), DEFAULT_MIN_BPM);
        assert_eq!(range.max(), DEFAULT_MAX_BPM);
    }

    #[test]
    fn test_reference_outside_bounds_clamps_to_midpoint() {
        let range = SignalRange::repaired(40.0, 180.0, 500.0);
        assert_eq!(range.reference(), 110.0, "out-of-range reference becomes the midpoint");

        let below = SignalRange::repaired(60.0, 100.0, 20.0);
        assert_eq!(below.reference(), 80.0);
    }

    #[test]
    fn test_non_finite_values_repaired() {
        let range = SignalRange::repaired(f32::NAN, f32::INFINITY, f32::NAN);
        assert_eq!(range.min(), DEFAULT_MIN_BPM);
        assert_eq!(range.max(), DEFAULT_MAX_BPM);
        assert_eq!(range.reference(), DEFAULT_REFERENCE_BPM);
    }

    #[test]
    fn test_negative_bounds_repaired() {
        let range = SignalRange::repaired(-10.0, 180.0, 70.0);
        assert_eq!(range.min(), DEFAULT_MIN_BPM, "negative min should reset");
    }

    // -------------------------------------------------------------------------
    // Clamp and Fraction Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_clamp_bounds() {
        let range = SignalRange::default_bpm();
        assert_eq!(range.clamp(200.0), 180.0, "above max clamps to max");
        assert_eq!(range.clamp(10.0), 40.0, "below min clamps to min");
        assert_eq!(range.clamp(95.0), 95.0, "in-range value passes through");
        assert_eq!(range.clamp(f32::NAN), 40.0, "NaN clamps to min");
    }

    #[test]
    fn test_fraction_endpoints() {
        let range = SignalRange::default_bpm();
        assert_eq!(range.fraction(40.0), 0.0);
        assert_eq!(range.fraction(180.0), 1.0);
        assert_eq!(range.fraction(0.0), 0.0, "below-range fraction clamps to 0");
        assert_eq!(range.fraction(999.0), 1.0, "above-range fraction clamps to 1");
    }

    #[test]
    fn test_fraction_monotone() {
        let range = SignalRange::default_bpm();
        let mut prev = -1.0;
        for bpm in (40..=180).step_by(5) {
            let f = range.fraction(bpm as f32);
            assert!(f >= prev, "fraction must be non-decreasing in the sample");
            assert!((0.0..=1.0).contains(&f), "fraction must stay in [0, 1]");
            prev = f;
        }
    }

    #[test]
    fn test_reference_fraction() {
        let range = SignalRange::repaired(40.0, 180.0, 70.0);
        let expected = (70.0 - 40.0) / 140.0;
        assert!((range.reference_fraction() - expected).abs() < 1e-6);
    }
}
