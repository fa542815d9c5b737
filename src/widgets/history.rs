//! Rolling history line chart.
//!
//! The graph keeps every sample it has ever received, timestamped against the
//! instant of the first update, and presents an elastic time axis: the domain
//! starts at a minimum width and stretches as recording time grows, so early
//! samples compress toward the left instead of scrolling away. Values are
//! clamped into the configured range before they are stored, which keeps the
//! y axis fixed for the whole run.

use core::fmt::Write as _;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use tracing::warn;

use crate::colors::{RED, STEEL_BLUE, parse_color, unsupported_color_message};
use crate::config::{DEFAULT_NUMBER_TIMESTAMPS, Y_AXIS_PADDING, Y_TICK_STEP};
use crate::error::ConfigError;
use crate::range::SignalRange;
use crate::widgets::Widget;

/// An `MM:SS` tick label.
pub type TickLabel = heapless::String<8>;

/// History graph configuration.
#[derive(Clone, Debug)]
pub struct HistoryGraphConfig {
    pub min_value: f32,
    pub max_value: f32,
    pub reference_value: f32,
    /// Line color declaration. Unparsable values repair to steel blue.
    pub graph_line_color: String,
    /// Reference line color declaration. Unparsable values repair to red.
    pub reference_line_color: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub show_reference_line: bool,
    /// Number of labels on the time axis, and the minimum axis width in
    /// seconds. Fewer than 2 labels cannot span an axis; such values repair
    /// to the default.
    pub number_timestamps: usize,
}

impl Default for HistoryGraphConfig {
    fn default() -> Self {
        Self {
            min_value: 40.0,
            max_value: 180.0,
            reference_value: 70.0,
            graph_line_color: "steelblue".into(),
            reference_line_color: "red".into(),
            x_axis_label: "Time (MM:SS)".into(),
            y_axis_label: "Heart Rate (BPM)".into(),
            show_reference_line: true,
            number_timestamps: DEFAULT_NUMBER_TIMESTAMPS,
        }
    }
}

/// One recorded sample: seconds since the first update, clamped value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryPoint {
    pub t_secs: f32,
    pub value: f32,
}

/// Append-only heart rate history with an elastic time axis.
pub struct HistoryGraph {
    range: SignalRange,
    graph_line_color: Rgb888,
    reference_line_color: Rgb888,
    x_axis_label: String,
    y_axis_label: String,
    show_reference_line: bool,
    number_timestamps: usize,
    started: Option<Instant>,
    points: Vec<HistoryPoint>,
}

impl HistoryGraph {
    /// Validate the configuration and build an empty history.
    ///
    /// Construction never fails: every invalid field has a safe default. The
    /// `Result` keeps the construction contract uniform across widgets.
    pub fn new(config: HistoryGraphConfig) -> Result<Self, ConfigError> {
        let range =
            SignalRange::repaired(config.min_value, config.max_value, config.reference_value);

        let number_timestamps = if config.number_timestamps >= 2 {
            config.number_timestamps
        } else {
            warn!(
                number_timestamps = config.number_timestamps,
                "numberTimestamps must be at least 2, default {DEFAULT_NUMBER_TIMESTAMPS} is applied"
            );
            DEFAULT_NUMBER_TIMESTAMPS
        };

        let graph_line_color = parse_color(&config.graph_line_color).unwrap_or_else(|| {
            warn!(
                "{}, default color steelblue is applied",
                unsupported_color_message(&config.graph_line_color)
            );
            STEEL_BLUE
        });
        let reference_line_color =
            parse_color(&config.reference_line_color).unwrap_or_else(|| {
                warn!(
                    "{}, default color red is applied",
                    unsupported_color_message(&config.reference_line_color)
                );
                RED
            });

        Ok(Self {
            range,
            graph_line_color,
            reference_line_color,
            x_axis_label: config.x_axis_label,
            y_axis_label: config.y_axis_label,
            show_reference_line: config.show_reference_line,
            number_timestamps,
            started: None,
            points: Vec::new(),
        })
    }

    /// Record a sample at an explicit instant. The first call anchors the
    /// time axis; later instants are measured against it. Samples never
    /// expire.
    pub fn update_at(&mut self, bpm: f32, now: Instant) {
        if !bpm.is_finite() {
            return;
        }
        let started = *self.started.get_or_insert(now);
        let t_secs = now.saturating_duration_since(started).as_secs_f32();
        self.points.push(HistoryPoint { t_secs, value: self.range.clamp(bpm) });
    }

    /// Time axis domain in seconds: `[0, max(elapsed, number_timestamps - 1)]`.
    ///
    /// The lower bound never moves and the upper bound never shrinks, so the
    /// domain only ever stretches.
    pub fn time_domain(&self) -> (f32, f32) {
        let elapsed = self.points.last().map_or(0.0, |p| p.t_secs);
        (0.0, elapsed.max((self.number_timestamps - 1) as f32))
    }

    /// Evenly spaced `MM:SS` labels across the current time domain.
    /// Recomputed on every call; the elastic domain invalidates cached
    /// labels as soon as a new sample lands.
    pub fn x_tick_labels(&self) -> Vec<TickLabel> {
        let (_, upper) = self.time_domain();
        let last = (self.number_timestamps - 1) as f32;
        (0..self.number_timestamps)
            .map(|i| {
                let secs = (upper * i as f32 / last).round() as u32;
                let mut label = TickLabel::new();
                // 8 bytes hold any u32 minute count the axis can reach
                let _ = write!(label, "{:02}:{:02}", secs / 60, secs % 60);
                label
            })
            .collect()
    }

    /// Value axis tick positions at fixed 10 BPM steps within the range.
    pub fn y_ticks(&self) -> Vec<f32> {
        let mut ticks = Vec::new();
        let mut tick = (self.range.min() / Y_TICK_STEP).ceil() * Y_TICK_STEP;
        while tick <= self.range.max() {
            ticks.push(tick);
            tick += Y_TICK_STEP;
        }
        ticks
    }

    /// Vertical pixel position of a value in a plot area of `height` pixels,
    /// measured from the top. A 3% padding band at each edge keeps extreme
    /// samples off the plot border.
    pub fn y_to_px(&self, value: f32, height: f32) -> f32 {
        let fraction = self.range.fraction(value);
        height * (Y_AXIS_PADDING + (1.0 - fraction) * (1.0 - 2.0 * Y_AXIS_PADDING))
    }

    #[inline]
    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    #[inline]
    pub const fn range(&self) -> &SignalRange {
        &self.range
    }

    #[inline]
    pub const fn graph_line_color(&self) -> Rgb888 {
        self.graph_line_color
    }

    #[inline]
    pub const fn reference_line_color(&self) -> Rgb888 {
        self.reference_line_color
    }

    #[inline]
    pub const fn show_reference_line(&self) -> bool {
        self.show_reference_line
    }

    #[inline]
    pub fn x_axis_label(&self) -> &str {
        &self.x_axis_label
    }

    #[inline]
    pub fn y_axis_label(&self) -> &str {
        &self.y_axis_label
    }
}

impl Widget for HistoryGraph {
    fn update(&mut self, bpm: f32) {
        self.update_at(bpm, Instant::now());
    }

    fn value_visible(&self) -> bool {
        // The chart itself is the value display
        false
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn default_graph() -> HistoryGraph {
        HistoryGraph::new(HistoryGraphConfig::default()).expect("default config is valid")
    }

    // -------------------------------------------------------------------------
    // Construction Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_too_few_timestamps_repaired() {
        for bad in [0, 1] {
            let config = HistoryGraphConfig { number_timestamps: bad, ..HistoryGraphConfig::default() };
            let graph = HistoryGraph::new(config).unwrap();
            assert_eq!(
                graph.number_timestamps, DEFAULT_NUMBER_TIMESTAMPS,
                "{bad} timestamps cannot span an axis"
            );
        }
    }

    #[test]
    fn test_invalid_colors_repaired() {
        let config = HistoryGraphConfig {
            graph_line_color: "not-a-color".into(),
            reference_line_color: "also-not".into(),
            ..HistoryGraphConfig::default()
        };
        let graph = HistoryGraph::new(config).unwrap();
        assert_eq!(graph.graph_line_color(), STEEL_BLUE);
        assert_eq!(graph.reference_line_color(), RED);
    }

    // -------------------------------------------------------------------------
    // Recording Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_every_sample_is_kept_and_clamped() {
        let mut graph = default_graph();
        let base = Instant::now();
        let samples = [72.0, 85.0, 300.0, 10.0, 95.0];

        for (i, &bpm) in samples.iter().enumerate() {
            graph.update_at(bpm, base + Duration::from_secs(i as u64));
        }

        assert_eq!(graph.points().len(), samples.len(), "history is append-only");
        assert_eq!(graph.points()[2].value, 180.0, "over-range samples clamp to max");
        assert_eq!(graph.points()[3].value, 40.0, "under-range samples clamp to min");
        assert_eq!(graph.points()[0].t_secs, 0.0, "first sample anchors the axis");
        assert!((graph.points()[4].t_secs - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_samples_ignored() {
        let mut graph = default_graph();
        let base = Instant::now();
        graph.update_at(f32::NAN, base);
        graph.update_at(f32::INFINITY, base);
        assert!(graph.points().is_empty());
    }

    // -------------------------------------------------------------------------
    // Time Axis Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_domain_starts_at_minimum_width() {
        let graph = default_graph();
        assert_eq!(graph.time_domain(), (0.0, 4.0), "empty graph spans number_timestamps - 1");
    }

    #[test]
    fn test_domain_only_stretches() {
        let mut graph = default_graph();
        let base = Instant::now();
        let mut previous_upper = graph.time_domain().1;

        for i in 0..10 {
            graph.update_at(80.0, base + Duration::from_secs(i * 2));
            let (lower, upper) = graph.time_domain();
            assert_eq!(lower, 0.0, "lower bound never moves");
            assert!(upper >= previous_upper, "upper bound never shrinks");
            previous_upper = upper;
        }
        assert!((previous_upper - 18.0).abs() < 1e-3, "domain tracks elapsed time once past minimum");
    }

    #[test]
    fn test_tick_labels_format_minutes_and_seconds() {
        let mut graph = default_graph();
        let base = Instant::now();
        graph.update_at(80.0, base);
        graph.update_at(80.0, base + Duration::from_secs(120));

        let labels = graph.x_tick_labels();
        assert_eq!(labels.len(), DEFAULT_NUMBER_TIMESTAMPS);
        assert_eq!(labels[0].as_str(), "00:00");
        assert_eq!(labels[2].as_str(), "01:00");
        assert_eq!(labels[4].as_str(), "02:00");
    }

    // -------------------------------------------------------------------------
    // Value Axis Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_y_ticks_at_ten_unit_steps() {
        let graph = default_graph();
        let ticks = graph.y_ticks();
        assert_eq!(ticks.first().copied(), Some(40.0));
        assert_eq!(ticks.last().copied(), Some(180.0));
        assert_eq!(ticks.len(), 15);
        for pair in ticks.windows(2) {
            assert!((pair[1] - pair[0] - 10.0).abs() < 1e-6, "ticks step by 10 BPM");
        }
    }

    #[test]
    fn test_y_to_px_padding_and_orientation() {
        let graph = default_graph();
        let top = graph.y_to_px(180.0, 100.0);
        let bottom = graph.y_to_px(40.0, 100.0);
        assert!((top - 3.0).abs() < 1e-4, "max value sits 3% below the top edge");
        assert!((bottom - 97.0).abs() < 1e-4, "min value sits 3% above the bottom edge");
        assert!(top < bottom, "larger values render higher");
    }
}
