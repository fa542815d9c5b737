//! Widget rendering for the simulator demo.
//!
//! The engine modules compute visual parameters (angles, levels, colors,
//! vignette geometry); this module turns them into embedded-graphics
//! primitives on the simulator display. Drawing to the simulator is
//! infallible, so draw results are discarded with `.ok()` throughout.

use core::fmt::Write as _;

use embedded_graphics::{
    geometry::AngleUnit,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Arc, Circle, Line, Polyline, PrimitiveStyle, Rectangle, Triangle},
    text::Text,
};
use embedded_graphics_simulator::SimulatorDisplay;

use crate::colors::{BLACK, Rgba};
use crate::config::{
    FIGURE_X_MAX, FIGURE_X_MIN, FIGURE_Y_MAX, FIGURE_Y_MIN, PANEL_HEIGHT, PANEL_WIDTH,
    SCREEN_HEIGHT, SCREEN_WIDTH, WAVE_POINTS,
};
use crate::contrast::{contrasting_color, resolve_background_color};
use crate::styles::{CENTERED, LABEL_STYLE_GRAY, RIGHT_ALIGNED, VALUE_STYLE_WHITE};
use crate::widgets::{Gauge, HistoryGraph, PulsatingHeart, ScreenOverlay, SketchFigure, Widget};

/// Dial radius of the gauge arc in pixels.
const GAUGE_RADIUS: u32 = 60;

/// Stroke width of the gauge gradient arc.
const GAUGE_ARC_WIDTH: u32 = 10;

/// Base half-width of the heart shape before beat scaling.
const HEART_HALF_WIDTH: f32 = 22.0;

/// Chrome color for needles, outlines, and axes.
///
/// The demo draws straight onto the cleared display with no intermediate
/// containers, so the background chain is a single opaque black layer.
fn chrome() -> Rgb888 {
    contrasting_color(resolve_background_color([Rgba::new(BLACK, 1.0)]))
}

// =============================================================================
// Gauge
// =============================================================================

/// Draw the half-circle gauge into the panel at `origin`.
pub fn draw_gauge(
    display: &mut SimulatorDisplay<Rgb888>,
    gauge: &Gauge,
    origin: Point,
) {
    let center = origin + Point::new(PANEL_WIDTH as i32 / 2, 110);
    let diameter = GAUGE_RADIUS * 2;
    let top_left = center - Point::new(GAUGE_RADIUS as i32, GAUGE_RADIUS as i32);

    // Gradient arc: one segment per stop, each ending at the stop's angle.
    // Dial degree d maps to screen angle 180 + d (left edge over the top).
    let mut segment_start = 0.0f32;
    for stop in gauge.gradient() {
        let sweep = stop.deg - segment_start;
        if sweep > 0.0 {
            Arc::new(top_left, diameter, (180.0 + segment_start).deg(), sweep.deg())
                .into_styled(PrimitiveStyle::with_stroke(stop.color, GAUGE_ARC_WIDTH))
                .draw(display)
                .ok();
        }
        segment_start = stop.deg;
    }

    // Mask: cover the unrevealed remainder of the dial past the needle
    let revealed = gauge.needle_angle_deg();
    if revealed < 180.0 {
        Arc::new(top_left, diameter, (180.0 + revealed).deg(), (180.0 - revealed).deg())
            .into_styled(PrimitiveStyle::with_stroke(BLACK, GAUGE_ARC_WIDTH + 2))
            .draw(display)
            .ok();
    }

    let chrome = chrome();

    // Needle from the hub to just inside the arc
    let needle_rad = (180.0 + revealed).to_radians();
    let needle_len = (GAUGE_RADIUS - GAUGE_ARC_WIDTH) as f32;
    let tip = center
        + Point::new(
            (needle_len * needle_rad.cos()).round() as i32,
            (needle_len * needle_rad.sin()).round() as i32,
        );
    Line::new(center, tip)
        .into_styled(PrimitiveStyle::with_stroke(chrome, 3))
        .draw(display)
        .ok();
    Circle::with_center(center, 8)
        .into_styled(PrimitiveStyle::with_fill(chrome))
        .draw(display)
        .ok();

    if gauge.show_reference_line() {
        // reference_line_angle_deg is centered (-90 at min), shift back to
        // the dial convention before projecting
        let ref_rad = (90.0 + gauge.reference_line_angle_deg() + 180.0).to_radians();
        let inner = GAUGE_RADIUS as f32 - GAUGE_ARC_WIDTH as f32 - 4.0;
        let outer = GAUGE_RADIUS as f32 + 4.0;
        let from = center + Point::new((inner * ref_rad.cos()) as i32, (inner * ref_rad.sin()) as i32);
        let to = center + Point::new((outer * ref_rad.cos()) as i32, (outer * ref_rad.sin()) as i32);
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(chrome, 1))
            .draw(display)
            .ok();
    }

    if gauge.value_visible() {
        draw_value_readout(display, gauge.current_value(), center + Point::new(0, 35));
    }
}

// =============================================================================
// Sketch Figure
// =============================================================================

/// Draw the sketch figure into the panel at `origin`.
///
/// The fill level, fill color, and wave surface all come in figure
/// coordinates; this function translates them into the panel.
pub fn draw_sketch_figure(
    display: &mut SimulatorDisplay<Rgb888>,
    figure: &SketchFigure,
    origin: Point,
) {
    let figure_width = (FIGURE_X_MAX - FIGURE_X_MIN) as i32;
    // Center the figure's coordinate band inside the panel
    let dx = origin.x + (PANEL_WIDTH as i32 - figure_width) / 2 - FIGURE_X_MIN as i32;
    let dy = origin.y - 34;
    let to_screen = |x: f32, y: f32| Point::new(x.round() as i32 + dx, y.round() as i32 + dy);

    let chrome = chrome();
    let outline = PrimitiveStyle::with_stroke(chrome, 1);

    // Head above the torso
    let head_center = to_screen((FIGURE_X_MIN + FIGURE_X_MAX) / 2.0, 74.0);
    Circle::with_center(head_center, 24).into_styled(outline).draw(display).ok();

    // Fill from the wave surface down to the bottom of the torso
    let surface = figure.wave_surface();
    let fill_style = PrimitiveStyle::with_fill(figure.current_color());
    for pair in surface.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, _) = pair[1];
        let top = to_screen(x0, y0);
        let bottom = to_screen(x1, FIGURE_Y_MAX);
        Rectangle::with_corners(top, bottom).into_styled(fill_style).draw(display).ok();
    }

    // Wave surface line on top of the fill
    let mut crest = [Point::zero(); WAVE_POINTS];
    for (point, &(x, y)) in crest.iter_mut().zip(surface.iter()) {
        *point = to_screen(x, y);
    }
    Polyline::new(&crest).into_styled(PrimitiveStyle::with_stroke(chrome, 1)).draw(display).ok();

    // Torso outline drawn last so the fill never paints over it
    Rectangle::with_corners(
        to_screen(FIGURE_X_MIN, FIGURE_Y_MIN),
        to_screen(FIGURE_X_MAX, FIGURE_Y_MAX),
    )
    .into_styled(outline)
    .draw(display)
    .ok();

    if figure.value_visible() {
        draw_value_readout(
            display,
            figure.current_value(),
            Point::new(origin.x + PANEL_WIDTH as i32 / 2, origin.y + PANEL_HEIGHT as i32 - 20),
        );
    }
}

// =============================================================================
// Pulsating Heart
// =============================================================================

/// Draw the heart shape centered in the panel at `origin`, scaled by the
/// current beat keyframe.
pub fn draw_pulsating_heart(
    display: &mut SimulatorDisplay<Rgb888>,
    heart: &PulsatingHeart,
    origin: Point,
) {
    let center = origin + Point::new(PANEL_WIDTH as i32 / 2, 80);
    let half = HEART_HALF_WIDTH * heart.scale();
    let lobe_diameter = half.round() as u32;
    let lobe_offset = (half / 2.0).round() as i32;
    let style = PrimitiveStyle::with_fill(heart.heart_color());

    // Two lobes and a point: close enough to a heart at panel scale
    Circle::with_center(center + Point::new(-lobe_offset, -lobe_offset), lobe_diameter)
        .into_styled(style)
        .draw(display)
        .ok();
    Circle::with_center(center + Point::new(lobe_offset, -lobe_offset), lobe_diameter)
        .into_styled(style)
        .draw(display)
        .ok();
    Triangle::new(
        center + Point::new(-half.round() as i32, -lobe_offset / 2),
        center + Point::new(half.round() as i32, -lobe_offset / 2),
        center + Point::new(0, half.round() as i32),
    )
    .into_styled(style)
    .draw(display)
    .ok();

    if heart.value_visible() {
        draw_value_readout(display, heart.current_value(), center + Point::new(0, 65));
    }
}

// =============================================================================
// History Graph
// =============================================================================

/// Plot margins inside the history area, leaving room for axis labels.
const PLOT_MARGIN_LEFT: i32 = 40;
const PLOT_MARGIN_RIGHT: i32 = 10;
const PLOT_MARGIN_TOP: i32 = 8;
const PLOT_MARGIN_BOTTOM: i32 = 18;

/// Draw the history chart into `area`.
pub fn draw_history_graph(
    display: &mut SimulatorDisplay<Rgb888>,
    graph: &HistoryGraph,
    area: Rectangle,
) {
    let left = area.top_left.x + PLOT_MARGIN_LEFT;
    let top = area.top_left.y + PLOT_MARGIN_TOP;
    let width = area.size.width as i32 - PLOT_MARGIN_LEFT - PLOT_MARGIN_RIGHT;
    let height = area.size.height as i32 - PLOT_MARGIN_TOP - PLOT_MARGIN_BOTTOM;

    let chrome = chrome();
    let axis_style = PrimitiveStyle::with_stroke(chrome, 1);

    // Axes
    Line::new(Point::new(left, top), Point::new(left, top + height))
        .into_styled(axis_style)
        .draw(display)
        .ok();
    Line::new(Point::new(left, top + height), Point::new(left + width, top + height))
        .into_styled(axis_style)
        .draw(display)
        .ok();

    // Y ticks every 10 BPM, labels every 20 to keep them readable
    for tick in graph.y_ticks() {
        let y = top + graph.y_to_px(tick, height as f32).round() as i32;
        Line::new(Point::new(left - 3, y), Point::new(left, y))
            .into_styled(axis_style)
            .draw(display)
            .ok();
        if tick.round() as i32 % 20 == 0 {
            let mut label = heapless::String::<8>::new();
            let _ = write!(label, "{}", tick.round() as i32);
            Text::with_text_style(&label, Point::new(left - 6, y + 3), LABEL_STYLE_GRAY, RIGHT_ALIGNED)
                .draw(display)
                .ok();
        }
    }

    // X tick labels, evenly spaced across the elastic domain
    let labels = graph.x_tick_labels();
    let slots = (labels.len() - 1).max(1) as i32;
    for (i, label) in labels.iter().enumerate() {
        let x = left + width * i as i32 / slots;
        Text::with_text_style(label, Point::new(x, top + height + 12), LABEL_STYLE_GRAY, CENTERED)
            .draw(display)
            .ok();
    }

    // Reference line across the plot
    if graph.show_reference_line() {
        let y = top + graph.y_to_px(graph.range().reference(), height as f32).round() as i32;
        Line::new(Point::new(left, y), Point::new(left + width, y))
            .into_styled(PrimitiveStyle::with_stroke(graph.reference_line_color(), 1))
            .draw(display)
            .ok();
    }

    // Sample polyline over the elastic time domain
    let (_, upper) = graph.time_domain();
    let points: Vec<Point> = graph
        .points()
        .iter()
        .map(|p| {
            Point::new(
                left + (p.t_secs / upper * width as f32).round() as i32,
                top + graph.y_to_px(p.value, height as f32).round() as i32,
            )
        })
        .collect();
    if points.len() >= 2 {
        Polyline::new(&points)
            .into_styled(PrimitiveStyle::with_stroke(graph.graph_line_color(), 2))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Screen Overlay
// =============================================================================

/// Draw the vignette as nested border frames around the whole screen.
///
/// The simulator has no alpha compositing or box shadows, so the shadow is
/// approximated: the spread becomes the frame thickness and the blur becomes
/// extra frames of decaying opacity, each pre-blended over black.
pub fn draw_screen_overlay(
    display: &mut SimulatorDisplay<Rgb888>,
    overlay: &ScreenOverlay,
) {
    let params = overlay.vignette();
    let thickness = params.spread.round() as i32;
    if thickness <= 0 {
        return;
    }

    let screen = display.bounding_box();
    let blur_frames = (params.blur / 2.0).round().max(1.0) as i32;
    let total = thickness + blur_frames;

    for frame in 0..total {
        // Full opacity through the spread, linear falloff across the blur
        let falloff = if frame < thickness {
            1.0
        } else {
            1.0 - (frame - thickness) as f32 / blur_frames as f32
        };
        let color = Rgba::new(params.color.rgb, params.opacity * falloff).over(BLACK);

        let top_left = screen.top_left + Point::new(frame, frame);
        let size = Size::new(
            screen.size.width.saturating_sub(2 * frame as u32),
            screen.size.height.saturating_sub(2 * frame as u32),
        );
        Rectangle::new(top_left, size)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Shared
// =============================================================================

/// Centered BPM readout under a widget.
fn draw_value_readout(
    display: &mut SimulatorDisplay<Rgb888>,
    bpm: f32,
    position: Point,
) {
    let mut text = heapless::String::<16>::new();
    let _ = write!(text, "{}", bpm.round() as i32);
    Text::with_text_style(&text, position, VALUE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

/// Area of the history chart below the widget panels.
pub fn history_area() -> Rectangle {
    Rectangle::new(
        Point::new(0, PANEL_HEIGHT as i32),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - PANEL_HEIGHT),
    )
}
