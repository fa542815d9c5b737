//! Heart rate widget demo for the desktop simulator.
//!
//! Drives all five widget variants from a synthetic heart rate signal:
//! a calm baseline with periodic exertion ramps, so every mapping (gauge
//! reveal, figure fill and color steps, beat retiming, vignette onset,
//! history growth) is visible within the first minute.
//!
//! New samples arrive once per second, like a real sensor; animations tick
//! every frame in between. Close the window to exit.

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use tracing::info;
use tracing_subscriber::EnvFilter;

use heartrate_widgets::animations::Animated;
use heartrate_widgets::colors::BLACK;
use heartrate_widgets::config::{FRAME_TIME, PANEL_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use heartrate_widgets::error::ConfigError;
use heartrate_widgets::render::{
    draw_gauge, draw_history_graph, draw_pulsating_heart, draw_screen_overlay, draw_sketch_figure,
    history_area,
};
use heartrate_widgets::widgets::{
    Gauge, GaugeConfig, HistoryGraph, HistoryGraphConfig, PulsatingHeart, PulsatingHeartConfig,
    ScreenOverlay, ScreenOverlayConfig, SketchFigure, SketchFigureConfig, Widget,
};

/// Seconds between synthetic sensor samples.
const SAMPLE_INTERVAL_SECS: f32 = 1.0;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Heart Rate Widgets", &output_settings);

    // All five widgets share the synthetic signal but own their state
    let mut gauge = Gauge::new(GaugeConfig::default())?;
    let mut figure = SketchFigure::new(SketchFigureConfig::default())?;
    let mut heart = PulsatingHeart::new(PulsatingHeartConfig::default())?;
    let mut overlay = ScreenOverlay::new(ScreenOverlayConfig {
        container_width: SCREEN_WIDTH as f32,
        tunnel_intensity: 0.5,
        ..ScreenOverlayConfig::default()
    })?;
    let mut history = HistoryGraph::new(HistoryGraphConfig::default())?;

    info!("simulator started, close the window to exit");

    // Signal time parameter, advanced once per frame
    let mut t = 0.0f32;
    let mut last_sample = Instant::now();
    let mut first_sample_pending = true;

    let dt = FRAME_TIME.as_secs_f32();

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            if let SimulatorEvent::Quit = ev {
                break 'running;
            }
        }

        // Deliver a sample once per second (immediately on the first frame)
        if first_sample_pending || last_sample.elapsed().as_secs_f32() >= SAMPLE_INTERVAL_SECS {
            let bpm = heart_rate_signal(t);
            gauge.update(bpm);
            figure.update(bpm);
            heart.update(bpm);
            overlay.update(bpm);
            history.update(bpm);
            last_sample = Instant::now();
            first_sample_pending = false;
        }

        // Animations advance every frame regardless of sample cadence
        figure.tick(dt);
        heart.tick(dt);

        display.clear(BLACK).ok();
        draw_gauge(&mut display, &gauge, Point::zero());
        draw_sketch_figure(&mut display, &figure, Point::new(PANEL_WIDTH as i32, 0));
        draw_pulsating_heart(&mut display, &heart, Point::new(2 * PANEL_WIDTH as i32, 0));
        draw_history_graph(&mut display, &history, history_area());
        // Vignette last so it darkens everything beneath it
        draw_screen_overlay(&mut display, &overlay);

        window.update(&display);

        t += dt;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }

    Ok(())
}

/// Synthetic heart rate: a resting baseline around 65 bpm with a slow
/// exertion wave peaking near 150, plus a small fast wobble so consecutive
/// samples are never identical.
fn heart_rate_signal(t: f32) -> f32 {
    let exertion = (t * 0.06).sin().mul_add(0.5, 0.5); // 0..1, ~100s period
    let wobble = (t * 1.3).sin() * 2.5;
    65.0 + exertion * 85.0 + wobble
}
