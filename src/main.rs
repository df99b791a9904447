//! Timescape - gesture-driven tesseract visualizer
//!
//! A rotating 4D hypercube projected into 3D, steered by hand gestures,
//! with a timed snapshot mode that accumulates a motion-trail image.

use timescape::app::App;
use timescape::config::AppConfig;

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Timescape");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut app = App::new(config).expect("Failed to initialize application");
    app.run();
}
