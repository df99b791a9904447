//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TS_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Hand detector input configuration
    #[serde(default)]
    pub detector: DetectorConfig,
    /// 4D projection configuration
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Interaction smoothing and gesture-hold configuration
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Snapshot capture configuration
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Particle configuration
    #[serde(default)]
    pub particles: ParticlesConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User config overrides the defaults
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // TS_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("TS_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Frame pacing target
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Timescape - Gesture Tesseract".to_string(),
            width: 1280,
            height: 720,
            target_fps: 60,
        }
    }
}

/// Hand detector input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Width of the detector frame keypoints are expressed in
    pub input_width: f32,
    /// Height of the detector frame
    pub input_height: f32,
    /// Render frames per simulated detector delivery
    pub sim_cadence: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            input_width: 640.0,
            input_height: 480.0,
            sim_cadence: 2,
        }
    }
}

/// 4D projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 4D camera pseudo-distance for the perspective divide
    pub camera_distance: f32,
    /// Radians of ZW spin per frame (XY runs at half)
    pub rotation_increment: f32,
    /// Scale the spin by elapsed time instead of per rendered frame
    pub time_scaled_spin: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            camera_distance: 2.0,
            rotation_increment: 0.02,
            time_scaled_spin: false,
        }
    }
}

/// Interaction smoothing and gesture-hold configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Per-frame lerp factor toward the hand-driven targets
    pub smoothing_factor: f32,
    /// Scale the lerp factor by elapsed time instead of per frame
    pub time_scaled_smoothing: bool,
    /// Continuous fist time required to arm a capture (ms)
    pub hold_ms: u64,
    /// Retrigger cooldown armed when a hold fires (ms)
    pub cooldown_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.1,
            time_scaled_smoothing: false,
            hold_ms: 3000,
            cooldown_ms: 15000,
        }
    }
}

/// Snapshot capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Scene fade-out before recording (ms)
    pub enter_ms: u64,
    /// Recording window (ms)
    pub record_ms: u64,
    /// Scene fade-in after recording (ms)
    pub exit_ms: u64,
    /// Art buffer size as a multiple of the window size
    pub art_multiplier: u32,
    /// Directory snapshots are written into
    pub output_dir: String,
    /// File the snapshot counter persists in
    pub counter_path: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enter_ms: 1000,
            record_ms: 10000,
            exit_ms: 2000,
            art_multiplier: 2,
            output_dir: ".".to_string(),
            counter_path: "timescape_counter.txt".to_string(),
        }
    }
}

/// Particle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlesConfig {
    /// Star count, fixed at startup
    pub star_count: usize,
    /// Lightning spawn chance per fingertip per frame
    pub lightning_probability: f64,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            star_count: 200,
            lightning_probability: 0.002,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Show the HUD overlay at startup
    pub show_overlay: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.capture.record_ms, 10000);
        assert_eq!(config.particles.star_count, 200);
        assert!((config.projection.rotation_increment - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("rotation_increment"));
        assert!(toml.contains("hold_ms"));
    }
}
