//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use timescape::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("TS_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("TS_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("TS_CAPTURE__RECORD_MS", "2500");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.capture.record_ms, 2500);
    std::env::remove_var("TS_CAPTURE__RECORD_MS");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("TS_WINDOW__TITLE");

    // The version-controlled defaults ship with the repository
    let cwd = std::env::current_dir().unwrap();
    assert!(
        cwd.join("config/default.toml").exists(),
        "config/default.toml missing from {:?}",
        cwd
    );

    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Timescape - Gesture Tesseract");
    assert_eq!(config.capture.output_dir, "snapshots");
}

#[test]
#[serial]
fn test_missing_config_dir_falls_back_to_defaults() {
    let config = AppConfig::load_from("does-not-exist").unwrap();
    assert_eq!(config.particles.star_count, 200);
    assert_eq!(config.capture.output_dir, ".");
}
