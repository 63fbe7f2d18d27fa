//! Loading and saving render configuration files

use glpaint_settings::{ArcValidation, ConfigError, RenderConfig, SettingsError};
use tempfile::tempdir;

#[test]
fn test_save_and_load_toml() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");

    let mut config = RenderConfig::default();
    config.arc.tolerance = 0.002;
    config.arc.validation = ArcValidation::Strict;
    config.path.fractionize_arcs = false;
    config.save_to_file(&path).expect("save toml");

    let loaded = RenderConfig::load_from_file(&path).expect("load toml");
    assert_eq!(loaded, config);
}

#[test]
fn test_save_and_load_json() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("config.json");

    let mut config = RenderConfig::default();
    config.path.highlight_color = [0.0, 1.0, 0.0, 1.0];
    config.save_to_file(&path).expect("save json");

    let content = std::fs::read_to_string(&path).expect("read back");
    assert!(content.contains("highlight_color"));

    let loaded = RenderConfig::load_from_file(&path).expect("load json");
    assert_eq!(loaded.path.highlight_color, [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("config.yaml");

    let err = RenderConfig::default()
        .save_to_file(&path)
        .expect_err("yaml is not supported");
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
    ));
}

#[test]
fn test_invalid_file_fails_validation_on_load() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[arc]\ntolerance = -0.5\n").expect("write config");

    let err = RenderConfig::load_from_file(&path).expect_err("negative tolerance");
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempdir().expect("create temp dir");
    let config = RenderConfig::load_or_default(&dir.path().join("missing.toml"))
        .expect("defaults when file is absent");
    assert_eq!(config, RenderConfig::default());
}

#[test]
fn test_missing_file_reports_load_error() {
    let dir = tempdir().expect("create temp dir");
    let err = RenderConfig::load_from_file(&dir.path().join("missing.toml"))
        .expect_err("file does not exist");
    assert!(matches!(err, SettingsError::LoadError(_)));
}
