use super::data::{Config, Settings, SettingsOverrides};
use super::io::ConfigError;
use crate::core::models::ModelSelection;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("typo.toml");

    let err = Config::load(Some(&config_path)).expect_err("missing explicit file should fail");

    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("typo.toml"));
}

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
base_url = "http://gpu-box:11434"
temperature = 0.7
default_model = "deepseek-r1:3b"
theme = "light"
"#,
    )
    .expect("Failed to write config");

    let config = Config::load(Some(&config_path)).expect("Failed to load config");

    assert_eq!(config.base_url.as_deref(), Some("http://gpu-box:11434"));
    assert_eq!(config.temperature, Some(0.7));
    assert_eq!(config.default_model, Some(ModelSelection::DeepseekR1Medium));
    assert_eq!(config.theme.as_deref(), Some("light"));
}

#[test]
fn test_unknown_model_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "default_model = \"llama3:70b\"\n").expect("Failed to write config");

    let err = Config::load_from_path(&config_path).expect_err("unknown model should fail");

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_malformed_toml_names_the_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "temperature = = 1").expect("Failed to write config");

    let err = Config::load_from_path(&config_path).expect_err("broken toml should fail");

    assert!(err.to_string().starts_with("Failed to parse config at"));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_resolve_uses_builtin_defaults() {
    let settings = Config::default()
        .resolve(&SettingsOverrides::default())
        .expect("defaults resolve");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.base_url, "http://localhost:11434");
    assert_eq!(settings.model.id(), "deepseek-r1:1.5b");
    assert!((settings.temperature - 0.3).abs() < f32::EPSILON);
}

#[test]
fn test_overrides_beat_file_values() {
    let config = Config {
        base_url: Some("http://file:11434".to_string()),
        temperature: Some(0.9),
        default_model: Some(ModelSelection::DeepseekR1Medium),
        theme: Some(" Light ".to_string()),
    };

    let from_file = config
        .resolve(&SettingsOverrides::default())
        .expect("file values resolve");
    assert_eq!(from_file.base_url, "http://file:11434");
    assert_eq!(from_file.model, ModelSelection::DeepseekR1Medium);
    assert_eq!(from_file.theme, "light");

    let overridden = config
        .resolve(&SettingsOverrides {
            base_url: Some("http://flag:11434".to_string()),
            temperature: Some(0.0),
            model: Some(ModelSelection::DeepseekR1Small),
        })
        .expect("overrides resolve");
    assert_eq!(overridden.base_url, "http://flag:11434");
    assert_eq!(overridden.temperature, 0.0);
    assert_eq!(overridden.model, ModelSelection::DeepseekR1Small);
}

#[test]
fn test_out_of_range_temperature_is_rejected() {
    let config = Config {
        temperature: Some(3.5),
        ..Default::default()
    };

    let err = config
        .resolve(&SettingsOverrides::default())
        .expect_err("3.5 is too hot");

    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "temperature",
            ..
        }
    ));
}
