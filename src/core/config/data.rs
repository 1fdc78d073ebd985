use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::config::io::ConfigError;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_TEMPERATURE};
use crate::core::models::ModelSelection;

/// Highest temperature accepted from flags or the config file.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Where the Ollama daemon listens (e.g., "http://localhost:11434")
    pub base_url: Option<String>,
    /// Sampling temperature passed with every request
    pub temperature: Option<f32>,
    /// Model selected at startup
    pub default_model: Option<ModelSelection>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub model: Option<ModelSelection>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub temperature: f32,
    pub model: ModelSelection,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            model: ModelSelection::default(),
            theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Layer command-line overrides over the file over built-in defaults.
    pub fn resolve(&self, overrides: &SettingsOverrides) -> Result<Settings, ConfigError> {
        let defaults = Settings::default();

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| self.base_url.clone())
            .unwrap_or(defaults.base_url);
        if base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url",
                message: "must not be empty".to_string(),
            });
        }

        let temperature = overrides
            .temperature
            .or(self.temperature)
            .unwrap_or(defaults.temperature);
        validate_temperature(temperature).map_err(|message| ConfigError::Invalid {
            field: "temperature",
            message,
        })?;

        let theme = self
            .theme
            .as_deref()
            .map(str::trim)
            .map(str::to_ascii_lowercase)
            .unwrap_or(defaults.theme);

        Ok(Settings {
            base_url: base_url.trim().to_string(),
            temperature,
            model: overrides
                .model
                .or(self.default_model)
                .unwrap_or(defaults.model),
            theme,
        })
    }
}

pub fn validate_temperature(value: f32) -> Result<f32, String> {
    if value.is_finite() && (0.0..=MAX_TEMPERATURE).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "temperature must be between 0.0 and {MAX_TEMPERATURE}, got {value}"
        ))
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
