use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API credential
pub const API_KEY_ENV: &str = "GEMINI_KEY";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for CineBot
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CineConfig {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub api_base_url: Option<String>,
    pub temperature: Option<f32>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl Default for CineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: Some(DEFAULT_MODEL.to_string()),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            temperature: None,
            request_timeout_secs: None,
            log_level: Some("warn".to_string()),
        }
    }
}

impl CineConfig {
    /// A config with every field unset, useful as a merge overlay
    pub fn empty() -> Self {
        Self {
            api_key: None,
            model_name: None,
            api_base_url: None,
            temperature: None,
            request_timeout_secs: None,
            log_level: None,
        }
    }

    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
            let overlay: Self = toml::from_str(&content)?;
            Ok(Self::default().merge(&overlay))
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay read from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()),
            ..Self::empty()
        }
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            temperature: other.temperature.or(self.temperature),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// File, then environment, then `overrides` (typically CLI flags).
    ///
    /// The binary loads `.env` into the environment before calling this.
    pub fn resolve(path: Option<&Path>, overrides: &Self) -> ConfigResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => get_default_config_file("cinebot")?,
        };

        let config = Self::load_from_file(&path)?
            .merge(&Self::from_env())
            .merge(overrides);
        Ok(config)
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> ConfigResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;

    let config_dir = home_dir.join(".config").join(app_name);

    Ok(config_dir)
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> ConfigResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}
