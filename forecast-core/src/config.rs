use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::FetchError;

/// Public OpenWeather 2.5 API root, offered as the default during `configure`.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "OPENWEATHER_BASE_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Everything needed to build and send a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Read the config at the platform path. A missing file is an empty config.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file yet");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read config file: {}", path.display()));
            }
        };

        toml::from_str(&contents)
            .with_context(|| format!("Invalid TOML in config file: {}", path.display()))
    }

    /// Write the config to the platform path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| anyhow!("Config path has no parent directory: {}", path.display()))?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let text = toml::to_string_pretty(self).context("Failed to encode config as TOML")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// `config.toml` under the platform config directory for `forecast-cli`.
    pub fn config_file_path() -> Result<PathBuf> {
        ProjectDirs::from("dev", "forecast", "forecast-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Apply `OPENWEATHER_API_KEY` / `OPENWEATHER_BASE_URL` from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Non-empty values returned by `lookup` win over what was loaded from disk.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(BASE_URL_ENV) {
            self.base_url = Some(url);
        }
        self
    }

    /// Both the API key and the base URL, or a configuration error naming what is missing.
    pub fn credentials(&self) -> Result<Credentials, FetchError> {
        let api_key = self.api_key.clone().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            FetchError::Config(format!(
                "No API key configured.\n\
                 Hint: run `forecast configure` or set {API_KEY_ENV}."
            ))
        })?;

        let base_url = self.base_url.clone().filter(|u| !u.trim().is_empty()).ok_or_else(|| {
            FetchError::Config(format!(
                "No base URL configured.\n\
                 Hint: run `forecast configure` or set {BASE_URL_ENV}."
            ))
        })?;

        Ok(Credentials { api_key, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}
