use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    client::{DEFAULT_BASE_URL, NetworkClient},
    model::Language,
    service::{ServiceConfiguration, WeatherService},
};

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV: &str = "WEATHERKIT_TOKEN";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// token = "eyJhbGciOiJFUzI1NiIs..."
/// language = "en"
/// country_code = "US"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Signed developer token (JWT) sent as the bearer credential.
    pub token: Option<String>,

    /// Language tag for localized content; "en" when absent.
    pub language: Option<String>,

    /// Default country for alerts and availability.
    pub country_code: Option<String>,

    /// Override of the API base URL, e.g. for a proxy.
    pub base_url: Option<String>,
}

impl Config {
    /// Token from the environment, falling back to the stored one.
    pub fn token(&self) -> Result<String> {
        let from_env = std::env::var(TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(token) = from_env {
            return Ok(token);
        }

        self.token.clone().ok_or_else(|| {
            anyhow!(
                "No WeatherKit token configured.\n\
                 Hint: run `weatherkit configure` or set {TOKEN_ENV}."
            )
        })
    }

    pub fn language(&self) -> Language {
        self.language.as_deref().map(Language::new).unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Country to use when the caller did not give one.
    pub fn country_code_or<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit.or(self.country_code.as_deref()).ok_or_else(|| {
            anyhow!(
                "No country code given.\n\
                 Hint: pass --country <CODE> or run `weatherkit configure` to store a default."
            )
        })
    }

    /// Build a service from the configured token, language and base URL.
    pub fn weather_service(&self) -> Result<WeatherService> {
        let token = self.token()?;
        let network = NetworkClient::with_reqwest()
            .context("Failed to build HTTP client")?
            .with_base_url(self.base_url());

        let configuration =
            ServiceConfiguration::new(move || token.clone()).with_language(self.language());
        Ok(WeatherService::new(configuration, network))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherkit", "weatherkit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
