use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::net::DEFAULT_TIMEOUT_MS;

/// Base URLs for the remote services.
///
/// Overriding them is how tests point the clients at a mock server, and how
/// self-hosted mirrors are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Postal-code directory.
    pub viacep: String,
    /// Structured coordinate service, keyed by postal code.
    pub brasilapi: String,
    /// Free-text geocoder.
    pub nominatim: String,
    /// Hourly forecast service.
    pub open_meteo: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            viacep: "https://viacep.com.br/ws".to_string(),
            brasilapi: "https://brasilapi.com.br/api/cep/v2".to_string(),
            nominatim: "https://nominatim.openstreetmap.org/search".to_string(),
            open_meteo: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wall-clock deadline for a single service call, in milliseconds.
    pub timeout_ms: u64,

    /// Default page size for the forecast pager, in hours.
    pub hours_per_page: usize,

    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            hours_per_page: 24,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// The shared request deadline.
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_services() {
        let cfg = Config::default();
        assert_eq!(cfg.timeout_ms, 8_000);
        assert_eq!(cfg.hours_per_page, 24);
        assert!(cfg.endpoints.viacep.starts_with("https://viacep.com.br"));
        assert!(cfg.endpoints.open_meteo.starts_with("https://api.open-meteo.com"));
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config {
            timeout_ms: 2_500,
            endpoints: Endpoints {
                viacep: "http://127.0.0.1:9000".to_string(),
                ..Endpoints::default()
            },
            ..Config::default()
        };

        let rendered = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let parsed: Config = toml::from_str("timeout_ms = 1000\n").unwrap();

        assert_eq!(parsed.timeout_ms, 1_000);
        assert_eq!(parsed.hours_per_page, 24);
        assert_eq!(parsed.endpoints, Endpoints::default());
    }
}
