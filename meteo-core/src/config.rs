use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::parser::RowPolicy;

pub const DEFAULT_ENDPOINT: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Top-level configuration stored on disk.
///
/// Every key is optional in the file; missing keys fall back to the
/// Montpellier defaults.
///
/// Example TOML:
/// ```toml
/// latitude = 43.6119
/// longitude = 3.8772
/// row_policy = "abort"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    /// First day fetched when no start date is given.
    pub default_start: NaiveDate,
    /// Where the last fetched payload is kept.
    pub data_file: PathBuf,
    pub report_file: PathBuf,
    pub chart_dir: PathBuf,
    pub row_policy: RowPolicy,
    pub sample_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            latitude: 43.6119,
            longitude: 3.8772,
            timezone: "Europe/Paris".to_string(),
            default_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            data_file: default_data_file(),
            report_file: PathBuf::from("weather_report.txt"),
            chart_dir: PathBuf::from("."),
            row_policy: RowPolicy::Skip,
            sample_size: 20,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
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
        let dirs = project_dirs().ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "meteo", "meteo-cli")
}

fn default_data_file() -> PathBuf {
    const FILE: &str = "meteo_montpellier.csv";
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(FILE),
        None => PathBuf::from(FILE),
    }
}
