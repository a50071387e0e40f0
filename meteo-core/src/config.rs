use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::{Path, PathBuf}};

use crate::{city::{self, CityCoordinate}, provider::open_meteo::DEFAULT_BASE_URL};

pub const DEFAULT_OUTPUT: &str = "weather_dashboard.png";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forecast endpoint queried once per city.
    pub base_url: String,

    /// Where the dashboard image is written.
    pub output: PathBuf,

    /// Maximum number of in-flight requests. 1 means strictly sequential.
    pub concurrency: usize,

    /// Replacement registry. Example TOML:
    /// [[cities]]
    /// name = "Oslo"
    /// latitude = 59.91
    /// longitude = 10.75
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<CityCoordinate>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            concurrency: 1,
            cities: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The registry to query: the configured override or the built-in list.
    pub fn registry(&self) -> Vec<CityCoordinate> {
        self.cities.clone().unwrap_or_else(city::default_registry)
    }

    /// Effective request bound, never below one.
    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }

        if let Some(cities) = &self.cities {
            if cities.is_empty() {
                bail!("cities, when set, must list at least one city");
            }

            let mut seen = HashSet::new();
            for c in cities {
                if !seen.insert(c.name.as_str()) {
                    bail!("city '{}' is listed more than once", c.name);
                }
                if !(-90.0..=90.0).contains(&c.latitude) || !(-180.0..=180.0).contains(&c.longitude) {
                    bail!("city '{}' has out-of-range coordinates", c.name);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_setup() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.output, PathBuf::from("weather_dashboard.png"));
        assert_eq!(cfg.concurrency(), 1);
        assert_eq!(cfg.registry().len(), 10);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_custom_cities() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            concurrency: 4,
            cities: Some(vec![CityCoordinate::new("Oslo", 59.91, 10.75)]),
            ..Config::default()
        };
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.registry()[0].name, "Oslo");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "output = \"out.png\"\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.output, PathBuf::from("out.png"));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn request_timeout_is_not_configurable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 0\n").expect("write");

        let cfg = Config::load_from(&path).expect("unknown keys are ignored");
        assert_eq!(cfg, Config::default());

        cfg.save_to(&path).expect("save");
        let saved = fs::read_to_string(&path).expect("read back");
        assert!(!saved.contains("timeout"));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let cfg = Config { concurrency: 0, ..Config::default() };
        assert_eq!(cfg.concurrency(), 1);
    }

    #[test]
    fn duplicate_cities_are_rejected() {
        let cfg = Config {
            cities: Some(vec![
                CityCoordinate::new("Oslo", 59.91, 10.75),
                CityCoordinate::new("Oslo", 59.0, 10.0),
            ]),
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn empty_city_override_is_rejected() {
        let cfg = Config { cities: Some(Vec::new()), ..Config::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "concurrency = \"lots\"\n").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
