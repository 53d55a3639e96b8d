use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, OptionExt, Result};
use serde::{Deserialize, Serialize};

use crate::services::export::DEFAULT_CONCURRENCY;
use crate::services::matching::matcher::MatchPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the exported JSON is written
    pub output: PathBuf,
    /// How many YouTube Music searches run at once
    pub concurrency: usize,
    pub matching: MatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("data.json"),
            concurrency: DEFAULT_CONCURRENCY,
            matching: MatchPolicy::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlist-porter").join("config.toml"))
    }

    /// Load the default config file, or the built-in defaults when there is
    /// none.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the defaults to the config path unless a file is already there.
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_eyre("No config directory on this platform")?;
        Self::default().write_if_missing(&path)?;
        Ok(path)
    }

    fn write_if_missing(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            tracing::info!("Config file already exists at {}", path.display());
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            concurrency = 4

            [matching]
            title_threshold = 0.7
            "#,
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("data.json"));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.matching.title_threshold, 0.7);
        assert_eq!(config.matching.artist_threshold, 0.8);
        assert_eq!(config.matching.title_prefix_ratio, 0.5);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "concurrency = \"many\"").unwrap();

        let error = Config::from_file(&path).unwrap_err();
        assert!(error.to_string().contains("config.toml"));
    }

    #[test]
    fn test_write_if_missing_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(Config::default().write_if_missing(&path).unwrap());
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());

        let custom = Config {
            concurrency: 2,
            ..Config::default()
        };
        assert!(!custom.write_if_missing(&path).unwrap());
        assert_eq!(Config::from_file(&path).unwrap().concurrency, DEFAULT_CONCURRENCY);
    }
}
