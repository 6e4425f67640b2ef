use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "timesheet-tui";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetConfig {
    /// Instance URL of the back-office org, e.g. "https://acme.my.salesforce.com"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Where exported CSV files are written. Defaults to the user's download dir.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Log file path. Defaults to `timesheet-tui.log` next to the config file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "https://login.salesforce.com".to_string()
}

impl Default for TimesheetConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            download_dir: None,
            log_file: None,
        }
    }
}

impl TimesheetConfig {
    fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("timesheet-tui.log")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = TimesheetConfig::parse("").unwrap();
        assert_eq!(config, TimesheetConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = TimesheetConfig::parse(
            r#"
            api_url = "https://acme.my.salesforce.com"
            download_dir = "/tmp/exports"
            log_file = "/tmp/timesheet.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://acme.my.salesforce.com");
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/exports"));
        assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/timesheet.log"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = TimesheetConfig {
            download_dir: Some(PathBuf::from("/srv/csv")),
            ..TimesheetConfig::default()
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        assert_eq!(TimesheetConfig::parse(&raw).unwrap(), config);
    }
}
