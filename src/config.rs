use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings, read from `config.toml`.
/// Every field has a default so a missing or partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape_delay_ms: u64,
    pub hook_delay_ms: u64,
    pub toast_duration_ms: u64,
    /// RSS/Atom URLs. When non-empty the dashboard scrapes these instead of the mock feed.
    pub feeds: Vec<String>,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape_delay_ms: 1500,
            hook_delay_ms: 2000,
            toast_duration_ms: 3000,
            feeds: Vec::new(),
            http_timeout_secs: 30,
            user_agent: "Hookboard/0.1".to_string(),
        }
    }
}

impl Config {
    /// Loads the config from an explicit path, or from the first default location that exists.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(PathBuf::from(shellexpand::tilde(p).to_string())),
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn scrape_delay(&self) -> Duration {
        Duration::from_millis(self.scrape_delay_ms)
    }

    pub fn hook_delay(&self) -> Duration {
        Duration::from_millis(self.hook_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

/// `HOOKBOARD_CONFIG`, then `$XDG_CONFIG_HOME/hookboard/config.toml`, then `~/.config/hookboard/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HOOKBOARD_CONFIG") {
        return Some(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => home_dir().join(".config"),
    };
    Some(base.join("hookboard").join("config.toml"))
}

/// Directory for the dashboard log file. Created if missing.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = if let Ok(dir) = std::env::var("HOOKBOARD_DATA_DIR") {
        PathBuf::from(dir)
    } else if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("hookboard")
    } else {
        home_dir().join(".local/share/hookboard")
    };

    fs::create_dir_all(&base_dir)
        .with_context(|| format!("Failed to create data directory: {}", base_dir.display()))?;
    Ok(base_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
