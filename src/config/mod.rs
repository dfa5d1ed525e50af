//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! the environment, then command-line flags.


use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Page that embeds the feed URL, fetched through a CORS proxy.
pub const DEFAULT_SOURCE_URL: &str =
    "http://cors-unblocker.herokuapp.com/get?url=http://www.reddit.com/r/thebutton";

/// Host the feed's WebSocket is served from.
pub const DEFAULT_ENDPOINT_HOST: &str = "wss.redditmedia.com";

/// Overrides `source_url` from the config file.
pub const SOURCE_URL_ENV: &str = "BUTTON_MONITOR_SOURCE_URL";

const CONFIG_DIR_NAME: &str = "button-monitor";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_url: String,
    pub endpoint_host: String,
    /// Print connection lifecycle and failure diagnostics.
    pub debug: bool,
    pub color: bool,
    /// Wait for a key press before exiting.
    pub wait_for_key: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            endpoint_host: DEFAULT_ENDPOINT_HOST.to_string(),
            debug: false,
            color: true,
            wait_for_key: true,
        }
    }
}

/// Values given on the command line. `None`/`false` leaves the loaded value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_url: Option<String>,
    pub endpoint_host: Option<String>,
    pub debug: bool,
    pub no_color: bool,
    pub no_wait: bool,
}

impl Config {
    /// `<config dir>/button-monitor/config.toml`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path, which must exist, or from the default
    /// path when present. Falls back to defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config")
    }

    /// Apply environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.source_url = url.to_string();
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.source_url {
            self.source_url = url;
        }
        if let Some(host) = overrides.endpoint_host {
            self.endpoint_host = host;
        }
        if overrides.debug {
            self.debug = true;
        }
        if overrides.no_color {
            self.color = false;
        }
        if overrides.no_wait {
            self.wait_for_key = false;
        }
    }
}
