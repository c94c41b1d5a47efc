//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    APP_BINARY_NAME, DEFAULT_INITIAL_REVEAL, DEFAULT_PAGE_SIZE, DEFAULT_REVEAL_STEP,
    MAX_PAGE_SIZE,
};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "VERBDECK_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Lowercase name as written in `config.toml`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => anyhow::bail!("Invalid theme mode '{other}'. Use auto, dark or light"),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Verb data file (`{"verbs": [...]}`); the bundled catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

/// HTTP service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Page size used by clients of `/api/verbs`
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3001
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            page_size: default_page_size(),
        }
    }
}

impl ServerConfig {
    /// `http://host:port` for clients of this server.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows shown in the verb table before the window grows
    #[serde(default = "default_initial_reveal")]
    pub initial_reveal: usize,
    /// Rows added each time the cursor nears the end of the window
    #[serde(default = "default_reveal_step")]
    pub reveal_step: usize,
    /// Theme used when no preference has been stored yet
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

const fn default_initial_reveal() -> usize {
    DEFAULT_INITIAL_REVEAL
}

const fn default_reveal_step() -> usize {
    DEFAULT_REVEAL_STEP
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            initial_reveal: default_initial_reveal(),
            reveal_step: default_reveal_step(),
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// `VERBDECK_CONFIG_DIR` wins when set; otherwise:
    /// - Linux: `~/.config/verbdeck/`
    /// - macOS: `~/Library/Application Support/verbdeck/`
    /// - Windows: `%APPDATA%\verbdeck\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `data_file` exists (if set)
    /// - `page_size` is within 1..=100
    /// - reveal sizes are positive
    pub fn validate(&self) -> Result<()> {
        if let Some(data_file) = &self.paths.data_file {
            if !data_file.is_file() {
                anyhow::bail!("Verb data file does not exist: {}", data_file.display());
            }
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.server.page_size) {
            anyhow::bail!(
                "server.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.server.page_size
            );
        }

        if self.ui.initial_reveal == 0 || self.ui.reveal_step == 0 {
            anyhow::bail!("ui.initial_reveal and ui.reveal_step must be greater than 0");
        }

        Ok(())
    }

    /// Sets the verb data file with validation.
    pub fn set_data_file(&mut self, path: PathBuf) -> Result<()> {
        self.paths.data_file = Some(path);
        self.validate()
    }
}
