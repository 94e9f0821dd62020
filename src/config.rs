use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ui::Theme;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR: &str = "karaoke-pal";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub library: LibraryConfig,
    pub ui: UiConfig,
    pub theme: Theme,
}

/// Generation endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model name, e.g. "gemini-2.5-flash"
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of songs to ask for
    pub song_count: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 60,
            song_count: 12,
        }
    }
}

/// Saved collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Data directory (empty = default data dir)
    pub data_dir: Option<String>,
}

/// UI customization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll interval in milliseconds
    pub tick_ms: u64,
    /// Number of card columns in song grids
    pub grid_columns: u16,
    /// Recent searches shown under the form
    pub quick_searches: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            grid_columns: 4,
            quick_searches: 3,
        }
    }
}

impl Config {
    /// Application config directory: `<config dir>/karaoke-pal`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .context("Failed to read config file")?;

            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;

            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Resolved data directory for saved collections
    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.library.data_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
            _ => crate::storage::LocalStore::default_dir(),
        }
    }

    /// Log file location: `<cache dir>/karaoke-pal/karaoke-pal.log`
    pub fn log_path() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .context("Failed to get cache directory")?
            .join(APP_DIR);
        fs::create_dir_all(&dir).context("Failed to create cache directory")?;
        Ok(dir.join("karaoke-pal.log"))
    }
}
