use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

pub const DEFAULT_CONTAINER_ID: &str = "text-selection-container";
pub const DEFAULT_COLOR: &str = "yellow";
const DEFAULT_STORE_PATH: &str = "~/.local/share/persistent-highlights/highlights.json";

static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid color {0:?}: expected a CSS color name or hex literal")]
    InvalidColor(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding the highlight list
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Id of the element wrapping rendered content
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            container_id: default_container_id(),
            default_color: default_color(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_STORE_PATH).as_ref())
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        validate_color(&config.default_color)?;

        // Expand shell variables and tilde in the loaded store path
        config.store_path = Self::expand_path(&config.store_path).unwrap_or(config.store_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/persistent-highlights");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Accepts CSS color names (`yellow`, `lightgreen`) and hex literals
/// (`#ff0`, `#ffff0080`).
pub fn validate_color(color: &str) -> Result<(), ConfigError> {
    let regex = COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[a-zA-Z]+|#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8}))$")
            .expect("Invalid color regex")
    });
    if regex.is_match(color) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor(color.to_string()))
    }
}
