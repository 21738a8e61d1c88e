//! Configuration loading: TOML files layered with environment overrides.
//!
//! Files are loaded in order (later wins):
//! 1. `~/.config/cachebust/config.toml` (user)
//! 2. `./cachebust.toml`, or the path given on the command line
//! 3. Environment variables (`CACHEBUST_*`)
//!
//! ```toml
//! hash_length = 8
//! disabled = false
//! debug = false
//! storage = "disk"        # disk | memory | embedded
//! static_root = "website"
//! cache_days = 7
//!
//! [[files]]
//! source = "website/static/css/styles.min.css"
//! public = "/static/css/styles.min.css"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entry::FileEntry;
use crate::hash::DEFAULT_HASH_LENGTH;
use crate::registry::Registry;
use crate::storage::StorageMode;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// One file to cache bust, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Path of the original, on disk or inside the embedded archive.
    pub source: String,
    /// URL path the original is served on.
    pub public: String,
}

/// Cache busting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BustConfig {
    /// Hash prefix length. Default: 8
    #[serde(default = "BustConfig::default_hash_length")]
    pub hash_length: usize,

    /// Development mode, skips creation entirely.
    #[serde(default)]
    pub disabled: bool,

    /// Log the original/busted report after creation.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub storage: StorageMode,

    /// Directory served for requests that aren't busted copies in memory.
    /// Default: website
    #[serde(default = "BustConfig::default_static_root")]
    pub static_root: PathBuf,

    /// Archive directory served for embedded storage. Default: website
    #[serde(default = "BustConfig::default_embedded_root")]
    pub embedded_root: String,

    /// Browser cache lifetime; 0 disables caching.
    #[serde(default)]
    pub cache_days: u32,

    #[serde(default)]
    pub files: Vec<FileConfig>,
}

impl BustConfig {
    fn default_hash_length() -> usize {
        DEFAULT_HASH_LENGTH
    }

    fn default_static_root() -> PathBuf {
        PathBuf::from("website")
    }

    fn default_embedded_root() -> String {
        "website".to_string()
    }
}

impl Default for BustConfig {
    fn default() -> Self {
        Self {
            hash_length: Self::default_hash_length(),
            disabled: false,
            debug: false,
            storage: StorageMode::default(),
            static_root: Self::default_static_root(),
            embedded_root: Self::default_embedded_root(),
            cache_days: 0,
            files: Vec::new(),
        }
    }
}

/// A config file with every key optional, so it only overrides what it sets.
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    hash_length: Option<usize>,
    disabled: Option<bool>,
    debug: Option<bool>,
    storage: Option<StorageMode>,
    static_root: Option<PathBuf>,
    embedded_root: Option<String>,
    cache_days: Option<u32>,
    files: Option<Vec<FileConfig>>,
}

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

impl BustConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration, with `config_path` replacing `./cachebust.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and report which files and env vars contributed.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = BustConfig::default();

        for path in discover_config_files_with_override(config_path) {
            config.apply(load_layer(&path)?);
            sources.files.push(path);
        }

        config.apply_env_overrides(|key| std::env::var(key).ok(), &mut sources)?;

        Ok((config, sources))
    }

    /// Parse a complete config from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config = BustConfig::default();
        config.apply(parse_layer(contents, Path::new("<string>"))?);
        Ok(config)
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(v) = layer.hash_length {
            self.hash_length = v;
        }
        if let Some(v) = layer.disabled {
            self.disabled = v;
        }
        if let Some(v) = layer.debug {
            self.debug = v;
        }
        if let Some(v) = layer.storage {
            self.storage = v;
        }
        if let Some(v) = layer.static_root {
            self.static_root = v;
        }
        if let Some(v) = layer.embedded_root {
            self.embedded_root = v;
        }
        if let Some(v) = layer.cache_days {
            self.cache_days = v;
        }
        if let Some(v) = layer.files {
            self.files = v;
        }
    }

    /// Apply `CACHEBUST_*` overrides read through `lookup`.
    ///
    /// Taking a lookup function instead of reading the environment directly
    /// keeps tests independent of the process environment.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
        sources: &mut ConfigSources,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("CACHEBUST_HASH_LENGTH") {
            self.hash_length = parse_value("CACHEBUST_HASH_LENGTH", &v)?;
            sources.env_overrides.push("CACHEBUST_HASH_LENGTH".to_string());
        }
        if let Some(v) = lookup("CACHEBUST_DISABLED") {
            self.disabled = parse_bool("CACHEBUST_DISABLED", &v)?;
            sources.env_overrides.push("CACHEBUST_DISABLED".to_string());
        }
        if let Some(v) = lookup("CACHEBUST_DEBUG") {
            self.debug = parse_bool("CACHEBUST_DEBUG", &v)?;
            sources.env_overrides.push("CACHEBUST_DEBUG".to_string());
        }
        if let Some(v) = lookup("CACHEBUST_STORAGE") {
            self.storage = parse_value("CACHEBUST_STORAGE", &v)?;
            sources.env_overrides.push("CACHEBUST_STORAGE".to_string());
        }
        if let Some(v) = lookup("CACHEBUST_STATIC_ROOT") {
            self.static_root = PathBuf::from(v);
            sources.env_overrides.push("CACHEBUST_STATIC_ROOT".to_string());
        }
        if let Some(v) = lookup("CACHEBUST_CACHE_DAYS") {
            self.cache_days = parse_value("CACHEBUST_CACHE_DAYS", &v)?;
            sources.env_overrides.push("CACHEBUST_CACHE_DAYS".to_string());
        }
        Ok(())
    }

    /// Build a registry from this config.
    ///
    /// Embedded storage still needs its archive attached with
    /// [`Registry::with_embedded_source`] before `create`.
    pub fn to_registry(&self) -> Registry {
        Registry::new()
            .with_hash_length(self.hash_length)
            .with_storage(self.storage)
            .with_disabled(self.disabled)
            .with_debug(self.debug)
            .with_entries(
                self.files
                    .iter()
                    .map(|file| FileEntry::new(file.source.clone(), file.public.clone())),
            )
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
/// Only returns files that exist.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("cachebust/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("cachebust.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

fn load_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_layer(&contents, path)
}

fn parse_layer(contents: &str, path: &Path) -> Result<ConfigLayer, ConfigError> {
    toml::from_str(contents).map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
