//! INI configuration file.
//!
//! ```ini
//! [sources]
//! component_list = /srv/mobile/component_list.txt
//! component_list_fallback = resources/common_ios/config/component_list.txt
//!
//! [logging]
//! level = info
//! file = /var/log/xcomponent.log
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::logging::{parse_level, LoggingConfig, DEFAULT_LOG_LEVEL};

/// Directory under the home directory holding the configuration.
pub const CONFIG_DIR_NAME: &str = ".xcomponent";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the configuration file.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid INI.
    #[error("invalid configuration in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// No configuration key has this name.
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// A key holds a value that cannot be interpreted.
    #[error("invalid value for [{section}] {key}: {value}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

/// Where component lists are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcesConfig {
    /// Primary component list locator.
    pub component_list: Option<String>,

    /// Locator tried when the primary one cannot be read.
    pub component_list_fallback: Option<String>,
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub sources: SourcesConfig,
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Load from `path`, or return defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load from `path`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let ini = Ini::load_from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|s| s.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    ///
    /// Unset keys are left out of the file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.set_to(Some(key.section()), key.key_name().to_string(), value);
            }
        }

        let write_failed = |e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }
        ini.write_to_file(path).map_err(write_failed)?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

/// A settable configuration key, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SourcesComponentList,
    SourcesComponentListFallback,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::SourcesComponentList,
            ConfigKey::SourcesComponentListFallback,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// INI section holding the key.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::SourcesComponentList | ConfigKey::SourcesComponentListFallback => "sources",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::SourcesComponentList => "component_list",
            ConfigKey::SourcesComponentListFallback => "component_list_fallback",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::SourcesComponentList => {
                config.sources.component_list.clone().unwrap_or_default()
            }
            ConfigKey::SourcesComponentListFallback => config
                .sources
                .component_list_fallback
                .clone()
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.to_string().to_lowercase(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Set the value from text. An empty value unsets the key.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());
        match self {
            ConfigKey::SourcesComponentList => config.sources.component_list = optional(),
            ConfigKey::SourcesComponentListFallback => {
                config.sources.component_list_fallback = optional()
            }
            ConfigKey::LoggingLevel => {
                config.logging.level = if value.is_empty() {
                    DEFAULT_LOG_LEVEL
                } else {
                    parse_level(value).ok_or_else(|| ConfigError::InvalidValue {
                        section: self.section().to_string(),
                        key: self.key_name().to_string(),
                        value: value.to_string(),
                    })?
                };
            }
            ConfigKey::LoggingFile => config.logging.file = optional().map(PathBuf::from),
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.trim())
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Default configuration file location, `~/.xcomponent/config.ini`.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}
