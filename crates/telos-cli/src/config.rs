//! Session configuration, read from a RON file.
//!
//! ```ron
//! (
//!     title: "Telos",
//!     welcome: true,
//!     log_filter: "info",
//! )
//! ```
//!
//! Every field is optional. A missing file at the default location means
//! defaults; an explicit `--config` path must exist and parse.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Heading printed above the document.
    pub title: String,
    /// Start the session from the welcome document instead of an empty one.
    pub welcome: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Telos".to_string(),
            welcome: true,
            log_filter: "info".to_string(),
        }
    }
}

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("RON parse error in {path}: {source}")]
    Ron {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

impl Config {
    /// `$XDG_CONFIG_HOME/telos/config.ron` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("telos").join("config.ron"))
    }

    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Ron {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit path if given, else the default path if it exists,
    /// else defaults. Returns the path actually read, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                let config = Self::load(&path)?;
                Ok((config, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }
}
