//! Dashboard settings.
//!
//! Settings live in a JSON file, by default `<config dir>/epiboard/settings.json`.
//! Every key is optional; a missing file means all defaults. The `PORT`
//! environment variable overrides the configured port.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SOURCE, PORT_ENV_VAR, SETTINGS_FILE_NAME,
};
use crate::data::LoadResult;
use crate::transport::Source;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path or URL of the case data
    pub source: String,
    /// Base URL relative sources are resolved against
    pub base_url: Option<String>,
    pub host: String,
    pub port: u16,
    /// Directory served for paths other than the dashboard itself
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            base_url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_settings_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load from a settings file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Apply a `PORT` value, if one is set
    pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self, SettingsError> {
        if let Some(raw) = port {
            self.port = raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidPort(raw.to_string()))?;
        }
        Ok(self)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, SettingsError> {
        let port = std::env::var(PORT_ENV_VAR).ok();
        self.with_port_override(port.as_deref())
    }

    pub fn base_url(&self) -> Result<Option<Url>, SettingsError> {
        self.base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(SettingsError::from)
    }

    /// The configured data source
    pub fn data_source(&self, base: Option<&Url>) -> LoadResult<Source> {
        Source::parse(&self.source, base)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default settings file location
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}
