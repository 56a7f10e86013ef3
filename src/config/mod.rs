//! Configuration management for tiohelpers
//!
//! Credentials are loaded once at start-up from `~/.tiohelpers/config.yaml`
//! and may be overridden by the `ACCESS_KEY` / `SECRET_KEY` environment
//! variables (or the matching CLI flags). The resulting [`Config`] is
//! validated before any client is built and is never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default page size for search requests
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default cap on the number of pages walked by a single collection run
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tenable.io access key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Tenable.io secret key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Custom API host (e.g. `http://localhost:8080` for testing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum pages walked before a run is aborted
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

/// Runtime overrides collected from CLI flags and environment variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub api_host: Option<String>,
    pub page_size: Option<usize>,
    pub max_pages: Option<usize>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tiohelpers").join("config.yaml"))
    }

    /// Resolve the config path, preferring an explicit override.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional custom path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Credentials may come entirely from the environment, so a missing file
    /// is not an error at this point; [`Config::validate_auth`] decides.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional custom path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Keys are secrets: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply CLI/environment overrides on top of the file values.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(ref key) = overrides.access_key {
            self.access_key = Some(key.clone());
        }
        if let Some(ref key) = overrides.secret_key {
            self.secret_key = Some(key.clone());
        }
        if let Some(ref host) = overrides.api_host {
            self.api_host = Some(host.clone());
        }
        if let Some(size) = overrides.page_size {
            self.preferences.page_size = size;
        }
        if let Some(max) = overrides.max_pages {
            self.preferences.max_pages = max;
        }
        self
    }

    /// Validate that both credentials are present and non-empty.
    pub fn validate_auth(&self) -> Result<()> {
        if self.access_key.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingAccessKey.into());
        }
        if self.secret_key.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingSecretKey.into());
        }
        if self.preferences.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".to_string()).into());
        }
        if self.preferences.max_pages == 0 {
            return Err(ConfigError::Invalid("max_pages must be positive".to_string()).into());
        }
        Ok(())
    }
}
