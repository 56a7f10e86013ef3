//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Overrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.tiohelpers/config.yaml)
    pub config: Option<String>,

    pub access_key: Option<String>,
    pub secret_key: Option<String>,

    /// Custom API host for testing
    pub api_host: Option<String>,

    pub page_size: Option<usize>,
    pub max_pages: Option<usize>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            access_key: cli.access_key.clone(),
            secret_key: cli.secret_key.clone(),
            api_host: cli.api_host.clone(),
            page_size: cli.page_size,
            max_pages: cli.max_pages,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Configuration overrides from flags and environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            api_host: self.api_host.clone(),
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }
}
