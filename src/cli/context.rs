//! Command execution context
//!
//! Loads and validates the configuration, builds the API client and hands out
//! collectors wired to Ctrl-C.
//!
//! Ctrl-C is only intercepted once a collector has been handed out. The first
//! interrupt stops the page walk after the current page, the next one exits.

use std::sync::OnceLock;

use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{PaginatedCollector, PaginationParams, TioClient};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded, overridden and validated configuration
    pub config: Config,
    pub client: TioClient,
    pub format: OutputFormat,
    cancel: OnceLock<CancellationToken>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// The config file is optional when the credentials come from the
    /// environment or flags. Must be called from within the tokio runtime.
    ///
    /// # Errors
    /// Returns a configuration error before any network call if a key is
    /// missing or a preference is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?.with_overrides(&opts.overrides());
        config.validate_auth()?;

        let client = TioClient::with_host(
            config.access_key.clone().unwrap_or_default(),
            config.secret_key.clone().unwrap_or_default(),
            config.api_host.clone(),
        )?;

        Ok(Self {
            config,
            client,
            format: opts.format,
            cancel: OnceLock::new(),
        })
    }

    /// Request parameters for the configured page size.
    pub fn params(&self) -> PaginationParams {
        PaginationParams::new().limit(self.config.preferences.page_size)
    }

    /// Collector using `params`, the configured page cap and Ctrl-C.
    pub fn collector_with(&self, params: PaginationParams) -> PaginatedCollector {
        PaginatedCollector::new(params)
            .max_pages(self.config.preferences.max_pages)
            .with_cancellation(self.cancel.get_or_init(interrupt_token).clone())
    }

    /// Collector with default request parameters.
    pub fn collector(&self) -> PaginatedCollector {
        self.collector_with(self.params())
    }
}

/// Exit status after a second Ctrl-C (128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

/// Reaction to one Ctrl-C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    /// Let the running page walk stop on its own
    Stop,
    /// Already asked once; terminate now
    Exit,
}

fn on_interrupt(token: &CancellationToken) -> Interrupt {
    if token.is_cancelled() {
        Interrupt::Exit
    } else {
        token.cancel();
        Interrupt::Stop
    }
}

/// Token cancelled on the first Ctrl-C; the second one ends the process.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                debug!("Unable to listen for Ctrl-C: {}", e);
                return;
            }
            match on_interrupt(&child) {
                Interrupt::Stop => {
                    warn!("Interrupted, stopping after the current page (Ctrl-C again to exit)")
                }
                Interrupt::Exit => {
                    warn!("Interrupted again, exiting");
                    std::process::exit(EXIT_INTERRUPTED);
                }
            }
        }
    });
    token
}
