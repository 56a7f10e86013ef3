//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{ScanApi, TioClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for both API keys, checks them against the platform and saves
/// them. Other settings of an existing file are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to tiohelpers!".bold().green());
    println!("Let's set up your Tenable.io API keys.\n");

    let access_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your access key")
        .interact()?;
    let secret_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your secret key")
        .interact()?;

    println!("\n{}", "Verifying keys...".cyan());
    let client = TioClient::with_host(
        access_key.clone(),
        secret_key.clone(),
        opts.api_host.clone(),
    )?;
    let folders = client.list_folders().await?;
    println!(
        "{} Keys accepted ({} scan folders visible)",
        "✓".green(),
        folders.len()
    );

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    config.access_key = Some(access_key);
    config.secret_key = Some(secret_key);
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "tiohelpers status".cyan());
    println!("  {} - List scanner networks", "tiohelpers list-networks".cyan());

    Ok(())
}
