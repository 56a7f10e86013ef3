//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Where a credential comes from.
fn key_source(override_set: bool, in_file: bool) -> Option<&'static str> {
    if override_set {
        Some("environment/flag")
    } else if in_file {
        Some("config file")
    } else {
        None
    }
}

/// Mask a key, keeping its last four characters.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(8), tail)
}

fn print_key(label: &str, value: Option<&str>, source: Option<&str>, env: &str) {
    match (value.filter(|v| !v.is_empty()), source) {
        (Some(value), Some(source)) => println!(
            "{} {} configured: {} {}",
            "✓".green(),
            label,
            mask_key(value),
            format!("(from {})", source).dimmed()
        ),
        _ => {
            println!("{} {} not configured", "✗".red(), label);
            println!("  → Run 'tiohelpers init' or set {}", env);
        }
    }
}

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "tiohelpers Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let file = match Config::load_from(config_path.clone()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(_) => {
            println!("{} Configuration file not found", "○".dimmed());
            Config::default()
        }
    };
    println!();

    let overrides = opts.overrides();
    let config = file.clone().with_overrides(&overrides);

    print_key(
        "Access key",
        config.access_key.as_deref(),
        key_source(overrides.access_key.is_some(), file.access_key.is_some()),
        "ACCESS_KEY",
    );
    print_key(
        "Secret key",
        config.secret_key.as_deref(),
        key_source(overrides.secret_key.is_some(), file.secret_key.is_some()),
        "SECRET_KEY",
    );

    if let Some(ref host) = config.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }
    println!(
        "{} Page size {}, at most {} pages per search",
        "○".dimmed(),
        config.preferences.page_size,
        config.preferences.max_pages
    );
    println!();

    Ok(())
}
