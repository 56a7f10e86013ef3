//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod agents;
pub mod args;
pub mod context;
pub mod group2tag;
pub mod init;
pub mod network;
pub mod po2tag;
pub mod progress;
pub mod remediation;
pub mod scan_permissions;
pub mod select;
pub mod status;
pub mod tagging;

pub use args::OutputFormat;

/// tiohelpers - Tenable.io helper commands
#[derive(Parser, Debug)]
#[command(name = "tiohelpers")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json, csv)
    #[arg(
        long,
        global = true,
        env = "TIOHELPERS_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TIOHELPERS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TIOHELPERS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Tenable.io access key
    #[arg(long, global = true, env = "ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Tenable.io secret key
    #[arg(long, global = true, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// API host override (testing only)
    #[arg(long, global = true, env = "TIOHELPERS_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Items requested per page
    #[arg(long, global = true, env = "TIOHELPERS_PAGE_SIZE", hide_env = true)]
    pub page_size: Option<usize>,

    /// Abort a search after this many pages
    #[arg(long, global = true, env = "TIOHELPERS_MAX_PAGES", hide_env = true)]
    pub max_pages: Option<usize>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize tiohelpers configuration
    Init,

    /// Show credential and configuration status
    Status,

    /// Display version information
    Version,

    /// Report agents of a group that never connected or never got plugin updates
    AgentsInfo(AgentsInfoArgs),

    /// Tag the assets of an agent group with AgentGroup:<group name>
    #[command(name = "group2tag")]
    Group2tag(Group2TagArgs),

    /// Tag the assets whose plugin output matches a regex
    #[command(name = "po2tag")]
    Po2tag(Po2TagArgs),

    /// Create a static remediation goal
    CreateRg(CreateRgArgs),

    /// Reset the permissions of a scan, or of every scan in a folder
    FixScanPermissions(FixScanPermissionsArgs),

    /// List scanner networks, deleted ones included
    ListNetworks,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   tiohelpers completion bash > /etc/bash_completion.d/tiohelpers
  zsh:    tiohelpers completion zsh > \"${fpath[1]}/_tiohelpers\"
  fish:   tiohelpers completion fish > ~/.config/fish/completions/tiohelpers.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments of `agents-info`
#[derive(Debug, Clone, Args)]
#[command(group(
    ArgGroup::new("report")
        .required(true)
        .multiple(true)
        .args(["never_connect", "plugins_never_update"])
))]
pub struct AgentsInfoArgs {
    /// Report agents that never connected
    #[arg(long)]
    pub never_connect: bool,

    /// Report agents whose plugins were never updated
    #[arg(long)]
    pub plugins_never_update: bool,

    /// Agent group ID
    #[arg(long)]
    pub agent_group_id: Option<String>,

    /// Agent group name (case-insensitive, ignored with --agent-group-id)
    #[arg(long)]
    pub agent_group_name: Option<String>,

    /// Directory for the CSV reports (defaults to the current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments of `group2tag`
#[derive(Debug, Clone, Args)]
pub struct Group2TagArgs {
    /// Agent group name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Agent group ID
    #[arg(short, long)]
    pub id: Option<String>,
}

/// Arguments of `po2tag`
#[derive(Debug, Clone, Args)]
pub struct Po2TagArgs {
    /// Tag category
    #[arg(short = 'c', long)]
    pub tag_category: String,

    /// Tag value
    #[arg(short = 'n', long)]
    pub tag_name: String,

    /// Regex matched against the plugin output (or @file)
    #[arg(short = 'e', long)]
    pub regex: String,

    /// Tag the findings whose output does not match
    #[arg(long)]
    pub regex_negative: bool,

    /// Host findings filter as JSON (or @file)
    #[arg(short, long)]
    pub filters: String,
}

/// Arguments of `create-rg`
#[derive(Debug, Clone, Args)]
pub struct CreateRgArgs {
    /// Name of the remediation goal
    #[arg(short, long)]
    pub name: String,

    /// Description (or @file)
    #[arg(short, long)]
    pub description: String,

    /// Finding conditions as JSON (or @file)
    #[arg(short, long)]
    pub conditions: String,

    /// Start date (YYYY-MM-DD)
    #[arg(short = 'S', long)]
    pub start_date: String,

    /// Due date (YYYY-MM-DD)
    #[arg(short = 'D', long)]
    pub due_date: String,
}

/// Arguments of `fix-scan-permissions`
#[derive(Debug, Clone, Args)]
pub struct FixScanPermissionsArgs {
    /// Scan to fix (ignored with --folder-id)
    #[arg(short, long)]
    pub scan_id: Option<u64>,

    /// Folder whose scans are fixed
    #[arg(short, long)]
    pub folder_id: Option<u64>,

    /// JSON file with the new ACLs
    #[arg(short, long)]
    pub acls_file: Option<PathBuf>,

    /// User that becomes the owner
    #[arg(short, long)]
    pub owner_id: Option<u64>,

    /// Pause between the scans of a folder
    #[arg(short, long)]
    pub interactive: bool,
}
