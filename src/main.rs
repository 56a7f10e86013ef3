//! tiohelpers - command-line helpers for Tenable.io administration

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `warn` by default, `debug` with `--debug`; `RUST_LOG` wins over both.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match &cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("tiohelpers version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::AgentsInfo(args) => cli::agents::run(&opts, args).await,
        Commands::Group2tag(args) => cli::group2tag::run(&opts, args).await,
        Commands::Po2tag(args) => cli::po2tag::run(&opts, args).await,
        Commands::CreateRg(args) => cli::remediation::run(&opts, args).await,
        Commands::FixScanPermissions(args) => cli::scan_permissions::run(&opts, args).await,
        Commands::ListNetworks => cli::network::run(&opts).await,
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
