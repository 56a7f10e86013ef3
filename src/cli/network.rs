//! `list-networks` - list scanner networks, deleted ones included

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::client::models::{Network, NetworkFilter};
use crate::client::{Collection, Discard, NetworkApi, NetworkSearch, PaginatedCollector};
use crate::error::Result;
use crate::models::{NetworkDisplay, NetworkRecord, network_url};
use crate::output::csv::{QuoteStyle, format_csv};
use crate::output::json::format_json;
use crate::output::table::format_table;
use crate::output::{self, Formattable};

/// `Name` / `ID` / `URL` block per network.
pub fn format_pretty(networks: &[Network]) -> String {
    networks
        .iter()
        .map(|n| {
            format!(
                "Name : {}\nID   : {}\nURL  : {}\n",
                n.name,
                n.uuid,
                network_url(&n.uuid)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Formattable for [Network] {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(format_pretty(self)),
            OutputFormat::Table => {
                let rows: Vec<NetworkDisplay> = self.iter().map(NetworkDisplay::from).collect();
                Ok(format_table(&rows))
            }
            OutputFormat::Json => Ok(format_json(self)?),
            OutputFormat::Csv => {
                let rows: Vec<NetworkRecord> = self.iter().map(NetworkRecord::from).collect();
                let out = format_csv(&rows, QuoteStyle::NonNumeric)?;
                Ok(out.trim_end().to_string())
            }
        }
    }
}

/// Every network, deleted ones included, de-duplicated by UUID.
pub async fn collect_networks<C: NetworkApi + ?Sized>(
    client: &C,
    collector: &PaginatedCollector,
) -> Result<Collection<Network>> {
    let filter = NetworkFilter {
        include_deleted: true,
    };
    collector
        .collect(
            &NetworkSearch::new(client),
            &filter,
            |n: &Network| n.uuid.clone(),
            &mut Discard,
        )
        .await
}

/// Run the list-networks command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let networks = collect_networks(&ctx.client, &ctx.collector()).await?;
    if networks.is_cancelled() {
        log::warn!("Interrupted, listing the first {} pages only", networks.pages);
    }
    output::print(networks.items.as_slice(), ctx.format)
}
