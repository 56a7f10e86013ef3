//! `group2tag` - tag the assets behind an agent group

use colored::Colorize;

use crate::cli::Group2TagArgs;
use crate::cli::agents::{collect_group_agents, resolve_group};
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::cli::tagging::{TagAssigner, ensure_tag};
use crate::client::models::{AgentGroup, Asset};
use crate::client::{AssetSearch, PaginatedCollector, TenableApi};
use crate::error::Result;

/// Category of the tags created by this command
pub const AGENT_GROUP_CATEGORY: &str = "AgentGroup";

/// Explore filter for the agent-sourced assets whose host name is in `names`.
pub fn agent_assets_filter(names: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "and": [
            {
                "property": "host_name",
                "operator": "eq",
                "value": names
            },
            {
                "property": "sources",
                "operator": "eq",
                "value": ["NESSUS_AGENT"]
            }
        ]
    })
}

/// Tag every asset of `group` with `AgentGroup:<group name>`.
///
/// Returns the number of assets tagged.
pub async fn execute<C: TenableApi + ?Sized>(
    client: &C,
    collector: &PaginatedCollector,
    group: &AgentGroup,
) -> Result<usize> {
    let agents = collect_group_agents(client, collector, group.id).await?;
    if agents.is_cancelled() {
        println!("{} Interrupted while listing agents", "(!)".yellow());
        return Ok(0);
    }
    if agents.items.is_empty() {
        println!("{} Agent group {} has no agents", "(!)".yellow(), group.name);
        return Ok(0);
    }

    let names: Vec<&str> = agents.items.iter().map(|a| a.name.as_str()).collect();
    let filter = agent_assets_filter(&names);

    let tag = ensure_tag(client, collector, AGENT_GROUP_CATEGORY, &group.name).await?;

    let mut assigner = TagAssigner::new(client, &tag);
    let result = collector
        .collect(
            &AssetSearch::new(client),
            &filter,
            |a: &Asset| a.id.clone(),
            &mut assigner,
        )
        .await;
    assigner.finish();
    let assets = result?;

    if assets.is_cancelled() {
        println!(
            "{} Interrupted, tag \"{}\" assigned to {} assets so far",
            "(!)".yellow(),
            tag.label(),
            assigner.assigned()
        );
    } else {
        println!(
            "{} Tag \"{}\" assigned to {} assets",
            "(*)".green(),
            tag.label(),
            assigner.assigned()
        );
    }
    Ok(assigner.assigned())
}

/// Run the group2tag command
pub async fn run(opts: &GlobalOptions, args: &Group2TagArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let group = resolve_group(&ctx.client, args.id.as_deref(), args.name.as_deref()).await?;
    execute(&ctx.client, &ctx.collector(), &group).await?;
    Ok(())
}
