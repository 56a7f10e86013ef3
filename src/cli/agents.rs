//! Agent group resolution and the `agents-info` report command

use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use log::info;

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::cli::select::select_interactively;
use crate::cli::AgentsInfoArgs;
use crate::client::models::{Agent, AgentFilter, AgentGroup};
use crate::client::{AgentApi, AgentSearch, Collection, Discard, PaginatedCollector};
use crate::error::{Error, Result};
use crate::models::{NeverConnectedRow, NeverUpdatedRow};
use crate::output::csv::write_report;
use crate::output::formatters::file_stamp;

/// Find the group named by `id` or `name` among `groups`.
///
/// The id wins when both are given. Names compare case-insensitively.
/// Returns `Ok(None)` when neither is given.
pub fn find_group(
    groups: &[AgentGroup],
    id: Option<&str>,
    name: Option<&str>,
) -> Result<Option<AgentGroup>> {
    if let Some(id) = id {
        if let Some(name) = name {
            println!(
                "{} Switch \"--agent-group-name {}\" will be ignored",
                "[W]".yellow(),
                name
            );
        }
        return groups
            .iter()
            .find(|g| g.id.to_string() == id.trim())
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::Other(format!("Unable to find agent group with id {}", id)));
    }

    if let Some(name) = name {
        let wanted = name.to_lowercase();
        return groups
            .iter()
            .find(|g| g.name.to_lowercase() == wanted)
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                Error::Other(format!("Unable to find agent group with name {}", name))
            });
    }

    Ok(None)
}

/// Resolve an agent group by id, name, or interactively.
pub async fn resolve_group<C: AgentApi + ?Sized>(
    client: &C,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<AgentGroup> {
    let groups = client.list_agent_groups().await?;
    match find_group(&groups, id, name)? {
        Some(group) => Ok(group),
        None => select_interactively(&groups, "agent group", |g| g.name.as_str(), |g| {
            g.id.to_string()
        })
        .cloned(),
    }
}

/// Every agent of `group_id`, de-duplicated by agent id.
pub async fn collect_group_agents<C: AgentApi + ?Sized>(
    client: &C,
    collector: &PaginatedCollector,
    group_id: u64,
) -> Result<Collection<Agent>> {
    collector
        .collect(
            &AgentSearch::new(client),
            &AgentFilter::in_group(group_id),
            |a: &Agent| a.id,
            &mut Discard,
        )
        .await
}

/// Agent reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    NeverConnect,
    PluginsNeverUpdate,
}

impl Report {
    pub fn name(self) -> &'static str {
        match self {
            Report::NeverConnect => "never_connect",
            Report::PluginsNeverUpdate => "plugins_never_update",
        }
    }

    /// `<report>.<group id>.<stamp>.csv` under `dir`.
    pub fn path(self, dir: &Path, group_id: u64, stamp: &str) -> PathBuf {
        dir.join(format!("{}.{}.{}.csv", self.name(), group_id, stamp))
    }

    /// Write the rows for `agents` to `path`; returns the row count.
    ///
    /// No file is created when no agent qualifies.
    pub fn write(self, agents: &[Agent], path: &Path) -> Result<usize> {
        match self {
            Report::NeverConnect => {
                let rows: Vec<NeverConnectedRow> = agents
                    .iter()
                    .filter(|a| a.never_connected())
                    .map(NeverConnectedRow::from)
                    .collect();
                if !rows.is_empty() {
                    write_report(path, &rows)?;
                }
                Ok(rows.len())
            }
            Report::PluginsNeverUpdate => {
                let rows: Vec<NeverUpdatedRow> = agents
                    .iter()
                    .filter(|a| a.plugins_never_updated())
                    .map(NeverUpdatedRow::from)
                    .collect();
                if !rows.is_empty() {
                    write_report(path, &rows)?;
                }
                Ok(rows.len())
            }
        }
    }
}

/// Run the selected reports for one group, writing files under `dir`.
///
/// Returns the written file paths.
pub async fn execute<C: AgentApi + ?Sized>(
    client: &C,
    collector: &PaginatedCollector,
    group: &AgentGroup,
    reports: &[Report],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    println!("[*] Looking info agent group: {} ({})", group.name, group.id);

    let agents = collect_group_agents(client, collector, group.id).await?;
    if agents.is_cancelled() {
        println!(
            "{} Interrupted after {} pages, no report written",
            "(!)".yellow(),
            agents.pages
        );
        return Ok(Vec::new());
    }
    info!("{} agents in group {}", agents.items.len(), group.id);

    let stamp = file_stamp(Local::now());
    let mut written = Vec::new();
    for report in reports {
        println!("[{}] Start analysis", report.name());
        let path = report.path(dir, group.id, &stamp);
        let count = report.write(&agents.items, &path)?;
        println!("[{}] {} agents", report.name(), count);

        if count > 0 {
            println!("[{}] Result saved: {}", report.name(), path.display());
            written.push(path);
        }
    }
    Ok(written)
}

/// Run the agents-info command
pub async fn run(opts: &GlobalOptions, args: &AgentsInfoArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let group = resolve_group(
        &ctx.client,
        args.agent_group_id.as_deref(),
        args.agent_group_name.as_deref(),
    )
    .await?;

    let mut reports = Vec::new();
    if args.never_connect {
        reports.push(Report::NeverConnect);
    }
    if args.plugins_never_update {
        reports.push(Report::PluginsNeverUpdate);
    }

    let dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    execute(&ctx.client, &ctx.collector(), &group, &reports, &dir).await?;
    Ok(())
}
