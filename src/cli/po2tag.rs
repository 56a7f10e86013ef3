//! `po2tag` - tag the assets whose plugin output matches a regex

use colored::Colorize;

use crate::cli::Po2TagArgs;
use crate::cli::args::{GlobalOptions, load_json_arg, load_regex_arg};
use crate::cli::context::CommandContext;
use crate::cli::tagging::{TagAssigner, ensure_tag};
use crate::client::models::Asset;
use crate::client::{
    MatchingFindingAssets, OutputMatcher, PaginatedCollector, PaginationParams, SortOrder,
    TenableApi,
};
use crate::error::Result;

/// Attributes requested from the host findings search
pub const FINDING_FIELDS: [&str; 4] = ["asset.name", "asset.id", "output", "severity"];

/// Finding search parameters: most severe first, only the fields used.
pub fn finding_params(base: &PaginationParams) -> PaginationParams {
    PaginationParams::new()
        .limit(base.limit)
        .sort_by("severity", SortOrder::Desc)
        .fields(FINDING_FIELDS)
}

/// Tag `category:value` onto the assets of every finding matched by
/// `filter` whose output satisfies `matcher`.
///
/// Returns the number of assets tagged.
pub async fn execute<C: TenableApi + ?Sized>(
    client: &C,
    collector: &PaginatedCollector,
    category: &str,
    value: &str,
    filter: &serde_json::Value,
    matcher: OutputMatcher,
) -> Result<usize> {
    let tag = ensure_tag(client, collector, category, value).await?;

    let findings = collector
        .clone()
        .with_params(finding_params(collector.params()));
    let source = MatchingFindingAssets::new(client, matcher);
    let mut assigner = TagAssigner::new(client, &tag);

    let result = findings
        .collect(&source, filter, |a: &Asset| a.id.clone(), &mut assigner)
        .await;
    assigner.finish();
    let assets = result?;

    let marker = if assets.is_cancelled() {
        "(!)".yellow()
    } else {
        "(*)".green()
    };
    println!(
        "{} Tag \"{}\" assigned to {} assets ({} pages of findings)",
        marker,
        tag.label(),
        assigner.assigned(),
        assets.pages
    );
    Ok(assigner.assigned())
}

/// Run the po2tag command
pub async fn run(opts: &GlobalOptions, args: &Po2TagArgs) -> Result<()> {
    let filter = load_json_arg(&args.filters)?;
    println!("(*) Filter: {}", filter);

    let matcher = OutputMatcher::new(&load_regex_arg(&args.regex)?, args.regex_negative)?;
    println!("(*) Regex: {}", matcher.pattern());

    let ctx = CommandContext::new(opts)?;
    execute(
        &ctx.client,
        &ctx.collector(),
        &args.tag_category,
        &args.tag_name,
        &filter,
        matcher,
    )
    .await?;
    Ok(())
}
