//! `create-rg` - create a static remediation goal

use chrono::{Local, NaiveDate, TimeZone};

use crate::cli::CreateRgArgs;
use crate::cli::args::{GlobalOptions, load_json_arg, load_text_arg};
use crate::cli::context::CommandContext;
use crate::client::RemediationApi;
use crate::client::models::{GoalDueDate, RemediationGoal, RemediationGoalRequest};
use crate::error::{ConfigError, Result};

const DESCRIPTION_NOTE: &str = "\n\nNote: created via API";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ConfigError::InvalidInput(format!("Invalid date \"{}\" (expected YYYY-MM-DD): {}", value, e))
            .into()
    })
}

/// Unix seconds of local midnight on `date`.
pub fn local_midnight(date: NaiveDate) -> Result<i64> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        ConfigError::InvalidInput(format!("Invalid date {}", date))
    })?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| {
            ConfigError::InvalidInput(format!("{} has no local midnight", date)).into()
        })
}

/// Build the goal creation request from the raw command inputs.
pub fn build_goal(
    name: &str,
    description: &str,
    conditions: &serde_json::Value,
    start: &str,
    due: &str,
) -> Result<RemediationGoalRequest> {
    let start = parse_date(start)?;
    let due = parse_date(due)?;

    Ok(RemediationGoalRequest {
        name: name.to_string(),
        description: format!("{}{}", description, DESCRIPTION_NOTE),
        finding_filters: serde_json::to_string(conditions)?,
        kind: "Static".to_string(),
        status: "ACTIVE".to_string(),
        start_date: local_midnight(start)?,
        due_date: local_midnight(due)?,
        goal_due_date: GoalDueDate {
            name: "byFixedDate".to_string(),
            value: due.format("%Y-%m-%dT00:00:00.000Z").to_string(),
        },
    })
}

/// Search filter selecting goals by exact name.
pub fn name_filter(name: &str) -> serde_json::Value {
    serde_json::json!({
        "and": [{"property": "name", "operator": "eq", "value": name}]
    })
}

/// Create `goal`, then look it up by name and report what the server holds.
pub async fn execute<C: RemediationApi + ?Sized>(
    client: &C,
    goal: &RemediationGoalRequest,
) -> Result<Vec<RemediationGoal>> {
    client.create_goal(goal).await?;

    let goals = client.search_goals(&name_filter(&goal.name)).await?;
    for g in &goals {
        println!(
            "(*) Remediation goal has been created: {} ({})",
            g.name,
            g.goal_uuid.as_deref().unwrap_or("-")
        );
    }
    Ok(goals)
}

/// Run the create-rg command
pub async fn run(opts: &GlobalOptions, args: &CreateRgArgs) -> Result<()> {
    let description = load_text_arg(&args.description)?;
    let conditions = load_json_arg(&args.conditions)?;
    let goal = build_goal(
        &args.name,
        &description,
        &conditions,
        &args.start_date,
        &args.due_date,
    )?;

    let ctx = CommandContext::new(opts)?;
    execute(&ctx.client, &goal).await?;
    Ok(())
}
