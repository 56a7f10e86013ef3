//! Remediation goal models

use serde::{Deserialize, Serialize};

/// Body of a remediation goal creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationGoalRequest {
    pub name: String,
    pub description: String,
    /// Finding filter, serialised as a JSON string
    #[serde(rename = "findingfilters")]
    pub finding_filters: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// Start date, Unix seconds
    #[serde(rename = "startdate")]
    pub start_date: i64,
    /// Due date, Unix seconds
    #[serde(rename = "duedate")]
    pub due_date: i64,
    #[serde(rename = "goalduedate")]
    pub goal_due_date: GoalDueDate,
}

/// Goal due-date rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDueDate {
    pub name: String,
    pub value: String,
}

/// Remediation goal returned by the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationGoal {
    pub name: String,

    #[serde(rename = "goaluuid", default)]
    pub goal_uuid: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
