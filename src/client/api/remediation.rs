//! Remediation goal API trait

use async_trait::async_trait;

use crate::client::models::{RemediationGoal, RemediationGoalRequest};
use crate::error::Result;

/// Remediation goal operations
#[async_trait]
pub trait RemediationApi: Send + Sync {
    /// Create a remediation goal
    async fn create_goal(&self, goal: &RemediationGoalRequest) -> Result<()>;

    /// Search remediation goals (first 200 matches, newest name first)
    async fn search_goals(&self, filter: &serde_json::Value) -> Result<Vec<RemediationGoal>>;
}
