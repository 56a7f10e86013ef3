//! Agent API trait

use async_trait::async_trait;

use crate::client::models::{Agent, AgentFilter, AgentGroup};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Agent and agent group operations
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// List all agent groups
    async fn list_agent_groups(&self) -> Result<Vec<AgentGroup>>;

    /// List one page of agents.
    ///
    /// The listing is offset paginated; `cursor` is the encoded offset of the
    /// page (see [`OffsetCursor`](crate::client::pagination::OffsetCursor)).
    async fn list_agents(
        &self,
        filter: &AgentFilter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Agent>>;
}
