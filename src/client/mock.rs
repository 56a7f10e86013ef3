//! Mock Tenable.io API client for testing
//!
//! Implements every API trait from in-memory data so command handlers and
//! adapters can be tested without a server.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AgentApi, ExploreApi, NetworkApi, RemediationApi, ScanApi, TagApi};
use super::models::{
    Agent, AgentFilter, AgentGroup, Asset, Folder, HostFinding, Network, NetworkFilter,
    PermissionEntry, RemediationGoal, RemediationGoalRequest, Scan, ScanAcl, Tag,
    TagAssignmentAction, UserGroup, UserSummary,
};
use super::pagination::{Page, PaginationParams};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Paged data is configured as a list of pages; the mock hands out opaque
/// `page-N` cursors so that collectors walk the pages in order.
///
/// # Example
/// ```ignore
/// let mock = MockTenableClient::new()
///     .with_asset_pages(vec![vec![AssetBuilder::new("a-1").build()]])
///     .await;
/// ```
#[derive(Default)]
pub struct MockTenableClient {
    asset_pages: Arc<Mutex<Vec<Vec<Asset>>>>,
    finding_pages: Arc<Mutex<Vec<Vec<HostFinding>>>>,
    agent_pages: Arc<Mutex<Vec<Vec<Agent>>>>,
    network_pages: Arc<Mutex<Vec<Vec<Network>>>>,
    agent_groups: Arc<Mutex<Vec<AgentGroup>>>,
    tags: Arc<Mutex<Vec<Tag>>>,
    goals: Arc<Mutex<Vec<RemediationGoal>>>,
    scans: Arc<Mutex<Vec<Scan>>>,
    folders: Arc<Mutex<Vec<Folder>>>,
    users: Arc<Mutex<Vec<UserSummary>>>,
    user_groups: Arc<Mutex<Vec<UserGroup>>>,
    permissions: Arc<Mutex<HashMap<u64, Vec<PermissionEntry>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by the next tag assignment call
    assignment_error: Arc<Mutex<Option<ApiError>>>,
    call_count: Arc<Mutex<CallCounts>>,
    recorded: Arc<Mutex<Recorded>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub search_assets: usize,
    pub search_host_findings: usize,
    pub list_agents: usize,
    pub list_agent_groups: usize,
    pub list_networks: usize,
    pub find_tag: usize,
    pub create_tag: usize,
    pub assign_tags: usize,
    pub unassign_tags: usize,
    pub create_goal: usize,
    pub search_goals: usize,
    pub list_scans: usize,
    pub change_scan_permission: usize,
    pub configure_scan_acls: usize,
}

impl CallCounts {
    /// Total number of API calls made.
    pub fn total(&self) -> usize {
        self.search_assets
            + self.search_host_findings
            + self.list_agents
            + self.list_agent_groups
            + self.list_networks
            + self.find_tag
            + self.create_tag
            + self.assign_tags
            + self.unassign_tags
            + self.create_goal
            + self.search_goals
            + self.list_scans
            + self.change_scan_permission
            + self.configure_scan_acls
    }
}

/// One bulk tag (un)assignment request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentCall {
    pub action: TagAssignmentAction,
    pub assets: Vec<String>,
    pub tags: Vec<String>,
}

/// Write requests and filters received by the mock.
#[derive(Debug, Clone, Default)]
pub struct Recorded {
    pub search_filters: Vec<serde_json::Value>,
    pub agent_filters: Vec<AgentFilter>,
    pub cursors: Vec<Option<String>>,
    pub created_tags: Vec<Tag>,
    pub assignments: Vec<AssignmentCall>,
    pub created_goals: Vec<RemediationGoalRequest>,
    pub permission_changes: Vec<(u64, PermissionEntry)>,
    pub acl_changes: Vec<(u64, Option<u64>, ScanAcl)>,
}

fn page_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn paged<T: Clone>(pages: &[Vec<T>], cursor: Option<&str>) -> Page<T> {
    let index = page_index(cursor);
    let items = pages.get(index).cloned().unwrap_or_default();
    let next = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
    Page::new(items, next)
}

impl MockTenableClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_asset_pages(self, pages: Vec<Vec<Asset>>) -> Self {
        *self.asset_pages.lock().await = pages;
        self
    }

    pub async fn with_finding_pages(self, pages: Vec<Vec<HostFinding>>) -> Self {
        *self.finding_pages.lock().await = pages;
        self
    }

    pub async fn with_agent_pages(self, pages: Vec<Vec<Agent>>) -> Self {
        *self.agent_pages.lock().await = pages;
        self
    }

    pub async fn with_network_pages(self, pages: Vec<Vec<Network>>) -> Self {
        *self.network_pages.lock().await = pages;
        self
    }

    pub async fn with_agent_groups(self, groups: Vec<AgentGroup>) -> Self {
        *self.agent_groups.lock().await = groups;
        self
    }

    pub async fn with_tags(self, tags: Vec<Tag>) -> Self {
        *self.tags.lock().await = tags;
        self
    }

    pub async fn with_goals(self, goals: Vec<RemediationGoal>) -> Self {
        *self.goals.lock().await = goals;
        self
    }

    pub async fn with_scans(self, scans: Vec<Scan>) -> Self {
        *self.scans.lock().await = scans;
        self
    }

    pub async fn with_folders(self, folders: Vec<Folder>) -> Self {
        *self.folders.lock().await = folders;
        self
    }

    pub async fn with_users(self, users: Vec<UserSummary>) -> Self {
        *self.users.lock().await = users;
        self
    }

    pub async fn with_user_groups(self, groups: Vec<UserGroup>) -> Self {
        *self.user_groups.lock().await = groups;
        self
    }

    pub async fn with_permissions(self, scan_id: u64, acls: Vec<PermissionEntry>) -> Self {
        self.permissions.lock().await.insert(scan_id, acls);
        self
    }

    /// Fail the next API call, whatever it is.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Fail the next tag assignment or unassignment.
    pub async fn with_assignment_error(self, error: ApiError) -> Self {
        *self.assignment_error.lock().await = Some(error);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn recorded(&self) -> Recorded {
        self.recorded.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn record_assignment(
        &self,
        action: TagAssignmentAction,
        asset_ids: &[String],
        tag_ids: &[String],
    ) -> Result<()> {
        self.check_error().await?;
        if let Some(e) = self.assignment_error.lock().await.take() {
            return Err(e.into());
        }

        self.recorded.lock().await.assignments.push(AssignmentCall {
            action,
            assets: asset_ids.to_vec(),
            tags: tag_ids.to_vec(),
        });
        Ok(())
    }
}

#[async_trait]
impl AgentApi for MockTenableClient {
    async fn list_agent_groups(&self) -> Result<Vec<AgentGroup>> {
        self.check_error().await?;
        self.call_count.lock().await.list_agent_groups += 1;
        Ok(self.agent_groups.lock().await.clone())
    }

    async fn list_agents(
        &self,
        filter: &AgentFilter,
        _params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Agent>> {
        self.check_error().await?;
        self.call_count.lock().await.list_agents += 1;
        self.recorded.lock().await.agent_filters.push(filter.clone());
        Ok(paged(&self.agent_pages.lock().await, cursor))
    }
}

#[async_trait]
impl ExploreApi for MockTenableClient {
    async fn search_assets(
        &self,
        filter: &serde_json::Value,
        _params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Asset>> {
        self.check_error().await?;
        self.call_count.lock().await.search_assets += 1;
        {
            let mut recorded = self.recorded.lock().await;
            recorded.search_filters.push(filter.clone());
            recorded.cursors.push(cursor.map(str::to_string));
        }
        Ok(paged(&self.asset_pages.lock().await, cursor))
    }

    async fn search_host_findings(
        &self,
        filter: &serde_json::Value,
        _params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<HostFinding>> {
        self.check_error().await?;
        self.call_count.lock().await.search_host_findings += 1;
        {
            let mut recorded = self.recorded.lock().await;
            recorded.search_filters.push(filter.clone());
            recorded.cursors.push(cursor.map(str::to_string));
        }
        Ok(paged(&self.finding_pages.lock().await, cursor))
    }
}

#[async_trait]
impl TagApi for MockTenableClient {
    async fn find_tag(&self, category: &str, value: &str) -> Result<Option<Tag>> {
        self.check_error().await?;
        self.call_count.lock().await.find_tag += 1;
        Ok(self
            .tags
            .lock()
            .await
            .iter()
            .find(|t| t.category_name == category && t.value == value)
            .cloned())
    }

    async fn create_tag(&self, category: &str, value: &str, description: &str) -> Result<Tag> {
        self.check_error().await?;
        self.call_count.lock().await.create_tag += 1;

        let mut tags = self.tags.lock().await;
        let tag = Tag {
            uuid: format!("tag-{}", tags.len() + 1),
            category_name: category.to_string(),
            value: value.to_string(),
            description: Some(description.to_string()),
        };
        tags.push(tag.clone());
        self.recorded.lock().await.created_tags.push(tag.clone());
        Ok(tag)
    }

    async fn assign_tags(&self, asset_ids: &[String], tag_ids: &[String]) -> Result<()> {
        self.call_count.lock().await.assign_tags += 1;
        self.record_assignment(TagAssignmentAction::Add, asset_ids, tag_ids)
            .await
    }

    async fn unassign_tags(&self, asset_ids: &[String], tag_ids: &[String]) -> Result<()> {
        self.call_count.lock().await.unassign_tags += 1;
        self.record_assignment(TagAssignmentAction::Remove, asset_ids, tag_ids)
            .await
    }
}

#[async_trait]
impl RemediationApi for MockTenableClient {
    async fn create_goal(&self, goal: &RemediationGoalRequest) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.create_goal += 1;
        self.recorded.lock().await.created_goals.push(goal.clone());
        Ok(())
    }

    async fn search_goals(&self, _filter: &serde_json::Value) -> Result<Vec<RemediationGoal>> {
        self.check_error().await?;
        self.call_count.lock().await.search_goals += 1;
        Ok(self.goals.lock().await.clone())
    }
}

#[async_trait]
impl ScanApi for MockTenableClient {
    async fn list_scans(&self, folder_id: Option<u64>) -> Result<Vec<Scan>> {
        self.check_error().await?;
        self.call_count.lock().await.list_scans += 1;
        Ok(self
            .scans
            .lock()
            .await
            .iter()
            .filter(|s| folder_id.is_none() || s.folder_id == folder_id)
            .cloned()
            .collect())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>> {
        self.check_error().await?;
        Ok(self.folders.lock().await.clone())
    }

    async fn get_user(&self, user_id: u64) -> Result<UserSummary> {
        self.check_error().await?;
        self.users
            .lock()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("user {}", user_id)).into())
    }

    async fn list_groups(&self) -> Result<Vec<UserGroup>> {
        self.check_error().await?;
        Ok(self.user_groups.lock().await.clone())
    }

    async fn list_scan_permissions(&self, scan_id: u64) -> Result<Vec<PermissionEntry>> {
        self.check_error().await?;
        Ok(self
            .permissions
            .lock()
            .await
            .get(&scan_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn change_scan_permission(&self, scan_id: u64, entry: &PermissionEntry) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.change_scan_permission += 1;
        self.recorded
            .lock()
            .await
            .permission_changes
            .push((scan_id, entry.clone()));
        Ok(())
    }

    async fn configure_scan_acls(
        &self,
        scan_id: u64,
        owner_id: Option<u64>,
        acls: &ScanAcl,
    ) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.configure_scan_acls += 1;
        self.recorded
            .lock()
            .await
            .acl_changes
            .push((scan_id, owner_id, acls.clone()));
        Ok(())
    }
}

#[async_trait]
impl NetworkApi for MockTenableClient {
    async fn list_networks(
        &self,
        _filter: &NetworkFilter,
        _params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Network>> {
        self.check_error().await?;
        self.call_count.lock().await.list_networks += 1;
        Ok(paged(&self.network_pages.lock().await, cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::*;

    #[tokio::test]
    async fn test_mock_pages_hand_out_cursors() {
        let mock = MockTenableClient::new()
            .with_asset_pages(vec![
                vec![AssetBuilder::new("a-1").build()],
                vec![AssetBuilder::new("a-2").build()],
            ])
            .await;
        let params = PaginationParams::new();
        let filter = serde_json::json!({});

        let first = mock.search_assets(&filter, &params, None).await.unwrap();
        assert_eq!(first.next.as_deref(), Some("page-1"));

        let second = mock.search_assets(&filter, &params, first.next.as_deref()).await.unwrap();
        assert_eq!(second.items[0].id, "a-2");
        assert!(second.next.is_none());
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed() {
        let mock = MockTenableClient::new()
            .with_error(ApiError::Forbidden)
            .await;

        assert!(mock.list_agent_groups().await.is_err());
        assert!(mock.list_agent_groups().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_create_tag_is_findable() {
        let mock = MockTenableClient::new();
        let created = mock.create_tag("Cat", "Val", "d").await.unwrap();

        let found = mock.find_tag("Cat", "Val").await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(mock.call_counts().await.total(), 2);
    }
}
