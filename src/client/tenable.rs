//! Tenable.io API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{AgentApi, ExploreApi, NetworkApi, RemediationApi, ScanApi, TagApi};
use super::models::{
    Agent, AgentFilter, AgentGroup, Asset, Folder, HostFinding, Network, NetworkFilter,
    PermissionEntry, RemediationGoal, RemediationGoalRequest, Scan, ScanAcl, Tag,
    TagAssignmentAction, UserGroup, UserSummary,
};
use super::pagination::{CursorPagination, OffsetCursor, OffsetPagination, Page, PaginationParams};
use super::rate_limit::{EndpointCategory, RateLimiterSet};
use crate::error::{ApiError, Result};

/// Tenable.io API base URL
pub const DEFAULT_API_HOST: &str = "https://cloud.tenable.com";

/// Description attached to tags created by this tool
pub const TAG_DESCRIPTION: &str = "Created via API";

/// Tenable.io API client
pub struct TioClient {
    http: HttpClient,
    base_url: String,
    access_key: String,
    secret_key: String,
    rate_limiters: RateLimiterSet,
}

impl TioClient {
    /// Create a client; `host` defaults to the public platform.
    pub fn with_host(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        host: Option<String>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("tiohelpers/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = host
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            rate_limiters: RateLimiterSet::new(),
        })
    }

    fn api_keys_header(&self) -> String {
        format!(
            "accessKey={};secretKey={};",
            self.access_key, self.secret_key
        )
    }

    /// Send a request and map non-success statuses to [`ApiError`].
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let category = EndpointCategory::from_request(path, &method);
        self.rate_limiters.wait_for(category).await;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("X-ApiKeys", self.api_keys_header())
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        debug!("{} -> {}", path, status);
        match status {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| path.to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                self.rate_limiters.activate(category);
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    /// Make a request and decode the JSON response body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let response = self.execute(method, path, query, body).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
        })?;
        Ok(data)
    }

    /// Make a request whose response body is not needed.
    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<()> {
        self.execute(method, path, &[], body).await?;
        Ok(())
    }

    async fn post_search<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<T> {
        let body = params.to_search_body(filter, cursor);
        self.request(Method::POST, path, &[], Some(&body)).await
    }

    async fn change_assignments(
        &self,
        action: TagAssignmentAction,
        asset_ids: &[String],
        tag_ids: &[String],
    ) -> Result<()> {
        let body = serde_json::json!({
            "action": action,
            "assets": asset_ids,
            "tags": tag_ids,
        });
        self.request_unit(Method::POST, "/tags/assets/assignments", Some(&body))
            .await
    }
}

#[async_trait]
impl AgentApi for TioClient {
    async fn list_agent_groups(&self) -> Result<Vec<AgentGroup>> {
        #[derive(Deserialize)]
        struct GroupsResponse {
            #[serde(default)]
            groups: Vec<AgentGroup>,
        }

        let response: GroupsResponse = self
            .request(Method::GET, "/scanners/1/agent-groups", &[], None)
            .await?;
        Ok(response.groups)
    }

    async fn list_agents(
        &self,
        filter: &AgentFilter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Agent>> {
        #[derive(Deserialize)]
        struct AgentsResponse {
            #[serde(default)]
            agents: Vec<Agent>,
            #[serde(default)]
            pagination: OffsetPagination,
        }

        let offset = OffsetCursor::decode(cursor)?;
        let mut query = params.to_offset_query(offset);
        query.extend(filter.to_query());

        let response: AgentsResponse = self
            .request(Method::GET, "/scanners/1/agents", &query, None)
            .await?;

        let next = response
            .pagination
            .next_offset(offset, response.agents.len());
        Ok(Page::new(response.agents, OffsetCursor::encode(next))
            .with_total(response.pagination.total))
    }
}

#[async_trait]
impl ExploreApi for TioClient {
    async fn search_assets(
        &self,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Asset>> {
        #[derive(Deserialize)]
        struct AssetsResponse {
            #[serde(default)]
            assets: Vec<Asset>,
            #[serde(default)]
            pagination: CursorPagination,
        }

        let response: AssetsResponse = self
            .post_search("/api/v3/assets/search", filter, params, cursor)
            .await?;
        Ok(Page::new(response.assets, response.pagination.next)
            .with_total(response.pagination.total))
    }

    async fn search_host_findings(
        &self,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<HostFinding>> {
        #[derive(Deserialize)]
        struct FindingsResponse {
            #[serde(default)]
            findings: Vec<HostFinding>,
            #[serde(default)]
            pagination: CursorPagination,
        }

        let response: FindingsResponse = self
            .post_search(
                "/api/v3/findings/vulnerabilities/host/search",
                filter,
                params,
                cursor,
            )
            .await?;
        Ok(Page::new(response.findings, response.pagination.next)
            .with_total(response.pagination.total))
    }
}

#[async_trait]
impl TagApi for TioClient {
    async fn find_tag(&self, category: &str, value: &str) -> Result<Option<Tag>> {
        #[derive(Deserialize)]
        struct ValuesResponse {
            #[serde(default)]
            values: Vec<Tag>,
        }

        let query = [
            ("f", format!("category_name:eq:{}", category)),
            ("f", format!("value:eq:{}", value)),
            ("ft", "and".to_string()),
            ("limit", "1".to_string()),
        ];
        let response: ValuesResponse = self
            .request(Method::GET, "/tags/values", &query, None)
            .await?;
        Ok(response.values.into_iter().next())
    }

    async fn create_tag(&self, category: &str, value: &str, description: &str) -> Result<Tag> {
        let body = serde_json::json!({
            "category_name": category,
            "value": value,
            "description": description,
            "category_description": description,
        });
        self.request(Method::POST, "/tags/values", &[], Some(&body))
            .await
    }

    async fn assign_tags(&self, asset_ids: &[String], tag_ids: &[String]) -> Result<()> {
        self.change_assignments(TagAssignmentAction::Add, asset_ids, tag_ids)
            .await
    }

    async fn unassign_tags(&self, asset_ids: &[String], tag_ids: &[String]) -> Result<()> {
        self.change_assignments(TagAssignmentAction::Remove, asset_ids, tag_ids)
            .await
    }
}

#[async_trait]
impl RemediationApi for TioClient {
    async fn create_goal(&self, goal: &RemediationGoalRequest) -> Result<()> {
        let body = serde_json::to_value(goal)?;
        self.request_unit(Method::POST, "/remediation/goal", Some(&body))
            .await
    }

    async fn search_goals(&self, filter: &serde_json::Value) -> Result<Vec<RemediationGoal>> {
        #[derive(Deserialize)]
        struct GoalsResponse {
            #[serde(default)]
            goals: Vec<RemediationGoal>,
        }

        let body = serde_json::json!({
            "filter": filter,
            "limit": 200,
            "next": null,
            "sort": [{"property": "name", "order": "desc"}],
        });
        let response: GoalsResponse = self
            .request(Method::POST, "/remediation/goal/search", &[], Some(&body))
            .await?;
        Ok(response.goals)
    }
}

#[async_trait]
impl ScanApi for TioClient {
    async fn list_scans(&self, folder_id: Option<u64>) -> Result<Vec<Scan>> {
        #[derive(Deserialize)]
        struct ScansResponse {
            #[serde(default)]
            scans: Option<Vec<Scan>>,
        }

        let query: Vec<(&str, String)> = folder_id
            .map(|id| ("folder_id", id.to_string()))
            .into_iter()
            .collect();
        let response: ScansResponse = self.request(Method::GET, "/scans", &query, None).await?;
        Ok(response.scans.unwrap_or_default())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>> {
        #[derive(Deserialize)]
        struct FoldersResponse {
            #[serde(default)]
            folders: Vec<Folder>,
        }

        let response: FoldersResponse = self.request(Method::GET, "/folders", &[], None).await?;
        Ok(response.folders)
    }

    async fn get_user(&self, user_id: u64) -> Result<UserSummary> {
        self.request(Method::GET, &format!("/users/{}", user_id), &[], None)
            .await
    }

    async fn list_groups(&self) -> Result<Vec<UserGroup>> {
        #[derive(Deserialize)]
        struct GroupsResponse {
            #[serde(default)]
            groups: Vec<UserGroup>,
        }

        let response: GroupsResponse = self.request(Method::GET, "/groups", &[], None).await?;
        Ok(response.groups)
    }

    async fn list_scan_permissions(&self, scan_id: u64) -> Result<Vec<PermissionEntry>> {
        #[derive(Deserialize)]
        struct AclsResponse {
            #[serde(default)]
            acls: Vec<PermissionEntry>,
        }

        let response: AclsResponse = self
            .request(
                Method::GET,
                &format!("/permissions/scan/{}", scan_id),
                &[],
                None,
            )
            .await?;
        Ok(response.acls)
    }

    async fn change_scan_permission(&self, scan_id: u64, entry: &PermissionEntry) -> Result<()> {
        let body = serde_json::json!({ "acls": [entry] });
        self.request_unit(
            Method::PUT,
            &format!("/permissions/scan/{}", scan_id),
            Some(&body),
        )
        .await
    }

    async fn configure_scan_acls(
        &self,
        scan_id: u64,
        owner_id: Option<u64>,
        acls: &ScanAcl,
    ) -> Result<()> {
        let mut settings = serde_json::json!({ "acls": acls });
        if let Some(owner) = owner_id {
            settings["owner_id"] = serde_json::json!(owner);
        }
        let body = serde_json::json!({ "settings": settings });
        self.request_unit(Method::PUT, &format!("/scans/{}", scan_id), Some(&body))
            .await
    }
}

#[async_trait]
impl NetworkApi for TioClient {
    async fn list_networks(
        &self,
        filter: &NetworkFilter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Network>> {
        #[derive(Deserialize)]
        struct NetworksResponse {
            #[serde(default)]
            networks: Vec<Network>,
            #[serde(default)]
            pagination: OffsetPagination,
        }

        let offset = OffsetCursor::decode(cursor)?;
        let mut query = params.to_offset_query(offset);
        if filter.include_deleted {
            query.push(("includeDeleted", "true".to_string()));
        }

        let response: NetworksResponse = self.request(Method::GET, "/networks", &query, None).await?;

        let next = response
            .pagination
            .next_offset(offset, response.networks.len());
        Ok(Page::new(response.networks, OffsetCursor::encode(next))
            .with_total(response.pagination.total))
    }
}
