//! Explore (v3 search) API trait

use async_trait::async_trait;

use crate::client::models::{Asset, HostFinding};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Cursor-paginated searches of the v3 explore API
///
/// Filters are forwarded to the server verbatim.
#[async_trait]
pub trait ExploreApi: Send + Sync {
    /// Search assets
    async fn search_assets(
        &self,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Asset>>;

    /// Search host vulnerability findings
    async fn search_host_findings(
        &self,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<HostFinding>>;
}
