//! Network API trait

use async_trait::async_trait;

use crate::client::models::{Network, NetworkFilter};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Scanner network operations
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// List one page of networks (offset paginated, `cursor` is the offset)
    async fn list_networks(
        &self,
        filter: &NetworkFilter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Network>>;
}
