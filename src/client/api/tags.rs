//! Tag API trait

use async_trait::async_trait;

use crate::client::models::Tag;
use crate::error::Result;

/// Tag operations
#[async_trait]
pub trait TagApi: Send + Sync {
    /// Find the tag `category:value`, if it exists
    async fn find_tag(&self, category: &str, value: &str) -> Result<Option<Tag>>;

    /// Create the tag `category:value`.
    ///
    /// The category is created on the fly when missing, with the same
    /// description.
    async fn create_tag(&self, category: &str, value: &str, description: &str) -> Result<Tag>;

    /// Assign tags to assets
    async fn assign_tags(&self, asset_ids: &[String], tag_ids: &[String]) -> Result<()>;

    /// Remove tags from assets
    async fn unassign_tags(&self, asset_ids: &[String], tag_ids: &[String]) -> Result<()>;
}
