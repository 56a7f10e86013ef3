//! Network model

use serde::{Deserialize, Serialize};

/// Scanner network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub assets_ttl_days: Option<u64>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_in_seconds: Option<i64>,
    #[serde(default)]
    pub deleted: Option<i64>,
    #[serde(default)]
    pub deleted_by: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub modified: Option<i64>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub modified_in_seconds: Option<i64>,
    #[serde(default)]
    pub owner_uuid: Option<String>,
    #[serde(default)]
    pub scanner_count: Option<u64>,
}

/// Filter for the network listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkFilter {
    /// Include networks that were deleted
    pub include_deleted: bool,
}
