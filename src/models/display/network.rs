//! Network display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Network;
use crate::output::formatters::{format_millis_local, yes_no};

/// Console page of a network.
pub fn network_url(uuid: &str) -> String {
    format!(
        "https://cloud.tenable.com/tio/app.html#/settings/sensors/nessus/networks/network-details/{}/settings",
        uuid
    )
}

/// Network row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NetworkDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ID")]
    pub uuid: String,

    #[tabled(rename = "SCANNERS")]
    pub scanner_count: u64,

    #[tabled(rename = "DEFAULT")]
    pub is_default: &'static str,

    #[tabled(rename = "TTL (DAYS)")]
    pub assets_ttl_days: String,

    #[tabled(rename = "DELETED")]
    pub deleted: String,
}

impl From<&Network> for NetworkDisplay {
    fn from(network: &Network) -> Self {
        Self {
            name: network.name.clone(),
            uuid: network.uuid.clone(),
            scanner_count: network.scanner_count.unwrap_or(0),
            is_default: yes_no(network.is_default),
            assets_ttl_days: network
                .assets_ttl_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            deleted: match network.deleted {
                Some(ts) if ts > 0 => format_millis_local(Some(ts)),
                _ => "-".to_string(),
            },
        }
    }
}

/// Network CSV record, columns in export order.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkRecord {
    pub name: String,
    pub uuid: String,
    pub assets_ttl_days: Option<u64>,
    pub created: Option<i64>,
    pub created_by: Option<String>,
    pub created_in_seconds: Option<i64>,
    pub deleted: Option<i64>,
    pub deleted_by: Option<String>,
    pub description: Option<String>,
    pub is_default: Option<bool>,
    pub modified: Option<i64>,
    pub modified_by: Option<String>,
    pub modified_in_seconds: Option<i64>,
    pub owner_uuid: Option<String>,
    pub scanner_count: Option<u64>,
}

impl From<&Network> for NetworkRecord {
    fn from(n: &Network) -> Self {
        Self {
            name: n.name.clone(),
            uuid: n.uuid.clone(),
            assets_ttl_days: n.assets_ttl_days,
            created: n.created,
            created_by: n.created_by.clone(),
            created_in_seconds: n.created_in_seconds,
            deleted: n.deleted,
            deleted_by: n.deleted_by.clone(),
            description: n.description.clone(),
            is_default: n.is_default,
            modified: n.modified,
            modified_by: n.modified_by.clone(),
            modified_in_seconds: n.modified_in_seconds,
            owner_uuid: n.owner_uuid.clone(),
            scanner_count: n.scanner_count,
        }
    }
}
