//! Scan ACL display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Permission, PermissionEntry};

/// Scan ACL entry row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AclDisplay {
    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PERMISSION")]
    pub permission: String,
}

impl From<&PermissionEntry> for AclDisplay {
    fn from(entry: &PermissionEntry) -> Self {
        Self {
            kind: entry.kind.clone(),
            id: entry.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            name: entry
                .display_name
                .clone()
                .or_else(|| entry.name.clone())
                .unwrap_or_else(|| "-".to_string()),
            permission: Permission::from_mask(entry.permissions)
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| entry.permissions.to_string()),
        }
    }
}
