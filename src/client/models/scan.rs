//! Scan, folder and permission models

use serde::{Deserialize, Serialize};

/// Scan definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    /// Numeric scan ID
    pub id: u64,

    /// Scan name
    pub name: String,

    /// Folder containing the scan
    #[serde(default)]
    pub folder_id: Option<u64>,

    /// Owner user name
    #[serde(default)]
    pub owner: Option<String>,
}

/// Scan folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Numeric folder ID
    pub id: u64,

    /// Folder name
    pub name: String,
}

/// User details (subset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// Numeric user ID
    pub id: u64,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Login name
    #[serde(default)]
    pub username: Option<String>,
}

impl UserSummary {
    /// Best available display label.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// User group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserGroup {
    /// Numeric group ID
    pub id: u64,

    /// Group name
    pub name: String,
}

/// One ACL entry attached to a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// `default`, `user` or `group`
    #[serde(rename = "type")]
    pub kind: String,

    /// Object ID (absent for the default entry)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Permission bitmask
    #[serde(default)]
    pub permissions: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<u64>,
}

impl PermissionEntry {
    /// Whether this is the scan's default (everyone) entry.
    pub fn is_default(&self) -> bool {
        self.kind == "default"
    }

    /// Entry revoking all access for the same object.
    pub fn revoked(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            id: self.id,
            permissions: Permission::NoAccess.mask(),
            name: None,
            display_name: None,
            owner: None,
        }
    }
}

/// Scan permission levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    NoAccess,
    CanView,
    CanExecute,
    CanEdit,
    Owner,
}

impl Permission {
    /// Level for a raw bitmask, if it is one of the known levels.
    pub fn from_mask(mask: u32) -> Option<Self> {
        match mask {
            0 => Some(Permission::NoAccess),
            16 => Some(Permission::CanView),
            32 => Some(Permission::CanExecute),
            64 => Some(Permission::CanEdit),
            128 => Some(Permission::Owner),
            _ => None,
        }
    }

    /// Raw bitmask.
    pub fn mask(self) -> u32 {
        match self {
            Permission::NoAccess => 0,
            Permission::CanView => 16,
            Permission::CanExecute => 32,
            Permission::CanEdit => 64,
            Permission::Owner => 128,
        }
    }

    /// UI label.
    pub fn label(self) -> &'static str {
        match self {
            Permission::NoAccess => "NO ACCESS",
            Permission::CanView => "CAN VIEW",
            Permission::CanExecute => "CAN EXECUTE",
            Permission::CanEdit => "CAN EDIT",
            Permission::Owner => "OWNER",
        }
    }
}

/// New ACL list applied to a scan, loaded verbatim from a JSON file
pub type ScanAcl = serde_json::Value;
