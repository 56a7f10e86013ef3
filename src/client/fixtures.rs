//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{
    Agent, AgentGroup, Asset, FindingAsset, HostFinding, Network, PermissionEntry, Scan, Tag,
    UserSummary,
};

/// Default display name of a test asset.
fn host_name(id: &str) -> String {
    format!("host-{}", id)
}

// ============================================================================
// AssetBuilder
// ============================================================================

/// Builder for test [`Asset`] instances.
///
/// # Example
/// ```ignore
/// let asset = AssetBuilder::new("a-1").name("web01").build();
/// ```
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    id: String,
    name: String,
}

impl AssetBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: host_name(&id),
            id,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Asset {
        Asset::new(self.id, self.name)
    }
}

// ============================================================================
// HostFindingBuilder
// ============================================================================

/// Builder for test [`HostFinding`] instances, keyed by the affected asset.
#[derive(Debug, Clone)]
pub struct HostFindingBuilder {
    asset_id: String,
    asset_name: String,
    output: Option<String>,
}

impl HostFindingBuilder {
    pub fn new(asset_id: impl Into<String>) -> Self {
        let asset_id = asset_id.into();
        Self {
            asset_name: host_name(&asset_id),
            asset_id,
            output: None,
        }
    }

    pub fn asset_name(mut self, name: impl Into<String>) -> Self {
        self.asset_name = name.into();
        self
    }

    /// Set the plugin output.
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn build(self) -> HostFinding {
        HostFinding {
            id: None,
            output: self.output,
            severity: None,
            asset: FindingAsset {
                id: self.asset_id,
                name: self.asset_name,
            },
        }
    }
}

// ============================================================================
// AgentBuilder
// ============================================================================

/// Builder for test [`Agent`] instances.
///
/// Defaults to an agent that connected and received plugin updates.
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    id: u64,
    name: String,
    last_connect: Option<i64>,
    plugin_feed_id: Option<String>,
}

impl AgentBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: format!("agent-{}", id),
            last_connect: Some(1_660_000_000),
            plugin_feed_id: Some("202210111852".to_string()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Agent that never connected.
    pub fn never_connected(mut self) -> Self {
        self.last_connect = None;
        self
    }

    /// Agent that never received plugins.
    pub fn never_updated(mut self) -> Self {
        self.plugin_feed_id = Some("-1".to_string());
        self
    }

    pub fn build(self) -> Agent {
        Agent {
            id: self.id,
            uuid: Some(format!("uuid-agent-{}", self.id)),
            name: self.name,
            last_connect: self.last_connect,
            linked_on: Some(1_650_000_000),
            plugin_feed_id: self.plugin_feed_id,
            extra: serde_json::Map::new(),
        }
    }
}

// ============================================================================
// Simple fixtures
// ============================================================================

pub fn test_agent_group(id: u64, name: &str) -> AgentGroup {
    AgentGroup {
        id,
        uuid: Some(format!("uuid-group-{}", id)),
        name: name.to_string(),
        agents_count: None,
    }
}

pub fn test_tag(uuid: &str, category: &str, value: &str) -> Tag {
    Tag {
        uuid: uuid.to_string(),
        category_name: category.to_string(),
        value: value.to_string(),
        description: None,
    }
}

pub fn test_network(uuid: &str, name: &str) -> Network {
    serde_json::from_value(serde_json::json!({
        "uuid": uuid,
        "name": name,
        "assets_ttl_days": 90,
        "created": 1_650_000_000_000i64,
        "is_default": false,
        "scanner_count": 1
    }))
    .unwrap()
}

pub fn test_scan(id: u64, name: &str, folder_id: u64) -> Scan {
    Scan {
        id,
        name: name.to_string(),
        folder_id: Some(folder_id),
        owner: Some("admin@example.com".to_string()),
    }
}

pub fn test_user(id: u64, name: &str) -> UserSummary {
    UserSummary {
        id,
        name: Some(name.to_string()),
        username: Some(format!("{}@example.com", name)),
    }
}

/// ACL entry of `kind` (`default`, `user` or `group`) with the given mask.
pub fn test_permission(kind: &str, id: Option<u64>, permissions: u32) -> PermissionEntry {
    PermissionEntry {
        kind: kind.to_string(),
        id,
        permissions,
        name: None,
        display_name: None,
        owner: None,
    }
}
