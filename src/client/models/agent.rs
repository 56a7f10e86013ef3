//! Agent and agent group models

use serde::{Deserialize, Serialize};

/// Nessus agent linked to the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Numeric agent ID
    pub id: u64,

    /// Agent UUID
    #[serde(default)]
    pub uuid: Option<String>,

    /// Agent name (usually the host name)
    pub name: String,

    /// Unix timestamp of the last connection; absent if it never connected
    #[serde(default)]
    pub last_connect: Option<i64>,

    /// Unix timestamp of the linking
    #[serde(default)]
    pub linked_on: Option<i64>,

    /// Plugin feed the agent runs, as returned by the API (a numeric string)
    #[serde(default)]
    pub plugin_feed_id: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Agent {
    /// Whether the agent has never connected since it was linked.
    pub fn never_connected(&self) -> bool {
        self.last_connect.unwrap_or(-1) < 0
    }

    /// Whether the agent never received a plugin update.
    ///
    /// A missing or non-numeric feed id counts as "never updated".
    pub fn plugins_never_updated(&self) -> bool {
        self.plugin_feed_id
            .as_deref()
            .and_then(|id| id.trim().parse::<i64>().ok())
            .unwrap_or(-1)
            < 0
    }
}

/// Agent group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentGroup {
    /// Numeric group ID
    pub id: u64,

    /// Group UUID
    #[serde(default)]
    pub uuid: Option<String>,

    /// Group name
    pub name: String,

    /// Number of agents in the group
    #[serde(default)]
    pub agents_count: Option<u64>,
}

/// Filter for the agent listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentFilter {
    /// Restrict to the agents of this group
    pub group_id: Option<u64>,
}

impl AgentFilter {
    /// Agents belonging to `group_id`.
    pub fn in_group(group_id: u64) -> Self {
        Self {
            group_id: Some(group_id),
        }
    }

    /// Query parameters in the v1 `f=field:op:value` syntax.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(gid) = self.group_id {
            query.push(("f", format!("groups:eq:{}", gid)));
            query.push(("ft", "and".to_string()));
        }
        query
    }
}
