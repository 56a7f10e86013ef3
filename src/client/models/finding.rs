//! Host finding model (v3 explore)

use serde::{Deserialize, Serialize};

use super::Asset;

/// Vulnerability finding on a host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostFinding {
    /// Finding ID
    #[serde(default)]
    pub id: Option<String>,

    /// Plugin output
    #[serde(default)]
    pub output: Option<String>,

    /// Severity as returned by the API (label or number)
    #[serde(default)]
    pub severity: Option<serde_json::Value>,

    /// Affected asset
    pub asset: FindingAsset,
}

/// Asset reference embedded in a finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingAsset {
    /// Asset UUID
    pub id: String,

    /// Asset name
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
}

impl From<FindingAsset> for Asset {
    fn from(asset: FindingAsset) -> Self {
        Asset::new(asset.id, asset.name)
    }
}

impl HostFinding {
    /// Plugin output, empty when the field was not returned.
    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }
}
