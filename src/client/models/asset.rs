//! Asset model (v3 explore)

use serde::{Deserialize, Serialize};

/// Asset returned by the explore asset search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset UUID
    pub id: String,

    /// Display name, empty when the asset has none
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Asset {
    /// Asset with no extra attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}
