//! Tag models

use serde::{Deserialize, Serialize};

/// Tag value (`category:value`) with its server-assigned UUID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag value UUID
    pub uuid: String,

    /// Category name
    pub category_name: String,

    /// Tag value
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    /// `category:value` label.
    pub fn label(&self) -> String {
        format!("{}:{}", self.category_name, self.value)
    }
}

/// Action of a bulk tag assignment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagAssignmentAction {
    Add,
    Remove,
}
