//! Agent report rows

use serde::Serialize;

use crate::client::models::Agent;
use crate::output::formatters::format_epoch_date;

/// Row of the never-connected report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeverConnectedRow {
    #[serde(rename = "Agent Name")]
    pub name: String,

    #[serde(rename = "Linked On")]
    pub linked_on: String,
}

impl From<&Agent> for NeverConnectedRow {
    fn from(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            linked_on: format_epoch_date(agent.linked_on),
        }
    }
}

/// Row of the plugins-never-updated report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeverUpdatedRow {
    #[serde(rename = "Agent Name")]
    pub name: String,

    #[serde(rename = "Linked On")]
    pub linked_on: String,

    #[serde(rename = "Last Connect")]
    pub last_connect: String,
}

impl From<&Agent> for NeverUpdatedRow {
    fn from(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            linked_on: format_epoch_date(agent.linked_on),
            last_connect: format_epoch_date(agent.last_connect),
        }
    }
}
