//! Tenable.io API data models
//!
//! Domain types returned by the platform, organised by resource type.
//! Attributes the CLI does not use are kept in flattened `extra` maps so that
//! JSON output round-trips what the server returned.

mod agent;
mod asset;
mod finding;
mod network;
mod remediation;
mod scan;
mod tag;

pub use agent::{Agent, AgentFilter, AgentGroup};
pub use asset::Asset;
#[cfg(test)]
pub use finding::FindingAsset;
pub use finding::HostFinding;
pub use network::{Network, NetworkFilter};
pub use remediation::{GoalDueDate, RemediationGoal, RemediationGoalRequest};
pub use scan::{Folder, Permission, PermissionEntry, Scan, ScanAcl, UserGroup, UserSummary};
pub use tag::{Tag, TagAssignmentAction};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
