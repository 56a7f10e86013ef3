//! API trait definitions split by responsibility
//!
//! This module organizes the Tenable.io API surface into focused sub-traits:
//! - [`AgentApi`] - Agents and agent groups
//! - [`ExploreApi`] - v3 asset and finding searches (cursor paginated)
//! - [`TagApi`] - Tag lookup, creation and bulk assignment
//! - [`RemediationApi`] - Remediation goals
//! - [`ScanApi`] - Scans, folders, users, groups and scan ACLs
//! - [`NetworkApi`] - Scanner networks
//!
//! The [`TenableApi`](super::TenableApi) super-trait combines all of them.

mod agents;
mod explore;
mod networks;
mod remediation;
mod scans;
mod tags;

pub use agents::AgentApi;
pub use explore::ExploreApi;
pub use networks::NetworkApi;
pub use remediation::RemediationApi;
pub use scans::ScanApi;
pub use tags::TagApi;
