//! Display model implementations for table, CSV and JSON output

mod acl;
mod agent;
mod network;

pub use acl::AclDisplay;
pub use agent::{NeverConnectedRow, NeverUpdatedRow};
pub use network::{NetworkDisplay, NetworkRecord, network_url};
