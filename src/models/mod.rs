//! Display models for CLI output
//!
//! Conversions from API response types into table rows, CSV records and
//! pretty blocks.

pub mod display;

pub use display::{
    AclDisplay, NetworkDisplay, NetworkRecord, NeverConnectedRow, NeverUpdatedRow, network_url,
};
