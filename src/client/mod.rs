//! Tenable.io API client
//!
//! The API surface is split into focused traits (see [`api`]) combined by the
//! [`TenableApi`] super-trait. Paginated endpoints are walked through the
//! [`PaginatedCollector`] via the adapters in [`search`].

pub mod api;
pub mod collector;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod rate_limit;
pub mod search;
pub mod tenable;

pub use api::{AgentApi, ExploreApi, NetworkApi, RemediationApi, ScanApi, TagApi};
pub use collector::{BatchSink, Collection, Discard, PaginatedCollector};
#[cfg(test)]
pub use mock::MockTenableClient;
pub use pagination::{PaginationParams, SortOrder};
pub use search::{AgentSearch, AssetSearch, MatchingFindingAssets, NetworkSearch, OutputMatcher};
pub use tenable::TioClient;

/// Complete Tenable.io API surface.
///
/// Blanket-implemented for anything implementing every sub-trait, so command
/// handlers can take `&dyn TenableApi` and tests can pass the mock client.
pub trait TenableApi: AgentApi + ExploreApi + TagApi + RemediationApi + ScanApi + NetworkApi {}

impl<T> TenableApi for T where T: AgentApi + ExploreApi + TagApi + RemediationApi + ScanApi + NetworkApi {}
