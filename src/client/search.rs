//! [`CursorSearch`] adapters over the API traits.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

use super::api::{AgentApi, ExploreApi, NetworkApi};
use super::collector::CursorSearch;
use super::models::{Agent, AgentFilter, Asset, Network, NetworkFilter};
use super::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Explore asset search.
pub struct AssetSearch<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: ExploreApi + ?Sized> AssetSearch<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a, C: ExploreApi + ?Sized> CursorSearch for AssetSearch<'a, C> {
    type Item = Asset;
    type Filter = serde_json::Value;

    async fn search(
        &self,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Asset>> {
        self.client.search_assets(filter, params, cursor).await
    }
}

/// Agent listing.
pub struct AgentSearch<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: AgentApi + ?Sized> AgentSearch<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a, C: AgentApi + ?Sized> CursorSearch for AgentSearch<'a, C> {
    type Item = Agent;
    type Filter = AgentFilter;

    async fn search(
        &self,
        filter: &AgentFilter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Agent>> {
        self.client.list_agents(filter, params, cursor).await
    }
}

/// Network listing.
pub struct NetworkSearch<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: NetworkApi + ?Sized> NetworkSearch<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a, C: NetworkApi + ?Sized> CursorSearch for NetworkSearch<'a, C> {
    type Item = Network;
    type Filter = NetworkFilter;

    async fn search(
        &self,
        filter: &NetworkFilter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Network>> {
        self.client.list_networks(filter, params, cursor).await
    }
}

/// Regex applied to plugin output.
///
/// Compiled multi-line and case-insensitive. With `negative` set, a finding
/// matches when the regex does *not* occur in its output.
#[derive(Debug, Clone)]
pub struct OutputMatcher {
    regex: Regex,
    negative: bool,
}

impl OutputMatcher {
    pub fn new(pattern: &str, negative: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex, negative })
    }

    pub fn matches(&self, output: &str) -> bool {
        self.regex.is_match(output) != self.negative
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Host finding search yielding the assets whose finding output matches.
///
/// Each page of findings is reduced to the assets of the matching findings,
/// in finding order. The cursor is the findings cursor, so a page may come
/// back empty while more pages follow.
pub struct MatchingFindingAssets<'a, C: ?Sized> {
    client: &'a C,
    matcher: OutputMatcher,
}

impl<'a, C: ExploreApi + ?Sized> MatchingFindingAssets<'a, C> {
    pub fn new(client: &'a C, matcher: OutputMatcher) -> Self {
        Self { client, matcher }
    }
}

#[async_trait]
impl<'a, C: ExploreApi + ?Sized> CursorSearch for MatchingFindingAssets<'a, C> {
    type Item = Asset;
    type Filter = serde_json::Value;

    async fn search(
        &self,
        filter: &serde_json::Value,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Asset>> {
        let page = self
            .client
            .search_host_findings(filter, params, cursor)
            .await?;

        let assets = page
            .items
            .into_iter()
            .filter(|f| self.matcher.matches(f.output()))
            .map(|f| Asset::from(f.asset))
            .collect();

        Ok(Page::new(assets, page.next).with_total(page.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{AssetBuilder, HostFindingBuilder};
    use crate::client::mock::MockTenableClient;
    use crate::client::{Discard, PaginatedCollector};

    #[test]
    fn test_output_matcher_is_case_insensitive_and_multiline() {
        let matcher = OutputMatcher::new(r"^\s*installed version\s*:\s*69\.0\.1$", false).unwrap();
        assert!(matcher.matches("Path : /opt\n  Installed Version : 69.0.1\n"));
        assert!(!matcher.matches("installed version : 70.0"));
    }

    #[test]
    fn test_output_matcher_negative() {
        let matcher = OutputMatcher::new("openssl", true).unwrap();
        assert!(!matcher.matches("OpenSSL 1.1"));
        assert!(matcher.matches("libressl"));
    }

    #[test]
    fn test_output_matcher_invalid_pattern() {
        assert!(OutputMatcher::new("(unclosed", false).is_err());
    }

    #[tokio::test]
    async fn test_matching_findings_are_reduced_to_assets() {
        let mock = MockTenableClient::new()
            .with_finding_pages(vec![
                vec![
                    HostFindingBuilder::new("a-1").output("version 1").build(),
                    HostFindingBuilder::new("a-2").output("version 2").build(),
                ],
                vec![HostFindingBuilder::new("a-1").output("version 1 again").build()],
            ])
            .await;
        let search = MatchingFindingAssets::new(&mock, OutputMatcher::new("version 1", false).unwrap());

        let result = PaginatedCollector::default()
            .collect(&search, &serde_json::json!({}), |a| a.id.clone(), &mut Discard)
            .await
            .unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.items, vec![AssetBuilder::new("a-1").build()]);
    }

    #[tokio::test]
    async fn test_asset_search_walks_all_pages() {
        let mock = MockTenableClient::new()
            .with_asset_pages(vec![
                vec![AssetBuilder::new("a-1").build()],
                vec![AssetBuilder::new("a-2").build()],
            ])
            .await;

        let result = PaginatedCollector::default()
            .collect(
                &AssetSearch::new(&mock),
                &serde_json::json!({}),
                |a| a.id.clone(),
                &mut Discard,
            )
            .await
            .unwrap();

        let ids: Vec<&str> = result.items.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a-1", "a-2"]);
    }
}
