//! Sequential cursor pagination with de-duplication and a per-page side effect.
//!
//! [`PaginatedCollector`] walks a cursor-paginated search from the first page
//! until the server stops returning a cursor. Entities are de-duplicated by a
//! caller-supplied key across the whole run (first occurrence wins), and the
//! novel entities of every page are handed to a [`BatchSink`] before the next
//! page is requested. Tag assignment is the typical sink: assets that drift
//! onto a later page are never tagged twice.
//!
//! Pages are fetched strictly one after another. Cursors are usually
//! server-side state, so nothing here is parallelised.

use std::collections::HashSet;
use std::hash::Hash;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::pagination::{Page, PaginationParams};
use crate::config::DEFAULT_MAX_PAGES;
use crate::error::{CollectError, Result};

/// A cursor-paginated search endpoint.
///
/// `search` must behave as a pure function of `(filter, params, cursor)`:
/// everything needed to resume lives in the cursor.
#[async_trait]
pub trait CursorSearch: Send + Sync {
    /// Entity returned by the search
    type Item: Send + Sync;
    /// Opaque filter, forwarded unchanged on every call
    type Filter: Send + Sync + ?Sized;

    /// Fetch the page at `cursor` (`None` for the first page).
    async fn search(
        &self,
        filter: &Self::Filter,
        params: &PaginationParams,
        cursor: Option<&str>,
    ) -> Result<Page<Self::Item>>;
}

/// Side effect applied to the novel entities of each page.
///
/// Never called with an empty batch, and never called twice with the same
/// entity key within one collection run.
#[async_trait]
pub trait BatchSink<T: Sync>: Send {
    async fn on_new_batch(&mut self, batch: &[T]) -> Result<()>;
}

/// Sink for read-only runs that only need the de-duplicated result.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

#[async_trait]
impl<T: Sync> BatchSink<T> for Discard {
    async fn on_new_batch(&mut self, _batch: &[T]) -> Result<()> {
        Ok(())
    }
}

/// How a collection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectStatus {
    /// The server returned no further cursor
    Exhausted,
    /// The cancellation token fired between two pages
    Cancelled,
}

/// Outcome of a collection run.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    /// Distinct entities in first-seen order
    pub items: Vec<T>,
    /// Number of `search` calls issued
    pub pages: usize,
    /// Terminal state of the run
    pub status: CollectStatus,
}

impl<T> Collection<T> {
    /// Whether the run stopped early on request.
    pub fn is_cancelled(&self) -> bool {
        self.status == CollectStatus::Cancelled
    }
}

/// Drives a [`CursorSearch`] to exhaustion, de-duplicating by key.
#[derive(Debug, Clone)]
pub struct PaginatedCollector {
    params: PaginationParams,
    max_pages: usize,
    cancel: Option<CancellationToken>,
}

impl Default for PaginatedCollector {
    fn default() -> Self {
        Self::new(PaginationParams::default())
    }
}

impl PaginatedCollector {
    /// Create a collector issuing every search with `params`.
    pub fn new(params: PaginationParams) -> Self {
        Self {
            params,
            max_pages: DEFAULT_MAX_PAGES,
            cancel: None,
        }
    }

    /// Cap the number of pages walked by one run (minimum 1).
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Stop between pages once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Replace the request parameters, keeping the cap and cancellation.
    pub fn with_params(mut self, params: PaginationParams) -> Self {
        self.params = params;
        self
    }

    /// Parameters forwarded to every search call.
    pub fn params(&self) -> &PaginationParams {
        &self.params
    }

    /// Walk `source` from the first page until its cursor is exhausted.
    ///
    /// For every page, the entities whose key has not been seen earlier in this
    /// run are appended to the result and passed to `sink` as one batch. Pages
    /// without novel entities produce no sink call.
    ///
    /// # Errors
    /// - [`CollectError::SearchFailed`] if a search call fails;
    /// - [`CollectError::SideEffectFailed`] if the sink fails;
    /// - [`CollectError::PaginationExceeded`] if the server still returns a
    ///   cursor after `max_pages` pages.
    ///
    /// In all cases side effects of earlier pages remain applied.
    pub async fn collect<S, K, F, B>(
        &self,
        source: &S,
        filter: &S::Filter,
        key_of: F,
        sink: &mut B,
    ) -> Result<Collection<S::Item>>
    where
        S: CursorSearch + ?Sized,
        K: Eq + Hash,
        F: Fn(&S::Item) -> K,
        B: BatchSink<S::Item> + ?Sized,
    {
        let mut seen: HashSet<K> = HashSet::new();
        let mut items: Vec<S::Item> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                return Ok(Collection {
                    items,
                    pages,
                    status: CollectStatus::Cancelled,
                });
            }

            pages += 1;
            let page = source
                .search(filter, &self.params, cursor.as_deref())
                .await
                .map_err(|e| CollectError::SearchFailed {
                    page: pages,
                    source: Box::new(e),
                })?;

            let novel: Vec<S::Item> = page
                .items
                .into_iter()
                .filter(|item| seen.insert(key_of(item)))
                .collect();

            if !novel.is_empty() {
                sink.on_new_batch(&novel)
                    .await
                    .map_err(|e| CollectError::SideEffectFailed {
                        page: pages,
                        source: Box::new(e),
                    })?;
                items.extend(novel);
            }

            match page.next {
                None => {
                    return Ok(Collection {
                        items,
                        pages,
                        status: CollectStatus::Exhausted,
                    });
                }
                Some(_) if pages >= self.max_pages => {
                    return Err(CollectError::PaginationExceeded {
                        max_pages: self.max_pages,
                    }
                    .into());
                }
                Some(next) => cursor = Some(next),
            }
        }
    }
}
