//! Pagination types for API requests
//!
//! Two pagination conventions exist on the platform:
//! - cursor pagination (v3 explore searches): every response carries an opaque
//!   `pagination.next` token, `null` on the last page;
//! - offset pagination (v1 listings): responses carry `total`, `offset` and
//!   `limit`, and the caller computes the next offset.
//!
//! Both are normalised into [`Page`], whose `next` field is the opaque cursor
//! consumed by the [`PaginatedCollector`](super::collector::PaginatedCollector).

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;

/// One page of search results plus the cursor for the following page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in server order
    pub items: Vec<T>,
    /// Opaque cursor for the next page; `None` when exhausted
    pub next: Option<String>,
    /// Total matching items, when the server reports it
    pub total: Option<usize>,
}

impl<T> Page<T> {
    /// Create a page with an optional next cursor.
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self {
            items,
            next,
            total: None,
        }
    }

    /// Attach the server-reported total.
    pub fn with_total(mut self, total: Option<usize>) -> Self {
        self.total = total;
        self
    }
}

/// Sort order for search requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Request parameters shared by every page of one search.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new()
///     .limit(100)
///     .sort_by("severity", SortOrder::Desc)
///     .fields(["asset.id", "asset.name", "output"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationParams {
    /// Items per page (page-size hint, not enforced client side)
    pub limit: usize,
    /// Sort keys, applied in order
    pub sort: Vec<(String, SortOrder)>,
    /// Restrict the returned attributes (empty means server default)
    pub fields: Vec<String>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size. Zero is clamped to one.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Append a sort key.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((field.into(), order));
        self
    }

    /// Set the returned fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Build the JSON body of a v3 explore search request.
    ///
    /// The first page omits `next`; later pages carry the cursor verbatim.
    pub fn to_search_body(
        &self,
        filter: &serde_json::Value,
        cursor: Option<&str>,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "filter": filter,
            "limit": self.limit,
        });

        if !self.sort.is_empty() {
            let sort: Vec<serde_json::Value> = self
                .sort
                .iter()
                .map(|(field, order)| serde_json::json!({ field.as_str(): order.as_str() }))
                .collect();
            body["sort"] = serde_json::Value::Array(sort);
        }

        if !self.fields.is_empty() {
            body["fields"] = serde_json::json!(self.fields);
        }

        if let Some(next) = cursor {
            body["next"] = serde_json::Value::String(next.to_string());
        }

        body
    }

    /// Query parameters for a v1 offset listing starting at `offset`.
    pub fn to_offset_query(&self, offset: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", offset.to_string()),
        ];

        if let Some((field, order)) = self.sort.first() {
            params.push(("sort", format!("{}:{}", field, order.as_str())));
        }

        params
    }
}

/// Pagination block of a v3 explore search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CursorPagination {
    /// Token for the next page, `null` on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// Total matching items
    #[serde(default)]
    pub total: Option<usize>,
}

/// Pagination block of a v1 offset listing response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffsetPagination {
    #[serde(default)]
    pub total: Option<usize>,

    #[serde(default)]
    pub offset: Option<usize>,

    #[serde(default)]
    pub limit: Option<usize>,
}

impl OffsetPagination {
    /// Offset of the page after one that returned `returned` items.
    ///
    /// Returns `None` once the listing is exhausted: on an empty page, or when
    /// the reported total has been reached. Without a total, a short page
    /// (fewer items than the limit) is taken as the last one.
    pub fn next_offset(&self, requested_offset: usize, returned: usize) -> Option<usize> {
        if returned == 0 {
            return None;
        }

        let offset = self.offset.unwrap_or(requested_offset);
        let next = offset + returned;

        match (self.total, self.limit) {
            (Some(total), _) if next >= total => None,
            (Some(_), _) => Some(next),
            (None, Some(limit)) if returned < limit => None,
            (None, _) => Some(next),
        }
    }
}

/// Encode/decode offsets as opaque cursor strings.
pub struct OffsetCursor;

impl OffsetCursor {
    /// Offset encoded by `cursor`; the first page (no cursor) starts at 0.
    pub fn decode(cursor: Option<&str>) -> crate::error::Result<usize> {
        match cursor {
            None => Ok(0),
            Some(c) => c.parse::<usize>().map_err(|_| {
                crate::error::ApiError::InvalidResponse(format!("Invalid offset cursor: {}", c))
                    .into()
            }),
        }
    }

    /// Cursor string for `offset`.
    pub fn encode(offset: Option<usize>) -> Option<String> {
        offset.map(|o| o.to_string())
    }
}
