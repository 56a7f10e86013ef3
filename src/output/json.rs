//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Generation time, RFC 3339
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Number of items in `data`, for list output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                count: None,
            },
        }
    }
}

/// Format a list as pretty-printed JSON inside the metadata envelope.
pub fn format_json<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    let mut output = JsonOutput::new(items);
    output.meta.count = Some(items.len());
    serde_json::to_string_pretty(&output)
}
