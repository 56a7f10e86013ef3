//! CSV output
//!
//! Rows are any `Serialize` struct; the header row is taken from the field
//! names (use `#[serde(rename = "...")]` for display headers).

use std::io::Write;
use std::path::Path;

pub use csv::QuoteStyle;
use csv::WriterBuilder;
use serde::Serialize;

use crate::error::Result;

/// Write `rows` with a header line to `writer`.
///
/// Nothing is written for an empty slice, not even the header.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T], quote: QuoteStyle) -> Result<()> {
    let mut writer = WriterBuilder::new().quote_style(quote).from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Format `rows` as a CSV document.
pub fn format_csv<T: Serialize>(rows: &[T], quote: QuoteStyle) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows, quote)?;
    String::from_utf8(buf).map_err(|e| crate::error::Error::Other(e.to_string()))
}

/// Write a report file with every field quoted.
pub fn write_report(path: &Path, rows: &[impl Serialize]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, rows, QuoteStyle::Always)
}
