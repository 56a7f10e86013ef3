//! Shared CLI argument types

mod common;
mod global;
mod input;

pub use common::OutputFormat;
pub use global::GlobalOptions;
pub use input::{load_json_arg, load_regex_arg, load_text_arg};
