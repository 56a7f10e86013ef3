//! Loading of inline-or-`@file` command arguments
//!
//! Filters, conditions, regexes and descriptions can be given inline or as
//! `@path`, in which case the value is read from the file.

use std::path::Path;

use log::debug;

use crate::error::{ConfigError, Result};

fn read_arg_file(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(ConfigError::InvalidInput(format!("{} does not exist", path)).into());
    }
    debug!("Loading argument from file ({})", path);
    Ok(std::fs::read_to_string(path)?)
}

/// JSON value given inline or as `@file`.
pub fn load_json_arg(arg: &str) -> Result<serde_json::Value> {
    let text = match arg.strip_prefix('@') {
        Some(path) => read_arg_file(path)?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text)
        .map_err(|e| ConfigError::InvalidInput(format!("Unable to load JSON: {}", e)).into())
}

/// Regex given inline or as `@file`; only the first line of the file is used.
pub fn load_regex_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let text = read_arg_file(path)?;
            let line = text.lines().next().unwrap_or("").trim();
            if line.is_empty() {
                return Err(ConfigError::InvalidInput(format!("{} is empty", path)).into());
            }
            Ok(line.to_string())
        }
        None => Ok(arg.to_string()),
    }
}

/// Free text given inline or as `@file` (whole file).
pub fn load_text_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => read_arg_file(path),
        None => Ok(arg.to_string()),
    }
}
