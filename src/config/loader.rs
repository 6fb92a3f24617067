//! YAML configuration file reading and parsing.
use std::path::Path;

use super::validation::validate;
use super::{Configuration, RawConfig};
use crate::error::ConfigError;

/// Read, parse, and validate the configuration at `path`.
///
/// Performs a single read and no other side effects.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] if the file cannot be read
/// - [`ConfigError::Encoding`] if it is not UTF-8 text
/// - [`ConfigError::Parse`] if it is not a valid document
/// - [`ConfigError::Invalid`] if a required field is missing or a value is
///   out of range
pub fn load(path: &Path) -> Result<Configuration, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| ConfigError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse and validate configuration text. `path` is used for error messages.
///
/// An empty document is treated as an empty mapping, so it fails validation
/// rather than parsing.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
pub fn parse(content: &str, path: &Path) -> Result<Configuration, ConfigError> {
    let raw: RawConfig = if content.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str::<Option<RawConfig>>(content)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .unwrap_or_default()
    };
    validate(raw)
}
