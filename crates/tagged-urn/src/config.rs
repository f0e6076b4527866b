// crates/tagged-urn/src/config.rs
// ============================================================================
// Module: Tagged URN Configuration
// Description: TOML-backed matcher and parser settings.
// Purpose: Let deployments pin the expected prefix and parser limits.
// Dependencies: serde, thiserror, toml, crate::{grammar, matcher, prefix}
// ============================================================================

//! ## Overview
//! Configuration is optional; every field has a default. A file looks like:
//!
//! ```toml
//! [matching]
//! expected_prefix = "cap"
//!
//! [parsing]
//! max_input_bytes = 65536
//! ```
//!
//! Loading fails closed: oversized files, non-UTF-8 content, unknown fields, an
//! invalid prefix, or out-of-range limits are all rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::grammar::MAX_INPUT_BYTES;
use crate::grammar::ParseLimits;
use crate::matcher::UrnMatcher;
use crate::prefix::Prefix;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default config filename.
const DEFAULT_CONFIG_NAME: &str = "tagged-urn.toml";
/// Environment variable override for config path.
pub const CONFIG_ENV_VAR: &str = "TAGGED_URN_CONFIG";
/// Maximum allowed config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum total path length for the config path.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Upper bound accepted for `parsing.max_input_bytes`.
pub const MAX_CONFIGURED_INPUT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrnConfig {
    /// Matcher configuration.
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Parser configuration.
    #[serde(default)]
    pub parsing: ParsingConfig,
}

/// Matcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    /// Prefix every request must carry; any prefix when unset.
    #[serde(default)]
    pub expected_prefix: Option<Prefix>,
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParsingConfig {
    /// Maximum accepted identifier size in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl ParsingConfig {
    /// Returns the parser limits described by this section.
    #[must_use]
    pub const fn limits(&self) -> ParseLimits {
        ParseLimits::new(self.max_input_bytes)
    }
}

/// Serde default for `parsing.max_input_bytes`.
const fn default_max_input_bytes() -> usize {
    MAX_INPUT_BYTES
}

/// Config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("tagged urn config io error: {0}")]
    Io(String),
    /// Parse error.
    #[error("tagged urn config parse error: {0}")]
    Parse(String),
    /// Invalid configuration.
    #[error("tagged urn config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl UrnConfig {
    /// Loads configuration from disk.
    ///
    /// The path is `path` when given, else the `TAGGED_URN_CONFIG` environment
    /// variable, else `tagged-urn.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let file = File::open(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        let mut bytes = Vec::new();
        file.take(MAX_CONFIG_FILE_SIZE as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a limit is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_input_bytes = self.parsing.max_input_bytes;
        if max_input_bytes == 0 || max_input_bytes > MAX_CONFIGURED_INPUT_BYTES {
            return Err(ConfigError::Invalid(format!(
                "parsing.max_input_bytes must be between 1 and {MAX_CONFIGURED_INPUT_BYTES}"
            )));
        }
        Ok(())
    }

    /// Builds the matcher described by the `[matching]` section.
    #[must_use]
    pub fn matcher(&self) -> UrnMatcher<Prefix> {
        UrnMatcher::from_config(&self.matching)
    }

    /// Returns the parser limits described by the `[parsing]` section.
    #[must_use]
    pub const fn limits(&self) -> ParseLimits {
        self.parsing.limits()
    }
}

// ============================================================================
// SECTION: Path Helpers
// ============================================================================

/// Resolves the config path from explicit input or environment.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the config file path length and components.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
