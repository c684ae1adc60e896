// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher configuration
//!
//! ```toml
//! identifiers = ["app.orders", "app"]
//! default_priority = 1
//! ```

use crate::key::WILDCARD;
use crate::listener::DEFAULT_PRIORITY;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for constructing an [`EventDispatcher`](crate::EventDispatcher)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Identifiers used to look up shared listeners, in query order
    pub identifiers: Vec<String>,
    /// Priority used by `attach` when none is given
    pub default_priority: i32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            identifiers: Vec::new(),
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl DispatcherConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: DispatcherConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for identifier in &self.identifiers {
            if identifier.is_empty() {
                return Err(ConfigError::Invalid("identifier must not be empty".into()));
            }
            if identifier == WILDCARD {
                return Err(ConfigError::Invalid(format!(
                    "'{WILDCARD}' is always consulted and cannot be listed as an identifier"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
