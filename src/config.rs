//! Scenario configuration.
//!
//! Holds the base URL and the canonical values behind `<valid>` sentinels.
//! A [`Config`] is constructed once at process start and passed by reference
//! to the components that need it; there is no process-wide static, so unit
//! tests can build their own instances with overrides.

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;

/// Configuration lookup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key was absent. This aborts the scenario; proceeding
    /// without a base URL or canonical credential is never meaningful.
    #[error("missing configuration key: {0}")]
    MissingKey(String),
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Key/value configuration for a test run.
#[derive(Clone, Debug, Default)]
pub struct Config {
    entries: HashMap<String, String>,
}

impl Config {
    /// Build a configuration from explicit key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }

    /// Load a `.properties`-style file: one `key=value` per line, `#` or
    /// `!` starting a comment line, keys and values trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| {
                line.split_once('=')
                    .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
            })
            .collect();
        Ok(Self { entries })
    }

    /// Look up a required key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] naming the key when it is
    /// absent. Missing required configuration is fatal to the scenario.
    pub fn resolve(&self, key: &str) -> Result<&str, ConfigError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingKey(key.to_owned()))
    }

    /// The base URL endpoints are resolved against.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when `base.url` is not set.
    pub fn base_url(&self) -> Result<&str, ConfigError> { self.resolve("base.url") }

    /// Insert or replace a single entry. Intended for per-test overrides.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}
