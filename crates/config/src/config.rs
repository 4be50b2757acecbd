//! Core configuration struct and loading logic.
//!
//! This module provides the [`Config`] struct holding the defaults the
//! command line can override: which repository to query, which token to use,
//! how many items to request per page, and which API root to talk to.

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file};
use crate::repository::Repository;

/// The shipnotes configuration.
///
/// # Examples
///
/// ```
/// use shipnotes_config::{Config, Repository};
///
/// let config = Config {
///     repository: Some(Repository::new("WordPress", "gutenberg")),
///     per_page: Some(50),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.page_size(), Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Default repository, used when none is given on the command line.
    #[serde(default)]
    pub repository: Option<Repository>,

    /// Global GitHub token.
    ///
    /// Used unless the repository carries its own token. If unset, the
    /// `GITHUB_TOKEN` environment variable and then the `gh` CLI are tried.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Items requested per page, between 1 and 100. The client's default
    /// applies when unset.
    ///
    /// Out-of-range values of any size are rejected by
    /// [`validate`](Self::validate), not by the parser.
    #[serde(default)]
    pub per_page: Option<u32>,

    /// API root of a GitHub Enterprise Server, e.g.
    /// `https://github.example.com/api/v3`. Unset means `api.github.com`.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Config {
    /// Loads configuration from the default file locations.
    ///
    /// See [`persistence`](crate::persistence) for the search order. If no
    /// configuration file is found, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shipnotes_config::Config;
    ///
    /// # fn example() -> shipnotes_config::Result<()> {
    /// let config = Config::load_from("release.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPerPage`] if `per_page` is set outside
    /// 1..=100.
    pub fn validate(&self) -> Result<()> {
        match self.per_page {
            Some(value) if !(1..=100).contains(&value) => {
                Err(ConfigError::InvalidPerPage { value })
            }
            _ => Ok(()),
        }
    }

    /// Returns the configured page size, if it is set and valid.
    #[must_use]
    pub fn page_size(&self) -> Option<u8> {
        self.per_page
            .filter(|value| (1..=100).contains(value))
            .and_then(|value| u8::try_from(value).ok())
    }
}
