//! Repository selection with flexible parsing.
//!
//! A [`Repository`] names the GitHub repository whose milestones are queried.
//! Configuration files accept two spellings:
//!
//! - Short format: `"owner/repo"`
//! - Full format: `{ "owner": "...", "repo": "...", "token": "..." }`
//!
//! # Examples
//!
//! ```
//! use shipnotes_config::Repository;
//!
//! let repo: Repository = "rust-lang/rust".parse().unwrap();
//! assert_eq!(repo.owner(), "rust-lang");
//! assert_eq!(repo.repo(), "rust");
//!
//! let repo: Repository = serde_json::from_str(r#"{"owner": "org", "repo": "repo"}"#).unwrap();
//! assert_eq!(repo.to_string(), "org/repo");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// A GitHub repository, optionally with its own access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RepositorySpec")]
pub struct Repository {
    owner: String,
    repo: String,
    token: Option<String>,
}

/// The accepted on-disk spellings of a repository.
#[derive(Deserialize)]
#[serde(untagged)]
enum RepositorySpec {
    Short(String),
    Full {
        owner: String,
        repo: String,
        #[serde(default)]
        token: Option<String>,
    },
}

impl TryFrom<RepositorySpec> for Repository {
    type Error = ConfigError;

    fn try_from(spec: RepositorySpec) -> Result<Self> {
        match spec {
            RepositorySpec::Short(s) => s.parse(),
            RepositorySpec::Full { owner, repo, token } => {
                let mut parsed = Self::checked(&owner, &repo, &format!("{owner}/{repo}"))?;
                parsed.token = token;
                Ok(parsed)
            }
        }
    }
}

impl Repository {
    /// Creates a repository without a token.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: None,
        }
    }

    /// Creates a repository with a dedicated token.
    ///
    /// # Examples
    ///
    /// ```
    /// use shipnotes_config::Repository;
    ///
    /// let repo = Repository::with_token("org", "repo", "ghp_xxx");
    /// assert_eq!(repo.token(), Some("ghp_xxx"));
    /// ```
    #[must_use]
    pub fn with_token(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(owner, repo)
        }
    }

    fn checked(owner: &str, repo: &str, input: &str) -> Result<Self> {
        let (owner, repo) = (owner.trim(), repo.trim());
        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidRepository(format!(
                "owner and repo cannot be empty in '{input}'"
            )));
        }
        if owner.contains('/') || repo.contains('/') {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{input}'"
            )));
        }
        Ok(Self::new(owner, repo))
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the repository-specific token, if configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl FromStr for Repository {
    type Err = ConfigError;

    /// Parses the short `"owner/repo"` format. Surrounding whitespace on
    /// either part is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let Some((owner, repo)) = s.split_once('/') else {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        };
        Self::checked(owner, repo, s)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
