//! Configuration management for shipnotes.
//!
//! This crate locates and validates the configuration file and resolves the
//! GitHub token used for API calls.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`repository`]: Repository selection with flexible parsing
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: Config file discovery and reading
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration File
//!
//! ```json5
//! {
//!   // Short format "owner/repo", or { owner, repo, token }
//!   repository: "WordPress/gutenberg",
//!   github_token: "ghp_xxx",
//!   // Optional: page size (1-100) and a GitHub Enterprise API root
//!   per_page: 100,
//!   api_url: "https://github.example.com/api/v3",
//! }
//! ```
//!
//! Command-line arguments take precedence over every value in the file.
//!
//! # Examples
//!
//! ```no_run
//! use shipnotes_config::Config;
//!
//! # fn example() -> shipnotes_config::Result<()> {
//! let config = Config::load()?;
//! if let Some(repo) = &config.repository {
//!     println!("Default repository: {repo}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;
pub mod repository;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use repository::Repository;
