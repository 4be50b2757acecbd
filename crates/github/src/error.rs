//! Error types for milestone and issue queries.
//!
//! This module defines the errors that can surface from the GitHub API while
//! paging through milestones or issues, and from the client-side close-time
//! filter.

/// Errors that can occur while querying milestones and issues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error occurred while calling the GitHub API.
    ///
    /// Carries the octocrab error as raised, so HTTP status, message and
    /// documentation URL of a failed response (including rate-limit
    /// responses) stay available to the caller.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// A timestamp could not be parsed.
    ///
    /// Raised for a malformed `closed_since` argument, or for a `closed_at`
    /// value returned by the API that is neither RFC 3339 nor a bare date.
    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        /// The offending input.
        value: String,
        /// The underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

/// A specialized Result type for milestone and issue queries.
pub type Result<T> = std::result::Result<T, Error>;
