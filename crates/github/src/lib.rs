//! GitHub milestone and issue queries for shipnotes.
//!
//! This crate resolves a milestone by title and collects the issues and pull
//! requests attached to it, the raw material of a changelog.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`find_milestone_by_title`]: Scan milestone pages for an exact title
//! - [`collect_issues_by_milestone`]: Gather a milestone's issues, optionally
//!   only those closed after a given timestamp
//! - [`PaginatingApi`] and [`PageStream`]: The paginated listing seam both
//!   operations consume
//! - [`GitHubClient`]: The octocrab-backed implementation of that seam
//! - [`Error`]: Error types for the above
//!
//! Both operations are stateless: pages are requested one after the other,
//! in server order, and nothing is cached between calls.
//!
//! # Authentication
//!
//! The client supports both authenticated and unauthenticated access:
//!
//! - **Authenticated**: 5,000 requests/hour, access to private repos
//! - **Unauthenticated**: 60 requests/hour, public repos only
//!
//! Tokens are handled using [`secrecy::SecretString`] to prevent accidental
//! logging of credentials.
//!
//! # Examples
//!
//! Listing what went into a release:
//!
//! ```no_run
//! use shipnotes_github::{
//!     GitHubClient, IssueState, collect_issues_by_milestone, find_milestone_by_title,
//! };
//!
//! # async fn example() -> shipnotes_github::Result<()> {
//! let client = GitHubClient::new(None).await?;
//!
//! if let Some(milestone) = find_milestone_by_title(&client, "owner", "repo", "v2.0").await? {
//!     let items = collect_issues_by_milestone(
//!         &client,
//!         "owner",
//!         "repo",
//!         milestone.number,
//!         Some(IssueState::Closed),
//!         None,
//!     )
//!     .await?;
//!     println!("{} items in {}", items.len(), milestone.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod issue;
pub mod milestone;
pub mod pages;

#[cfg(test)]
mod testing;

pub use client::{DEFAULT_PER_PAGE, GitHubClient, OctocrabPages};
pub use error::{Error, Result};
pub use issue::{
    Issue, IssueQuery, IssueState, collect_issues_by_milestone, parse_timestamp,
    retain_closed_after,
};
pub use milestone::{ItemState, Milestone, find_milestone_by_title};
pub use pages::{PageStream, PaginatingApi};
