//! Milestone issue collection.
//!
//! This module collects every issue and pull request attached to a milestone,
//! optionally narrowed to items closed after a given point in time.
//!
//! # Overview
//!
//! - [`IssueState`]: State filter sent upstream (open, closed, or all)
//! - [`IssueQuery`]: The query parameters of one listing request
//! - [`Issue`]: An issue or pull request record, passed through unchanged
//! - [`collect_issues_by_milestone`]: Pages through the listing and filters
//!   by close time
//!
//! # Close-time filtering
//!
//! GitHub's `since` parameter bounds items by *update* time. An item updated
//! after a release but closed before it would still be returned, so the
//! upstream `since` only narrows the download; the authoritative check is
//! done here against `closed_at`.
//!
//! # Example
//!
//! ```no_run
//! use shipnotes_github::{GitHubClient, IssueState, collect_issues_by_milestone};
//!
//! # async fn example() -> shipnotes_github::Result<()> {
//! let client = GitHubClient::new(None).await?;
//!
//! let issues = collect_issues_by_milestone(
//!     &client,
//!     "rust-lang",
//!     "rust",
//!     42,
//!     Some(IssueState::Closed),
//!     Some("2024-01-15T00:00:00Z"),
//! )
//! .await?;
//!
//! for issue in &issues {
//!     println!("#{} {}", issue.number, issue.title);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::milestone::{ItemState, Milestone};
use crate::pages::{PageStream, PaginatingApi};

/// Issue state filter for GitHub API queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Only open issues.
    Open,
    /// Only closed issues.
    Closed,
    /// Both open and closed issues.
    All,
}

impl IssueState {
    /// Returns the value of the `state` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Parameters of a milestone issue listing.
///
/// Serializes to the query string of the request. Optional fields are only
/// sent when set, so an unset `state` leaves GitHub's default (`open`) in
/// effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueQuery {
    /// Milestone number to filter on.
    pub milestone: u64,
    /// State filter; omitted from the request when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    /// Only items updated at or after this ISO 8601 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

impl IssueQuery {
    /// Creates a query for all default-state items of a milestone.
    #[must_use]
    pub fn new(milestone: u64) -> Self {
        Self {
            milestone,
            state: None,
            since: None,
        }
    }
}

/// An issue or pull request as returned by the issues listing.
///
/// The GitHub issues endpoint returns pull requests too; they carry a
/// `pull_request` object. Fields not modelled here, `closed_at` and
/// `pull_request` included, are kept in [`extra`](Self::extra) exactly as
/// sent (absent, `null` or set) and serialized back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Globally unique id.
    pub id: u64,
    /// Per-repository number (`#123`).
    pub number: u64,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Open or closed.
    pub state: ItemState,
    /// The milestone the item belongs to.
    #[serde(default)]
    pub milestone: Option<Milestone>,
    /// Remaining upstream fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Returns `true` if this record is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.extra
            .get("pull_request")
            .is_some_and(|value| !value.is_null())
    }

    /// When the item was closed, as sent by the API.
    ///
    /// `None` when the field is absent, `null` or not a string.
    #[must_use]
    pub fn closed_at(&self) -> Option<&str> {
        self.extra.get("closed_at").and_then(Value::as_str)
    }

    /// Returns `true` if the item was closed strictly after `since`.
    ///
    /// Items with no (or an empty) `closed_at` were never closed and never
    /// qualify.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timestamp`] if `closed_at` is present but malformed.
    pub fn closed_after(&self, since: DateTime<Utc>) -> Result<bool> {
        match self.closed_at() {
            None | Some("") => Ok(false),
            Some(closed_at) => Ok(parse_timestamp(closed_at)? > since),
        }
    }
}

/// Parses an API or user supplied timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T10:00:00Z`, any offset) and bare dates
/// (`2024-01-15`), the latter taken as midnight UTC.
///
/// # Errors
///
/// Returns [`Error::Timestamp`] if the input matches neither form.
///
/// # Examples
///
/// ```
/// use shipnotes_github::parse_timestamp;
///
/// let a = parse_timestamp("2024-01-15").unwrap();
/// let b = parse_timestamp("2024-01-15T00:00:00Z").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("last tuesday").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|source| Error::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Keeps only the items closed strictly after `since`, preserving order.
///
/// # Errors
///
/// Fails on the first item whose `closed_at` cannot be parsed; no partial
/// result is returned.
pub fn retain_closed_after(issues: Vec<Issue>, since: DateTime<Utc>) -> Result<Vec<Issue>> {
    let mut kept = Vec::with_capacity(issues.len());
    for issue in issues {
        if issue.closed_after(since)? {
            kept.push(issue);
        }
    }
    Ok(kept)
}

/// Collects the issues and pull requests of a milestone.
///
/// Every page of the listing is fetched in order and concatenated without
/// re-ordering or de-duplication. `milestone` is not checked for existence;
/// an unknown milestone simply yields no items.
///
/// When `closed_since` is given (and non-empty) it is sent upstream as
/// `since` and the result is then narrowed to items whose `closed_at` is
/// strictly later than it. Items that are still open are dropped. Without
/// `closed_since`, every fetched item is returned.
///
/// # Errors
///
/// - [`Error::Timestamp`] if `closed_since` is malformed (checked before any
///   request is made) or if a fetched `closed_at` is malformed.
/// - Any error raised while fetching a page, as-is.
#[instrument(skip(client), fields(owner = %owner, repo = %repo))]
pub async fn collect_issues_by_milestone<C: PaginatingApi>(
    client: &C,
    owner: &str,
    repo: &str,
    milestone: u64,
    state: Option<IssueState>,
    closed_since: Option<&str>,
) -> Result<Vec<Issue>> {
    let closed_since = closed_since.filter(|since| !since.is_empty());
    let threshold = closed_since.map(parse_timestamp).transpose()?;

    let query = IssueQuery {
        milestone,
        state,
        since: closed_since.map(str::to_string),
    };

    let mut pages = client.list_issues_for_repo(owner, repo, &query);
    let mut issues = Vec::new();
    while let Some(page) = pages.next_page().await? {
        issues.extend(page);
    }
    debug!(count = issues.len(), "fetched milestone items");

    match threshold {
        Some(since) => {
            let kept = retain_closed_after(issues, since)?;
            debug!(count = kept.len(), %since, "kept items closed after threshold");
            Ok(kept)
        }
        None => Ok(issues),
    }
}
