//! Milestone lookup by title.
//!
//! GitHub does not offer a "milestone by title" endpoint, so the lookup walks
//! the repository's milestone listing page by page and stops at the first
//! exact title match.
//!
//! # Example
//!
//! ```no_run
//! use shipnotes_github::{GitHubClient, find_milestone_by_title};
//!
//! # async fn example() -> shipnotes_github::Result<()> {
//! let client = GitHubClient::new(None).await?;
//!
//! match find_milestone_by_title(&client, "rust-lang", "rust", "1.80.0").await? {
//!     Some(milestone) => println!("#{}: {}", milestone.number, milestone.title),
//!     None => println!("no such milestone"),
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::pages::{PageStream, PaginatingApi};

/// Open/closed state of a milestone, issue, or pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Still open.
    Open,
    /// Closed (for pull requests, this includes merged).
    Closed,
}

/// A milestone as returned by the GitHub API.
///
/// Only the fields this crate reads are typed; everything else the API sends
/// is kept in [`extra`](Self::extra) so the record round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Globally unique milestone id.
    pub id: u64,
    /// Per-repository milestone number, used by the issues `milestone` filter.
    pub number: u64,
    /// Human-readable title, e.g. `"v1.2.0"`.
    pub title: String,
    /// Milestone state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ItemState>,
    /// Remaining upstream fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Finds the first milestone whose title is exactly `title`.
///
/// Milestones of every state (open and closed) are searched. Pages are
/// requested one at a time and scanning stops at the first match, so later
/// pages are never fetched once the milestone is found. Titles are compared
/// byte for byte: no trimming and no case folding.
///
/// Returns `Ok(None)` when the listing is exhausted without a match.
///
/// # Errors
///
/// Any error raised while fetching a page is returned as-is.
#[instrument(skip(client), fields(owner = %owner, repo = %repo))]
pub async fn find_milestone_by_title<C: PaginatingApi>(
    client: &C,
    owner: &str,
    repo: &str,
    title: &str,
) -> Result<Option<Milestone>> {
    let mut pages = client.list_milestones(owner, repo);
    let mut scanned = 0usize;

    while let Some(page) = pages.next_page().await? {
        scanned += page.len();
        if let Some(milestone) = page.into_iter().find(|m| m.title == title) {
            debug!(number = milestone.number, scanned, "milestone found");
            return Ok(Some(milestone));
        }
    }

    debug!(scanned, "milestone not found");
    Ok(None)
}
