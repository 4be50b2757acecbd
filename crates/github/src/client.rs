//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct, the octocrab-backed
//! [`PaginatingApi`] used in production, and its page stream.

use std::marker::PhantomData;

use http::Uri;
use octocrab::{Octocrab, Page};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::issue::{Issue, IssueQuery, IssueState};
use crate::milestone::Milestone;
use crate::pages::{PageStream, PaginatingApi};

/// Page size used when none is configured. GitHub's maximum.
pub const DEFAULT_PER_PAGE: u8 = 100;

/// GitHub API client with optional authentication.
///
/// Authenticated clients have higher rate limits (5,000 req/hour vs 60
/// req/hour) and can read private repositories.
///
/// The client is cheap to share: listings borrow it immutably and the
/// underlying octocrab handle is reference counted.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use shipnotes_github::GitHubClient;
///
/// # async fn example() -> shipnotes_github::Result<()> {
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GitHubClient::new(Some(token)).await?.with_per_page(50);
/// assert!(client.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    inner: Octocrab,
    /// Whether this client is authenticated.
    authenticated: bool,
    /// Items requested per page.
    per_page: u8,
}

impl GitHubClient {
    /// Creates a new client for `api.github.com`.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional GitHub personal access token. If `None`, the
    ///   client is unauthenticated and limited to public repositories.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client fails to initialize.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub async fn new(token: Option<SecretString>) -> Result<Self> {
        Self::build(token, None)
    }

    /// Creates a new client talking to another API root, such as a GitHub
    /// Enterprise Server (`https://github.example.com/api/v3`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_uri` is not a valid URI or the octocrab
    /// client fails to initialize.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub async fn with_base_uri(token: Option<SecretString>, base_uri: &str) -> Result<Self> {
        Self::build(token, Some(base_uri))
    }

    fn build(token: Option<SecretString>, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(base_uri) = base_uri {
            debug!(base_uri, "using custom API root");
            builder = builder.base_uri(base_uri)?;
        }

        let authenticated = token.is_some();
        if let Some(token) = token {
            debug!("creating authenticated GitHub client");
            builder = builder.personal_token(token.expose_secret());
        } else {
            debug!("creating unauthenticated GitHub client");
        }

        Ok(Self {
            inner: builder.build()?,
            authenticated,
            per_page: DEFAULT_PER_PAGE,
        })
    }

    /// Sets the number of items requested per page, clamped to 1..=100.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Returns the number of items requested per page.
    #[must_use]
    pub fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Returns whether this client was created with a token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Query of the milestone listing. Closed milestones are listed too.
#[derive(Debug, Serialize)]
struct MilestoneParams {
    state: IssueState,
    per_page: u8,
}

/// Query of the issue listing: the caller's filters plus the page size.
#[derive(Debug, Serialize)]
struct IssueParams {
    #[serde(flatten)]
    query: IssueQuery,
    per_page: u8,
}

impl PaginatingApi for GitHubClient {
    fn list_milestones(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl PageStream<Item = Milestone> + Send {
        OctocrabPages::new(
            self.inner.clone(),
            format!("/repos/{owner}/{repo}/milestones"),
            MilestoneParams {
                state: IssueState::All,
                per_page: self.per_page,
            },
        )
    }

    fn list_issues_for_repo(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueQuery,
    ) -> impl PageStream<Item = Issue> + Send {
        OctocrabPages::new(
            self.inner.clone(),
            format!("/repos/{owner}/{repo}/issues"),
            IssueParams {
                query: query.clone(),
                per_page: self.per_page,
            },
        )
    }
}

/// A page stream following GitHub's `Link: rel="next"` headers.
///
/// The first call requests `route` with `params` as its query string; later
/// calls request the `next` link of the previous response until there is
/// none.
#[derive(Debug)]
pub struct OctocrabPages<T, P> {
    crab: Octocrab,
    first: Option<(String, P)>,
    next: Option<Uri>,
    fetched: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T, P> OctocrabPages<T, P> {
    fn new(crab: Octocrab, route: String, params: P) -> Self {
        Self {
            crab,
            first: Some((route, params)),
            next: None,
            fetched: 0,
            _item: PhantomData,
        }
    }
}

impl<T, P> PageStream for OctocrabPages<T, P>
where
    T: DeserializeOwned + Send,
    P: Serialize + Send + Sync,
{
    type Item = T;

    async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let page: Option<Page<T>> = match self.first.take() {
            Some((route, params)) => {
                debug!(%route, "fetching first page");
                Some(self.crab.get(&route, Some(&params)).await?)
            }
            None => {
                let next = self.next.take();
                if let Some(uri) = &next {
                    debug!(page = self.fetched + 1, %uri, "fetching next page");
                }
                self.crab.get_page(&next).await?
            }
        };

        let Some(page) = page else {
            return Ok(None);
        };

        self.fetched += 1;
        self.next = page.next;
        debug!(count = page.items.len(), has_next = self.next.is_some(), "fetched page");
        Ok(Some(page.items))
    }
}
