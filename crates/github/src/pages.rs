//! Paginated listing abstraction.
//!
//! The milestone and issue queries never talk to HTTP directly. They consume
//! a [`PaginatingApi`], which hands out lazy [`PageStream`]s. Each stream
//! yields one page per call, in server order, and reports exhaustion with
//! `Ok(None)`.
//!
//! [`GitHubClient`](crate::GitHubClient) is the production implementation.
//! Tests substitute a fake serving canned pages.

use std::future::Future;

use crate::error::Result;
use crate::issue::{Issue, IssueQuery};
use crate::milestone::Milestone;

/// A lazy, finite sequence of result pages.
///
/// Nothing is fetched until the first call to [`next_page`](Self::next_page),
/// and each call performs at most one request. Callers must not request the
/// next page concurrently with the current one: the location of page N+1 is
/// only known once page N has arrived.
pub trait PageStream {
    /// The record type carried by each page.
    type Item;

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the listing is exhausted. An empty page is
    /// returned as `Ok(Some(vec![]))`.
    fn next_page(&mut self) -> impl Future<Output = Result<Option<Vec<Self::Item>>>> + Send;
}

/// The listing endpoints needed to find milestones and collect issues.
///
/// Each call starts a fresh stream from the first page.
pub trait PaginatingApi {
    /// Lists every milestone of a repository, open and closed.
    fn list_milestones(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl PageStream<Item = Milestone> + Send;

    /// Lists the issues and pull requests of a repository matching `query`.
    fn list_issues_for_repo(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueQuery,
    ) -> impl PageStream<Item = Issue> + Send;
}
