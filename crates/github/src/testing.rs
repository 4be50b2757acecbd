//! Test helpers: an in-memory [`PaginatingApi`] serving canned pages.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Map, Value};

use crate::error::Result;
use crate::issue::{Issue, IssueQuery};
use crate::milestone::{ItemState, Milestone};
use crate::pages::{PageStream, PaginatingApi};

/// Builds a milestone with the given id (also used as its number) and title.
pub(crate) fn milestone(id: u64, title: &str) -> Milestone {
    Milestone {
        id,
        number: id,
        title: title.to_string(),
        state: Some(ItemState::Open),
        extra: Map::new(),
    }
}

/// Builds an issue numbered `number`, closed at `closed_at` if given.
pub(crate) fn issue(number: u64, closed_at: Option<&str>) -> Issue {
    let closed_at = closed_at.map_or(Value::Null, |c| Value::String(c.to_string()));
    Issue {
        id: 1000 + number,
        number,
        title: format!("Issue {number}"),
        state: if closed_at.is_null() {
            ItemState::Open
        } else {
            ItemState::Closed
        },
        milestone: None,
        extra: Map::from_iter([("closed_at".to_string(), closed_at)]),
    }
}

/// A fake API whose listings replay fixed pages.
///
/// Every `list_*` call starts from the first page again. Served pages are
/// counted across all streams so tests can assert on laziness.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    milestone_pages: Vec<Vec<Milestone>>,
    issue_pages: Vec<Vec<Issue>>,
    served: AtomicUsize,
    issue_queries: Mutex<Vec<IssueQuery>>,
}

impl FakeApi {
    pub(crate) fn with_milestone_pages(mut self, pages: Vec<Vec<Milestone>>) -> Self {
        self.milestone_pages = pages;
        self
    }

    pub(crate) fn with_issue_pages(mut self, pages: Vec<Vec<Issue>>) -> Self {
        self.issue_pages = pages;
        self
    }

    pub(crate) fn pages_served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }

    pub(crate) fn issue_queries(&self) -> Vec<IssueQuery> {
        self.issue_queries.lock().unwrap().clone()
    }

    fn stream<T: Clone>(&self, pages: &[Vec<T>]) -> FakePages<'_, T> {
        FakePages {
            pages: pages.to_vec().into_iter(),
            served: &self.served,
        }
    }
}

impl PaginatingApi for FakeApi {
    fn list_milestones(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> impl PageStream<Item = Milestone> + Send {
        self.stream(&self.milestone_pages)
    }

    fn list_issues_for_repo(
        &self,
        _owner: &str,
        _repo: &str,
        query: &IssueQuery,
    ) -> impl PageStream<Item = Issue> + Send {
        self.issue_queries.lock().unwrap().push(query.clone());
        self.stream(&self.issue_pages)
    }
}

pub(crate) struct FakePages<'a, T> {
    pages: std::vec::IntoIter<Vec<T>>,
    served: &'a AtomicUsize,
}

impl<T: Send> PageStream for FakePages<'_, T> {
    type Item = T;

    async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let page = self.pages.next();
        if page.is_some() {
            self.served.fetch_add(1, Ordering::SeqCst);
        }
        Ok(page)
    }
}
