//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use shipnotes_config::Repository;
use shipnotes_github::IssueState;

/// Collect the issues and pull requests of a GitHub milestone as release notes.
#[derive(Debug, Parser)]
#[command(name = "shipnotes", version)]
pub struct Cli {
    /// Exact title of the milestone (case-sensitive).
    #[arg(short, long)]
    pub milestone: String,

    /// Repository as `owner/repo`; defaults to `repository` from the config file.
    #[arg(short, long)]
    pub repo: Option<Repository>,

    /// Only include items in this state. GitHub defaults to `open`.
    #[arg(long, value_enum)]
    pub state: Option<StateArg>,

    /// Only include items closed after this timestamp (RFC 3339 or YYYY-MM-DD).
    #[arg(long, value_name = "TIMESTAMP")]
    pub closed_since: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Returns `true` when a close-time filter is combined with GitHub's
    /// default `open` state, a query that can never match anything.
    #[must_use]
    pub fn closed_since_without_state(&self) -> bool {
        self.state.is_none()
            && self
                .closed_since
                .as_deref()
                .is_some_and(|since| !since.is_empty())
    }
}

/// Issue state accepted by `--state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Open,
    Closed,
    All,
}

impl From<StateArg> for IssueState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Open => Self::Open,
            StateArg::Closed => Self::Closed,
            StateArg::All => Self::All,
        }
    }
}

/// Output format accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// A markdown changelog section.
    Markdown,
    /// The collected records as a JSON array, fields passed through.
    Json,
}
