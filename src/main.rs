//! shipnotes - release notes from a GitHub milestone.
//!
//! Resolves a milestone by title, collects its issues and pull requests, and
//! prints them as a changelog section or as JSON.

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use shipnotes_config::{Config, auth::resolve_token};
use shipnotes_github::{GitHubClient, collect_issues_by_milestone, find_milestone_by_title};
use tracing::{debug, warn};

mod cli;
mod render;

use cli::{Cli, Format};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV_VAR: &str = "SHIPNOTES_LOG";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("shipnotes error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let repository = cli
        .repo
        .clone()
        .or_else(|| config.repository.clone())
        .context("no repository given: pass --repo owner/repo or set `repository` in the config file")?;

    let token = resolve_token(&repository, config.github_token.as_deref())
        .await
        .map(SecretString::from);
    let mut client = match &config.api_url {
        Some(api_url) => GitHubClient::with_base_uri(token, api_url).await,
        None => GitHubClient::new(token).await,
    }
    .context("failed to create GitHub client")?;
    if let Some(per_page) = config.page_size() {
        client = client.with_per_page(per_page);
    }
    debug!(
        %repository,
        authenticated = client.is_authenticated(),
        "resolved repository"
    );

    if cli.closed_since_without_state() {
        warn!(
            "--closed-since without --state only queries open items, so nothing can \
             match; pass --state closed or --state all"
        );
    }

    let (owner, repo) = (repository.owner(), repository.repo());
    let milestone = find_milestone_by_title(&client, owner, repo, &cli.milestone)
        .await
        .context("failed to list milestones")?
        .with_context(|| format!("milestone \"{}\" not found in {repository}", cli.milestone))?;

    let items = collect_issues_by_milestone(
        &client,
        owner,
        repo,
        milestone.number,
        cli.state.map(Into::into),
        cli.closed_since.as_deref(),
    )
    .await
    .with_context(|| format!("failed to collect items of milestone \"{}\"", milestone.title))?;

    match cli.format {
        Format::Markdown => print!("{}", render::render_markdown(&milestone, &items)),
        Format::Json => println!("{}", render::render_json(&items)?),
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
