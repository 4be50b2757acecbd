//! GitHub token resolution.
//!
//! Tokens are resolved with the following fallback chain:
//!
//! 1. Repository-specific token (if configured)
//! 2. Global `github_token` from config
//! 3. The `GITHUB_TOKEN` environment variable
//! 4. `gh auth token` command (GitHub CLI)
//! 5. Unauthenticated (returns `None`)

use crate::Repository;
use crate::error::{ConfigError, Result};

/// Environment variable consulted for a token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Resolves the GitHub token to use for `repo`.
///
/// Missing tokens are not an error: `None` means the caller should proceed
/// unauthenticated. A failing `gh` CLI is treated the same way.
///
/// # Examples
///
/// ```no_run
/// use shipnotes_config::{Repository, auth::resolve_token};
///
/// # async fn example() {
/// let repo = Repository::new("WordPress", "gutenberg");
/// let token = resolve_token(&repo, Some("ghp_global")).await;
/// assert_eq!(token.as_deref(), Some("ghp_global"));
/// # }
/// ```
pub async fn resolve_token(repo: &Repository, global_token: Option<&str>) -> Option<String> {
    if let Some(token) = repo.token().or(global_token) {
        return Some(token.to_string());
    }

    if let Some(token) = std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.trim().is_empty())
    {
        return Some(token.trim().to_string());
    }

    get_gh_token().await.ok().flatten()
}

/// Gets a GitHub token from the `gh` CLI.
///
/// # Returns
///
/// - `Ok(Some(token))` if the command succeeds and prints a token
/// - `Ok(None)` if `gh` is not installed or not logged in
///
/// # Errors
///
/// Returns an error if `gh` exists but cannot be run, or exits with a
/// failure other than "not logged in".
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::GhAuthFailed(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(Some(token).filter(|t| !t.is_empty()))
}
