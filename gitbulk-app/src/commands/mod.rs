pub mod archive;
pub mod copy_file;
pub mod count_stars;
pub mod dupe;
pub mod invite;
pub mod list_collab;
pub mod list_unlicensed;
pub mod org_members;
pub mod remove_collaborators;
pub mod security_alerts;
pub mod set_private;
pub mod team_members;
pub mod team_repos;
pub mod unwatch;

use crate::args::AuthArgs;
use anyhow::{bail, Result};
use gitbulk_lib::{GitBulkError, GitHubClient};

const API_URL: &str = "https://api.github.com/";

pub fn client(auth: &AuthArgs) -> Result<GitHubClient> {
    if let Some(token) = &auth.token {
        Ok(GitHubClient::new(API_URL, token)?)
    } else if let Some(path) = &auth.oauth {
        Ok(GitHubClient::from_token_file(API_URL, path)?)
    } else {
        bail!("supply --token, GITHUB_TOKEN, or --oauth <file>");
    }
}

/// Per-item error policy for bulk loops: log and keep going, unless the
/// error is one that dooms the rest of the run too.
pub fn log_or_fail(context: &str, error: GitBulkError) -> Result<()> {
    if error.is_fatal() {
        return Err(error.into());
    }
    log::error!("{context}: {error}");
    Ok(())
}
