use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitBulkError {
    #[error("credential error: {0}")]
    Auth(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("GitHub rate limit exceeded: 0 / {limit}. Try again after {reset} UTC.")]
    RateLimit { limit: u32, reset: DateTime<Utc> },

    #[error("roster format error: {0}")]
    Format(String),

    #[error("{command} exited with {status}: {stderr}")]
    ExternalProcess {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("GitHub API error: {status} for {url}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GitBulkError {
    /// Errors that must stop a bulk run instead of being logged per item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RateLimit { .. })
    }
}
