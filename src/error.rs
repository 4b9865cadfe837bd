use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitLsError {
    #[error("{} is not inside a git working tree", path.display())]
    NotInTrackedArea { path: PathBuf },

    #[error("cannot list {}: {source}", path.display())]
    InvalidPath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed {feed} line {line:?}: {reason}")]
    MalformedFeed {
        feed: &'static str,
        line: String,
        reason: &'static str,
    },

    #[error("{feed} unavailable: {reason}")]
    OptionalFeedUnavailable { feed: &'static str, reason: String },

    #[error("failed to launch `git {command}`: {source}")]
    GitIo {
        command: String,
        source: std::io::Error,
    },

    #[error("`git {command}` failed with status {status}{}", stderr_suffix(stderr))]
    GitFailure {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl GitLsError {
    pub(crate) fn malformed(feed: &'static str, line: &str, reason: &'static str) -> Self {
        Self::MalformedFeed {
            feed,
            line: line.to_string(),
            reason,
        }
    }
}
