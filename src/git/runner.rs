use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::GitLsError;

pub trait GitRunner: Sync {
    /// Run the `git` command within the given `dir` with `args`.
    ///
    /// # Errors
    /// Returns an error if the `git` process cannot be spawned or fails during execution.
    fn run_git(&self, dir: &Path, args: &[&str]) -> std::io::Result<Output>;
}

pub struct DefaultGitRunner;

impl GitRunner for DefaultGitRunner {
    fn run_git(&self, dir: &Path, args: &[&str]) -> std::io::Result<Output> {
        Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }
}

/// Run `git` and return its stdout, treating a non-zero exit as [`GitLsError::GitFailure`].
pub(crate) fn git_stdout(
    git: &dyn GitRunner,
    dir: &Path,
    args: &[&str],
) -> Result<String, GitLsError> {
    let command = args.join(" ");
    let out = git
        .run_git(dir, args)
        .map_err(|source| GitLsError::GitIo {
            command: command.clone(),
            source,
        })?;
    if !out.status.success() {
        return Err(GitLsError::GitFailure {
            command,
            status: out.status,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}
