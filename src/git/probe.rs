use std::path::{Path, PathBuf};

use crate::error::GitLsError;

use super::GitRunner;
use super::runner::git_stdout;

/// Confirm `dir` lies inside a git working tree.
pub(crate) fn inside_work_tree(dir: &Path, git: &dyn GitRunner) -> Result<(), GitLsError> {
    let args = ["rev-parse", "--is-inside-work-tree"];
    let out = git
        .run_git(dir, &args)
        .map_err(|source| GitLsError::GitIo {
            command: args.join(" "),
            source,
        })?;
    if out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true" {
        Ok(())
    } else {
        Err(GitLsError::NotInTrackedArea {
            path: dir.to_path_buf(),
        })
    }
}

/// Path of `dir` relative to the top of the working tree, without a trailing slash.
pub(crate) fn show_prefix(dir: &Path, git: &dyn GitRunner) -> Result<String, GitLsError> {
    let out = git_stdout(git, dir, &["rev-parse", "--show-prefix"])?;
    Ok(out
        .trim_end_matches(['\n', '\r'])
        .trim_end_matches('/')
        .to_string())
}

pub(crate) fn show_toplevel(dir: &Path, git: &dyn GitRunner) -> Result<PathBuf, GitLsError> {
    let out = git_stdout(git, dir, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(out.trim_end_matches(['\n', '\r'])))
}
