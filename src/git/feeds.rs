use std::path::Path;

use crate::error::GitLsError;
use crate::feed::{parse_change_feed, parse_submodule_table, parse_tree_feed};
use crate::system::FsOps;
use crate::types::{ChangeRecord, SubmoduleMap, TreeEntry};

use super::GitRunner;
use super::probe::show_toplevel;
use super::runner::git_stdout;

pub(crate) fn status_feed(dir: &Path, git: &dyn GitRunner) -> Result<Vec<ChangeRecord>, GitLsError> {
    let text = git_stdout(git, dir, &["status", "--porcelain"])?;
    Ok(parse_change_feed(&text))
}

/// Committed entries directly under `dir`, with repository-relative paths.
pub(crate) fn tree_feed(
    dir: &Path,
    treeish: &str,
    git: &dyn GitRunner,
) -> Result<Vec<TreeEntry>, GitLsError> {
    let text = git_stdout(git, dir, &["ls-tree", "--full-name", treeish, "./"]).map_err(|err| {
        GitLsError::OptionalFeedUnavailable {
            feed: "ls-tree",
            reason: err.to_string(),
        }
    })?;
    Ok(parse_tree_feed(&text))
}

pub(crate) fn submodule_table(
    dir: &Path,
    git: &dyn GitRunner,
    fs: &dyn FsOps,
) -> Result<SubmoduleMap, GitLsError> {
    let unavailable = |reason: String| GitLsError::OptionalFeedUnavailable {
        feed: ".gitmodules",
        reason,
    };
    let toplevel = show_toplevel(dir, git).map_err(|err| unavailable(err.to_string()))?;
    let text = fs
        .read_optional(&toplevel.join(".gitmodules"))
        .map_err(|err| unavailable(err.to_string()))?;
    Ok(parse_submodule_table(text.as_deref()))
}
