use std::env;
use std::path::{Path, PathBuf};

use crate::error::GitLsError;
use crate::git::{GitRunner, inside_work_tree, show_prefix, status_feed, submodule_table, tree_feed};
use crate::reconcile::{ReconcileInput, reconcile};
use crate::system::FsOps;
use crate::types::{Listing, Options};

/// List `opts.path` and reconcile it against git's view of the working tree.
///
/// # Errors
/// `InvalidPath` when the directory cannot be listed, `NotInTrackedArea` when it is not
/// inside a working tree, and `GitIo`/`GitFailure` when a required git query fails. The
/// committed tree and the submodule table are optional and fall back to empty.
pub fn collect_listing(
    opts: &Options,
    fs: &dyn FsOps,
    git: &dyn GitRunner,
) -> Result<Listing, GitLsError> {
    let dir = absolute(&fs.expand_tilde(&opts.path));
    let live = fs
        .list_dir(&dir)
        .map_err(|source| GitLsError::InvalidPath {
            path: dir.clone(),
            source,
        })?;
    tracing::debug!(dir = %dir.display(), entries = live.len(), "listed directory");

    inside_work_tree(&dir, git)?;
    let prefix = show_prefix(&dir, git)?;

    let (changes, (tree, submodules)) = rayon::join(
        || status_feed(&dir, git),
        || {
            rayon::join(
                || tree_feed(&dir, &opts.treeish, git),
                || submodule_table(&dir, git, fs),
            )
        },
    );
    let changes = changes?;
    let tree = tree.unwrap_or_else(|err| {
        tracing::debug!("{err}");
        Vec::new()
    });
    let submodules = submodules.unwrap_or_else(|err| {
        tracing::debug!("{err}");
        Default::default()
    });
    tracing::debug!(
        prefix = %prefix,
        changes = changes.len(),
        tree = tree.len(),
        submodules = submodules.len(),
        "fetched feeds"
    );

    let decisions = reconcile(&ReconcileInput {
        prefix: &prefix,
        live: &live,
        tree: &tree,
        changes: &changes,
        submodules: &submodules,
    });
    Ok(Listing { prefix, decisions })
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testing::{MemFs, ScriptedGit};
    use crate::types::LiveEntry;
    use pretty_assertions::assert_eq;

    fn file(name: &str) -> LiveEntry {
        LiveEntry {
            name: name.to_string(),
            is_dir: false,
            mode: Some(0o100_644),
        }
    }

    fn opts(path: &str) -> Options {
        Options {
            path: PathBuf::from(path),
            ..Options::default()
        }
    }

    fn repo_git() -> ScriptedGit {
        ScriptedGit::new()
            .ok("rev-parse --is-inside-work-tree", "true\n")
            .ok("rev-parse --show-prefix", "docs/\n")
            .ok("rev-parse --show-toplevel", "/repo\n")
            .ok("status --porcelain", " M docs/guide.md\n?? docs/draft.md\n M src/lib.rs\n")
            .ok(
                "ls-tree --full-name HEAD ./",
                "100644 blob aaa\tdocs/guide.md\n100644 blob bbb\tdocs/index.md\n",
            )
    }

    #[test]
    fn collects_decisions_for_a_subdirectory() {
        let fs = MemFs::new().dir(
            "/repo/docs",
            vec![file("draft.md"), file("guide.md"), file("index.md"), file("notes.tmp")],
        );
        let listing = collect_listing(&opts("/repo/docs"), &fs, &repo_git()).unwrap();
        assert_eq!(listing.prefix, "docs");
        let rows: Vec<_> = listing
            .decisions
            .iter()
            .map(|d| (d.display_name.as_str(), d.index_state, d.worktree_state))
            .collect();
        assert_eq!(
            rows,
            vec![("guide.md", ' ', 'M'), ("index.md", ' ', ' '), ("draft.md", '?', '?')]
        );
    }

    #[test]
    fn tilde_is_expanded_before_listing() {
        let fs = MemFs::new().dir("/home/tester/docs", vec![file("index.md")]);
        let listing = collect_listing(&opts("~/docs"), &fs, &repo_git());
        assert!(listing.is_ok());
    }

    #[test]
    fn missing_directory_is_invalid_path() {
        let err = collect_listing(&opts("/nowhere"), &MemFs::new(), &repo_git()).unwrap_err();
        assert!(matches!(err, GitLsError::InvalidPath { .. }));
    }

    #[test]
    fn outside_a_work_tree_is_reported() {
        let fs = MemFs::new().dir("/tmp/plain", vec![file("a")]);
        let err = collect_listing(&opts("/tmp/plain"), &fs, &ScriptedGit::new()).unwrap_err();
        assert!(matches!(err, GitLsError::NotInTrackedArea { .. }));
    }

    #[test]
    fn missing_optional_feeds_degrade_to_untracked_listing() {
        let git = ScriptedGit::new()
            .ok("rev-parse --is-inside-work-tree", "true\n")
            .ok("rev-parse --show-prefix", "\n")
            .ok("status --porcelain", "A  staged.rs\n");
        let fs = MemFs::new().dir("/fresh", vec![file("staged.rs"), file("loose.rs")]);
        let listing = collect_listing(&opts("/fresh"), &fs, &git).unwrap();
        let rows: Vec<_> = listing
            .decisions
            .iter()
            .map(|d| (d.display_name.as_str(), d.index_state, d.worktree_state))
            .collect();
        assert_eq!(rows, vec![("staged.rs", 'A', ' '), ("loose.rs", '?', '?')]);
    }
}
