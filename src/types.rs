use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::reconcile::ModeFlags;

/// Status code for an empty column.
pub const BLANK: char = ' ';
/// Status code used in both columns of an untracked path.
pub const UNTRACKED: char = '?';
/// Synthetic code for a directory whose contents disagree on a column.
pub const AGGREGATE: char = '*';

/// Mount path (relative to the repository root) to remote URL.
pub type SubmoduleMap = BTreeMap<String, String>;

/// One line of the porcelain change feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub index_state: char,
    pub worktree_state: char,
    /// Destination path when `rename_from` is set.
    pub path: String,
    pub rename_from: Option<String>,
}

impl ChangeRecord {
    #[must_use]
    pub fn is_untracked(&self) -> bool {
        self.index_state == UNTRACKED && self.worktree_state == UNTRACKED
    }

    /// Whether `path` is either side of this record.
    #[must_use]
    pub fn touches(&self, path: &str) -> bool {
        self.path == path || self.rename_from.as_deref() == Some(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Blob,
    Tree,
    Gitlink,
}

/// One row of `git ls-tree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: u32,
    pub object_type: ObjectType,
    pub object_id: String,
    pub path: String,
}

pub const GITLINK_MODE: u32 = 0o160_000;

impl TreeEntry {
    #[must_use]
    pub fn is_gitlink(&self) -> bool {
        self.object_type == ObjectType::Gitlink || self.mode == GITLINK_MODE
    }
}

/// A directory entry as seen on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEntry {
    pub name: String,
    pub is_dir: bool,
    /// `lstat` mode bits, when the platform exposes them.
    pub mode: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Directory,
    Gitlink,
    File,
}

/// The reconciled status of one visible entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Repository-relative path; the rename destination for a rename pair.
    pub path: String,
    pub display_name: String,
    pub kind: Kind,
    pub index_state: char,
    pub worktree_state: char,
    pub has_untracked_descendant: bool,
    pub submodule_url: Option<String>,
    pub sort_priority: i8,
    pub mode_delta: ModeFlags,
}

impl Decision {
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == Kind::Directory
    }

    #[must_use]
    pub fn is_untracked(&self) -> bool {
        self.index_state == UNTRACKED && self.worktree_state == UNTRACKED
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    pub path: PathBuf,
    /// Snapshot the tree feed is listed from.
    pub treeish: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            treeish: "HEAD".to_string(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Listing {
    /// Repository-relative path of the listed directory, without trailing slash.
    pub prefix: String,
    pub decisions: Vec<Decision>,
}
