use std::str::FromStr;

use crate::error::GitLsError;
use crate::types::{ObjectType, TreeEntry};

use super::quote::normalize_path;

const FEED: &str = "ls-tree";

impl FromStr for ObjectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Self::Blob),
            "tree" => Ok(Self::Tree),
            "commit" | "gitlink" => Ok(Self::Gitlink),
            _ => Err(()),
        }
    }
}

impl FromStr for TreeEntry {
    type Err = GitLsError;

    /// Parse one `<mode> <type> <object-id>\t<path>` row.
    fn from_str(row: &str) -> Result<Self, Self::Err> {
        let Some((header, path)) = row.split_once('\t') else {
            return Err(GitLsError::malformed(FEED, row, "missing tab before path"));
        };
        let mut fields = header.split(' ');
        let (Some(mode), Some(object_type), Some(object_id)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(GitLsError::malformed(FEED, row, "fewer than three header fields"));
        };
        let mode = u32::from_str_radix(mode, 8)
            .map_err(|_| GitLsError::malformed(FEED, row, "mode is not octal"))?;
        let object_type = object_type
            .parse::<ObjectType>()
            .map_err(|()| GitLsError::malformed(FEED, row, "unknown object type"))?;
        if path.is_empty() {
            return Err(GitLsError::malformed(FEED, row, "missing path"));
        }
        Ok(Self {
            mode,
            object_type,
            object_id: object_id.to_string(),
            path: normalize_path(path),
        })
    }
}

/// Parse the whole tree feed, skipping rows that do not parse.
#[must_use]
pub fn parse_tree_feed(text: &str) -> Vec<TreeEntry> {
    text.lines()
        .filter(|row| !row.is_empty())
        .filter_map(|row| match row.parse::<TreeEntry>() {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping {err}");
                None
            }
        })
        .collect()
}
