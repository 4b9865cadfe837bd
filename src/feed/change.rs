use std::str::FromStr;

use crate::error::GitLsError;
use crate::types::ChangeRecord;

use super::quote::normalize_path;

const FEED: &str = "status";
const RENAME_SEPARATOR: &str = " -> ";
const STATE_CODES: &[char] = &[' ', 'M', 'T', 'A', 'D', 'R', 'C', 'U', '?', '!'];

impl FromStr for ChangeRecord {
    type Err = GitLsError;

    /// Parse one `XY path[ -> path2]` line of `git status --porcelain`.
    ///
    /// The rename split is on the first ` -> `, so a source name that itself contains
    /// that text is cut in the wrong place. Git does not quote for it, so there is no
    /// reliable way to tell.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut chars = line.chars();
        let (Some(index_state), Some(worktree_state), Some(sep)) =
            (chars.next(), chars.next(), chars.next())
        else {
            return Err(GitLsError::malformed(FEED, line, "shorter than status header"));
        };
        if sep != ' ' {
            return Err(GitLsError::malformed(FEED, line, "missing space after status"));
        }
        if !STATE_CODES.contains(&index_state) || !STATE_CODES.contains(&worktree_state) {
            return Err(GitLsError::malformed(FEED, line, "unknown status code"));
        }
        let rest = chars.as_str();
        if rest.is_empty() {
            return Err(GitLsError::malformed(FEED, line, "missing path"));
        }

        let (path, rename_from) = match rest.split_once(RENAME_SEPARATOR) {
            Some((from, to)) => (normalize_path(to), Some(normalize_path(from))),
            None => (normalize_path(rest), None),
        };
        Ok(Self {
            index_state,
            worktree_state,
            path,
            rename_from,
        })
    }
}

/// Parse the whole change feed, skipping lines that do not parse.
#[must_use]
pub fn parse_change_feed(text: &str) -> Vec<ChangeRecord> {
    text.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| match line.parse::<ChangeRecord>() {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("skipping {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(x: char, y: char, path: &str, from: Option<&str>) -> ChangeRecord {
        ChangeRecord {
            index_state: x,
            worktree_state: y,
            path: path.to_string(),
            rename_from: from.map(str::to_string),
        }
    }

    #[test]
    fn parses_index_and_worktree_columns() {
        assert_eq!(
            "M  src/lib.rs".parse::<ChangeRecord>().unwrap(),
            record('M', ' ', "src/lib.rs", None)
        );
        assert_eq!(
            " M README.md".parse::<ChangeRecord>().unwrap(),
            record(' ', 'M', "README.md", None)
        );
        assert_eq!(
            "AM new.rs".parse::<ChangeRecord>().unwrap(),
            record('A', 'M', "new.rs", None)
        );
    }

    #[test]
    fn untracked_directory_loses_trailing_slash() {
        let parsed = "?? target/".parse::<ChangeRecord>().unwrap();
        assert!(parsed.is_untracked());
        assert_eq!(parsed.path, "target");
    }

    #[test]
    fn rename_keeps_destination_as_path() {
        assert_eq!(
            "R  old/name.txt -> old/renamed.txt"
                .parse::<ChangeRecord>()
                .unwrap(),
            record('R', ' ', "old/renamed.txt", Some("old/name.txt"))
        );
    }

    #[test]
    fn rename_splits_on_first_separator() {
        // ".bash -> rc" renamed to ".bashrc" cannot be told apart from this split.
        let parsed = "R  .bash -> rc -> .bashrc".parse::<ChangeRecord>().unwrap();
        assert_eq!(parsed.rename_from.as_deref(), Some(".bash"));
        assert_eq!(parsed.path, "rc -> .bashrc");
    }

    #[test]
    fn quoted_rename_sides_are_unquoted() {
        let parsed = r#"R  "a b.txt" -> "c\td.txt""#
            .parse::<ChangeRecord>()
            .unwrap();
        assert_eq!(parsed.rename_from.as_deref(), Some("a b.txt"));
        assert_eq!(parsed.path, "c\td.txt");
    }

    #[test]
    fn short_or_garbled_lines_are_malformed() {
        for line in ["M", "M ", "MM", "MM ", "MMxfile", "ZZ file"] {
            let err = line.parse::<ChangeRecord>().unwrap_err();
            assert!(
                matches!(err, GitLsError::MalformedFeed { feed: "status", .. }),
                "{line:?} gave {err}"
            );
        }
    }

    #[test]
    fn feed_skips_bad_lines_and_keeps_order() {
        let text = "?? b.txt\nbogus\n\n M a.txt\nD  gone.txt\n";
        let records = parse_change_feed(text);
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["b.txt", "a.txt", "gone.txt"]);
    }
}
