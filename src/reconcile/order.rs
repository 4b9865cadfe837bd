use std::cmp::Ordering;

use crate::types::{BLANK, Decision, UNTRACKED};

/// Rank used to order entries within the directory and file groups; higher sorts first.
///
/// Staged and unstaged, then staged only, then unstaged only, then unchanged, then
/// untracked.
#[must_use]
pub fn priority(index_state: char, worktree_state: char) -> i8 {
    if index_state == UNTRACKED && worktree_state == UNTRACKED {
        return -1;
    }
    match (index_state != BLANK, worktree_state != BLANK) {
        (true, true) => 3,
        (true, false) => 2,
        (false, true) => 1,
        (false, false) => 0,
    }
}

/// Directories first, then by descending priority, then by path.
#[must_use]
pub fn compare_decisions(a: &Decision, b: &Decision) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| b.sort_priority.cmp(&a.sort_priority))
        .then_with(|| a.path.cmp(&b.path))
        .then_with(|| a.display_name.cmp(&b.display_name))
}

pub fn sort_decisions(decisions: &mut [Decision]) {
    decisions.sort_by(compare_decisions);
}
