use crate::types::{AGGREGATE, BLANK, ChangeRecord, UNTRACKED};

/// Status accumulated for a directory from the change records beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirAggregate {
    pub index_state: char,
    pub worktree_state: char,
    pub has_untracked_descendant: bool,
    pub contributors: usize,
}

impl Default for DirAggregate {
    fn default() -> Self {
        Self {
            index_state: BLANK,
            worktree_state: BLANK,
            has_untracked_descendant: false,
            contributors: 0,
        }
    }
}

impl DirAggregate {
    /// The state of a directory outside any committed snapshot.
    #[must_use]
    pub fn untracked() -> Self {
        Self {
            index_state: UNTRACKED,
            worktree_state: UNTRACKED,
            ..Self::default()
        }
    }

    pub fn absorb(&mut self, record: &ChangeRecord) {
        self.contributors += 1;
        if record.is_untracked() {
            self.has_untracked_descendant = true;
            return;
        }
        merge_column(&mut self.index_state, record.index_state);
        merge_column(&mut self.worktree_state, record.worktree_state);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributors == 0
    }
}

fn merge_column(column: &mut char, code: char) {
    if code == BLANK || *column == code {
        return;
    }
    *column = if *column == BLANK { code } else { AGGREGATE };
}
