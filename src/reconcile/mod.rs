//! Merge the change feed, the committed tree and the live directory listing into one
//! [`Decision`] per visible entry.
//!
//! Directories are decided first: each one absorbs every change record at or beneath
//! it, and the source side of any rename it absorbs is consumed so the file pass
//! does not list it again. Files are then decided in path order, with the two sides of
//! a rename collapsed into a single decision keyed by the destination.

mod aggregate;
mod mode;
mod order;
mod paths;

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{
    BLANK, ChangeRecord, Decision, Kind, LiveEntry, ObjectType, SubmoduleMap, TreeEntry,
    UNTRACKED,
};

pub use aggregate::DirAggregate;
pub use mode::{ModeBit, ModeFlags};
pub use order::{compare_decisions, priority, sort_decisions};
pub use paths::{in_subtree, join_repo_path, relative_to};

/// Parsed inputs for one directory listing.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInput<'a> {
    /// Repository-relative path of the listed directory (`""` at the top level).
    pub prefix: &'a str,
    pub live: &'a [LiveEntry],
    pub tree: &'a [TreeEntry],
    pub changes: &'a [ChangeRecord],
    pub submodules: &'a SubmoduleMap,
}

#[derive(Debug, Default, Clone, Copy)]
struct Candidate<'a> {
    live: Option<&'a LiveEntry>,
    tree: Option<&'a TreeEntry>,
}

impl Candidate<'_> {
    /// A committed directory that is gone from disk is still decided as a directory,
    /// so it summarizes the deletions beneath it.
    fn is_dir(&self) -> bool {
        match self.live {
            Some(live) => live.is_dir,
            None => self.tree.is_some_and(|t| t.object_type == ObjectType::Tree),
        }
    }
}

struct Rename {
    from: String,
    to: String,
    /// Reached through the source path rather than the destination.
    via_source: bool,
}

/// Produce the sorted decisions for one listing.
#[must_use]
pub fn reconcile(input: &ReconcileInput<'_>) -> Vec<Decision> {
    let candidates = collect_candidates(input);
    let mut consumed = BTreeSet::new();
    let mut emitted = BTreeSet::new();
    let mut decisions = Vec::new();
    let mut emit = |decision: Decision| {
        if emitted.insert(decision.path.clone()) {
            decisions.push(decision);
        } else {
            tracing::debug!(path = %decision.path, "path already decided");
        }
    };

    for (path, candidate) in candidates.iter().filter(|(_, c)| c.is_dir()) {
        if let Some(decision) = decide_directory(input, path, *candidate, &mut consumed) {
            emit(decision);
        }
    }
    for (path, candidate) in candidates.iter().filter(|(_, c)| !c.is_dir()) {
        if consumed.contains(path) {
            continue;
        }
        if let Some(decision) = decide_file(input, &candidates, path, *candidate, &mut consumed)
        {
            emit(decision);
        }
    }

    sort_decisions(&mut decisions);
    tracing::debug!(
        candidates = candidates.len(),
        decisions = decisions.len(),
        "reconciled listing"
    );
    decisions
}

fn collect_candidates<'a>(input: &ReconcileInput<'a>) -> BTreeMap<String, Candidate<'a>> {
    let mut candidates: BTreeMap<String, Candidate<'a>> = BTreeMap::new();
    for entry in input.tree {
        candidates.entry(entry.path.clone()).or_default().tree = Some(entry);
    }
    for entry in input.live {
        candidates
            .entry(join_repo_path(input.prefix, &entry.name))
            .or_default()
            .live = Some(entry);
    }
    candidates
}

/// With no committed entries at all the listing lies outside any snapshot, so entries
/// without change records are shown as untracked instead of being treated as ignored.
fn whole_listing_untracked(input: &ReconcileInput<'_>) -> bool {
    input.tree.is_empty()
}

fn decide_directory(
    input: &ReconcileInput<'_>,
    path: &str,
    candidate: Candidate<'_>,
    consumed: &mut BTreeSet<String>,
) -> Option<Decision> {
    let mut aggregate = DirAggregate::default();
    for record in input.changes {
        let source_inside = record
            .rename_from
            .as_deref()
            .is_some_and(|from| in_subtree(path, from));
        if in_subtree(path, &record.path) || source_inside {
            aggregate.absorb(record);
            if let Some(from) = &record.rename_from {
                consumed.insert(from.clone());
            }
        }
    }

    let tracked = candidate.tree.is_some() || input.tree.iter().any(|e| in_subtree(path, &e.path));
    if aggregate.is_empty() && !tracked {
        if !whole_listing_untracked(input) {
            tracing::debug!(path, "dropping ignored directory");
            return None;
        }
        aggregate = DirAggregate::untracked();
    }

    let mode_delta = ModeFlags::compute(
        candidate.tree.map(|e| e.mode),
        candidate.live.and_then(|l| l.mode),
    );
    Some(build_decision(
        input,
        path.to_string(),
        relative_to(path, input.prefix),
        Kind::Directory,
        (aggregate.index_state, aggregate.worktree_state),
        aggregate.has_untracked_descendant,
        mode_delta,
    ))
}

fn decide_file(
    input: &ReconcileInput<'_>,
    candidates: &BTreeMap<String, Candidate<'_>>,
    path: &str,
    candidate: Candidate<'_>,
    consumed: &mut BTreeSet<String>,
) -> Option<Decision> {
    let matches: Vec<&ChangeRecord> = input.changes.iter().filter(|r| r.touches(path)).collect();

    let mut states = (BLANK, BLANK);
    let mut untracked = false;
    let mut rename = None;
    if matches.is_empty() && candidate.tree.is_none() {
        if !whole_listing_untracked(input) {
            return None;
        }
        states = (UNTRACKED, UNTRACKED);
    }

    // Conflicting records for one path (e.g. after `git rm --cached`): the last one wins.
    for record in &matches {
        states = (record.index_state, record.worktree_state);
        if record.is_untracked() {
            untracked = true;
        }
        if let Some(from) = &record.rename_from {
            rename = Some(Rename {
                from: from.clone(),
                to: record.path.clone(),
                via_source: from == path,
            });
        }
    }

    consumed.insert(path.to_string());
    let (key, display_name) = match &rename {
        Some(rename) => {
            consumed.insert(rename.from.clone());
            consumed.insert(rename.to.clone());
            let from = relative_to(&rename.from, input.prefix);
            let to = relative_to(&rename.to, input.prefix);
            let display = if rename.via_source {
                format!("{from} \u{2192} {to}")
            } else {
                format!("{to} \u{2190} {from}")
            };
            (rename.to.clone(), display)
        }
        None => (path.to_string(), relative_to(path, input.prefix)),
    };

    // Prefer what is known about the destination, falling back to the side we reached.
    let primary = candidates.get(&key).copied().unwrap_or_default();
    let tree = primary.tree.or(candidate.tree);
    let live = primary.live.or(candidate.live);
    let kind = if tree.is_some_and(TreeEntry::is_gitlink) {
        Kind::Gitlink
    } else {
        Kind::File
    };
    let mode_delta = ModeFlags::compute(tree.map(|e| e.mode), live.and_then(|l| l.mode));

    Some(build_decision(
        input,
        key,
        display_name,
        kind,
        states,
        untracked,
        mode_delta,
    ))
}

fn build_decision(
    input: &ReconcileInput<'_>,
    path: String,
    display_name: String,
    kind: Kind,
    (index_state, worktree_state): (char, char),
    has_untracked_descendant: bool,
    mode_delta: ModeFlags,
) -> Decision {
    Decision {
        submodule_url: input.submodules.get(&path).cloned(),
        path,
        display_name,
        kind,
        index_state,
        worktree_state,
        has_untracked_descendant,
        sort_priority: priority(index_state, worktree_state),
        mode_delta,
    }
}
