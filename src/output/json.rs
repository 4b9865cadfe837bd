use crate::reconcile::compare_decisions;
use crate::types::Decision;

/// Pretty-printed JSON array of the decisions in listing order.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json(decisions: &[Decision]) -> serde_json::Result<String> {
    let mut sorted: Vec<&Decision> = decisions.iter().collect();
    sorted.sort_by(|a, b| compare_decisions(a, b));
    serde_json::to_string_pretty(&sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{ModeFlags, priority};
    use crate::types::Kind;

    #[test]
    fn json_carries_status_and_rename_display() {
        let decision = Decision {
            path: "old/renamed.txt".to_string(),
            display_name: "name.txt \u{2192} renamed.txt".to_string(),
            kind: Kind::File,
            index_state: 'R',
            worktree_state: ' ',
            has_untracked_descendant: false,
            submodule_url: None,
            sort_priority: priority('R', ' '),
            mode_delta: ModeFlags::compute(None, None),
        };
        let text = to_json(&[decision]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let row = &value[0];
        assert_eq!(row["path"], "old/renamed.txt");
        assert_eq!(row["display_name"], "name.txt \u{2192} renamed.txt");
        assert_eq!(row["kind"], "file");
        assert_eq!(row["index_state"], "R");
        assert_eq!(row["worktree_state"], " ");
        assert_eq!(row["sort_priority"], 2);
        assert!(row["submodule_url"].is_null());
        assert_eq!(row["mode_delta"]["bits"].as_array().map(Vec::len), Some(9));
    }
}
