/// True when `candidate` is `dir` itself or lies beneath it.
#[must_use]
pub fn in_subtree(dir: &str, candidate: &str) -> bool {
    candidate
        .strip_prefix(dir)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[must_use]
pub fn join_repo_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Express a repository-relative `path` relative to the directory `prefix`.
#[must_use]
pub fn relative_to(path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    if let Some(rest) = path.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
        return rest.to_string();
    }

    let base: Vec<&str> = prefix.split('/').collect();
    let target: Vec<&str> = path.split('/').collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts = vec![".."; base.len() - common];
    parts.extend_from_slice(&target[common..]);
    parts.join("/")
}
