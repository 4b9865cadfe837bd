use crate::types::SubmoduleMap;

use super::quote::normalize_path;

#[derive(Default)]
struct Section {
    is_submodule: bool,
    path: Option<String>,
    url: Option<String>,
}

impl Section {
    fn flush_into(self, map: &mut SubmoduleMap) {
        if let (true, Some(path), Some(url)) = (self.is_submodule, self.path, self.url) {
            map.insert(path, url);
        }
    }
}

/// Build the path to URL table from a `.gitmodules` file.
///
/// Parsing is best effort: lines that are not a section header or a `key = value`
/// pair are ignored, and sections without both `path` and `url` are dropped.
#[must_use]
pub fn parse_submodule_table(source: Option<&str>) -> SubmoduleMap {
    let mut map = SubmoduleMap::new();
    let Some(text) = source else {
        return map;
    };

    let mut section = Section::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[') {
            std::mem::take(&mut section).flush_into(&mut map);
            let name = header.trim_end_matches(']').trim_start();
            section.is_submodule = name == "submodule" || name.starts_with("submodule ");
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "path" => section.path = Some(normalize_path(value)),
            "url" => section.url = Some(value.to_string()),
            _ => {}
        }
    }
    section.flush_into(&mut map);
    map
}
