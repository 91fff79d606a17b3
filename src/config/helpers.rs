use super::*;

/// A value located by a dotted path.
pub(super) struct Found<'a> {
    pub section: String,
    pub key: String,
    pub value: &'a Value,
}

/// Resolve `section.key[.inner...]` against a document.
///
/// Section names and keys may themselves contain dots, so every split of the
/// path is tried from the left. Segments after the key index into string-keyed
/// maps, or into lists and tuples by position.
pub(super) fn lookup<'a>(doc: &'a Document, path: &str) -> Option<Found<'a>> {
    let segs: Vec<&str> = path.split('.').collect();

    for i in 1..segs.len() {
        let section_name = segs[..i].join(".");
        let Some(section) = doc.section(&section_name) else {
            continue;
        };

        for j in (i + 1)..=segs.len() {
            let key = segs[i..j].join(".");
            let Some(value) = section.get(&key) else {
                continue;
            };
            if let Some(value) = descend(value, &segs[j..]) {
                return Some(Found {
                    section: section_name,
                    key,
                    value,
                });
            }
        }
    }

    None
}

fn descend<'a>(mut current: &'a Value, rest: &[&str]) -> Option<&'a Value> {
    for seg in rest {
        current = match current {
            Value::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                Value::String(s) if s == seg => Some(v),
                _ => None,
            })?,
            Value::List(items) | Value::Tuple(items) => items.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Spellings of a path segment to try: as written, `snake_case`, `kebab-case`.
pub(super) fn variants(seg: &str) -> Vec<String> {
    let mut out = vec![seg.to_string()];

    let snake = seg.replace('-', "_");
    if snake != seg {
        out.push(snake);
    }

    let kebab = seg.replace('_', "-");
    if kebab != seg {
        out.push(kebab);
    }

    out
}

/// Find the line (1-based) that assigns `key` inside `{section}`, and its text.
///
/// Returns `(0, "")` when no such line exists. The last assignment wins, matching
/// how the parser resolves duplicates.
pub(super) fn find_config_line(section: &str, key: &str, raw_content: &str) -> (usize, String) {
    let mut current: Option<String> = None;
    let mut found = (0, String::new());

    for (idx, line) in raw_content.lines().enumerate() {
        let compact: String = line
            .split('#')
            .next()
            .unwrap_or("")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if let Some(rest) = compact.strip_prefix('{') {
            if let Some(end) = rest.find('}') {
                let name = &rest[..end];
                if name == section {
                    // Reopening a section drops its earlier keys.
                    found = (0, String::new());
                }
                current = Some(name.to_string());
                continue;
            }
        }

        if current.as_deref() != Some(section) {
            continue;
        }

        if let Some((line_key, _)) = compact.split_once('=') {
            if line_key == key {
                found = (idx + 1, line.trim().to_string());
            }
        }
    }

    found
}
