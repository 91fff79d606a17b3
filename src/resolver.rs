// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ScfError;

/// Matches one `<file>` marker. Content may not contain another angle bracket.
static IMPORT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^<>]*)>").expect("import marker pattern is valid"));

/// Collect every `<file>` marker in `text`, in the order they appear.
///
/// Markers are not line-anchored and cannot be escaped. Empty markers (`<>`) and
/// a `<` with no closing `>` on the same line are skipped.
pub fn collect_imports(text: &str) -> Vec<String> {
    let mut files = Vec::new();

    for line in text.lines() {
        if !line.contains('<') {
            continue;
        }
        for caps in IMPORT_MARKER.captures_iter(line) {
            let name = &caps[1];
            if !name.is_empty() {
                files.push(name.to_string());
            }
        }
    }

    files
}

/// Splices the contents of imported files onto the end of a config text.
///
/// Resolution is one level deep: markers inside imported files are left alone.
#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    base_dir: Option<PathBuf>,
}

impl ImportResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative import paths against `dir` instead of the working directory.
    pub fn with_base_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn resolve(&self, text: &str) -> Result<String, ScfError> {
        let files = collect_imports(text);
        if files.is_empty() {
            return Ok(text.to_string());
        }

        let mut expanded = text.to_string();
        for raw_path in &files {
            let path = self.resolve_path(raw_path)?;
            let contents = fs::read_to_string(&path).map_err(|e| ScfError::ImportReadFailure {
                path: path.to_string_lossy().to_string(),
                message: format!("Failed to read import file: {}", e),
                hint: Some("Check that the imported file exists".into()),
                code: Some(302),
            })?;

            tracing::debug!(path = %path.display(), bytes = contents.len(), "resolved import");

            expanded.push('\n');
            expanded.push_str(&contents);
        }

        Ok(expanded)
    }

    /// Expand "~/" and resolve relative paths against the base directory.
    fn resolve_path(&self, raw_path: &str) -> Result<PathBuf, ScfError> {
        let mut p = if let Some(rest) = raw_path.strip_prefix("~/") {
            let home = dirs::home_dir().ok_or_else(|| ScfError::ImportReadFailure {
                path: raw_path.to_string(),
                message: "Could not determine home directory for ~ expansion".into(),
                hint: Some("Set HOME or use an absolute path in the import".into()),
                code: Some(303),
            })?;
            home.join(rest)
        } else {
            PathBuf::from(raw_path)
        };

        if p.is_relative() {
            if let Some(base) = &self.base_dir {
                p = base.join(p);
            }
        }
        Ok(p)
    }
}

/// Resolve imports relative to the working directory.
pub fn resolve_imports(text: &str) -> Result<String, ScfError> {
    ImportResolver::new().resolve(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_every_marker_in_order() {
        let text = "<a.scf>\n{s} <b.scf>\nx = 1 # <c.scf> <d.scf>\n";
        assert_eq!(collect_imports(text), vec!["a.scf", "b.scf", "c.scf", "d.scf"]);
    }

    #[test]
    fn test_collect_skips_empty_and_unclosed() {
        let text = "<>\n<never closed\nk = 1";
        assert!(collect_imports(text).is_empty());
    }

    #[test]
    fn test_no_markers_returns_text_unchanged() {
        let text = "{s}\nk = 1";
        assert_eq!(resolve_imports(text).unwrap(), text);
    }

    #[test]
    fn test_contents_appended_in_marker_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.scf"), "{one}\na = 1").unwrap();
        fs::write(dir.path().join("two.scf"), "{two}\nb = 2").unwrap();

        let resolver = ImportResolver::with_base_dir(dir.path());
        let out = resolver.resolve("<two.scf>\n<one.scf>").unwrap();

        assert_eq!(out, "<two.scf>\n<one.scf>\n{two}\nb = 2\n{one}\na = 1");
    }

    #[test]
    fn test_imports_are_not_resolved_recursively() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.scf"), "<c.scf>\n{b}\nx = 1").unwrap();
        // c.scf is deliberately absent: reading it would fail.

        let resolver = ImportResolver::with_base_dir(dir.path());
        let out = resolver.resolve("<b.scf>").unwrap();

        assert!(out.ends_with("<c.scf>\n{b}\nx = 1"));
    }

    #[test]
    fn test_missing_import_is_fatal() {
        let dir = tempdir().unwrap();
        let resolver = ImportResolver::with_base_dir(dir.path());

        let err = resolver.resolve("<missing.scf>").unwrap_err();
        assert!(matches!(err, ScfError::ImportReadFailure { code: Some(302), .. }));
    }

    #[test]
    fn test_relative_paths_join_base_dir() {
        let dir = tempdir().unwrap();
        let resolver = ImportResolver::with_base_dir(dir.path());

        assert_eq!(resolver.resolve_path("sub/a.scf").unwrap(), dir.path().join("sub/a.scf"));

        let absolute = dir.path().join("abs.scf");
        let raw = absolute.to_string_lossy();
        assert_eq!(resolver.resolve_path(&raw).unwrap(), absolute);

        let plain = ImportResolver::new();
        assert_eq!(plain.resolve_path("a.scf").unwrap(), PathBuf::from("a.scf"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let dir = tempdir().unwrap();

        let plain = ImportResolver::new();
        assert_eq!(plain.resolve_path("~/x.scf").unwrap(), home.join("x.scf"));

        // The expanded path is absolute, so the base dir is not applied.
        let based = ImportResolver::with_base_dir(dir.path());
        assert_eq!(based.resolve_path("~/x.scf").unwrap(), home.join("x.scf"));

        // Only a leading "~/" is expanded.
        assert_eq!(based.resolve_path("a~/x.scf").unwrap(), dir.path().join("a~/x.scf"));
    }
}
