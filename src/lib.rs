//! SCF, a simple sectioned config format.
//!
//! ```text
//! # Comment
//! <shared.scf>
//!
//! {server} Main server settings
//!     host = "localhost"
//!     port = 8080
//!     debug = True
//!     ratio = 0.75
//!     allowed = [
//!         "alpha", "beta",
//!     ]
//!     limits = {"cpu": 2, 10: (1, 2)}
//! ```
//!
//! Text is import-expanded first: the contents of every `<file>` marker are
//! appended to the end of the text, one level deep. The expanded text is then
//! scanned into a [`Document`] mapping section names to key/value sections.

use std::fs;
use std::path::Path;

pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;

pub use ast::{Document, Section, Value};
pub use config::ScfConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{ErrorKind, ScfError};
pub use parser::{parse_literal, ParseOptions, Parser};
pub use resolver::{resolve_imports, ImportResolver};

/// Parse SCF text with default options: duplicates are reported, not fatal.
///
/// ```rust
/// let doc = scf::parse("{s}\nk = 10").unwrap();
/// assert_eq!(doc.get("s", "k"), Some(&scf::Value::Integer(10)));
/// ```
pub fn parse(text: &str) -> Result<Document, ScfError> {
    parse_with(text, &ParseOptions::default())
}

/// Resolve imports against the working directory, then parse.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Document, ScfError> {
    let expanded = resolve_imports(text)?;
    Parser::with_options(&expanded, options.clone()).parse_document()
}

/// Read the file at `path` and parse it with default options.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Document, ScfError> {
    read_with(path, &ParseOptions::default())
}

pub fn read_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Document, ScfError> {
    let content = read_file(path.as_ref())?;
    parse_with(&content, options)
}

pub(crate) fn read_file(path: &Path) -> Result<String, ScfError> {
    fs::read_to_string(path).map_err(|e| ScfError::FileError {
        path: path.to_string_lossy().to_string(),
        message: format!("Failed to read file: {}", e),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_resolves_imports_once() {
        let dir = tempdir().unwrap();
        let b = dir.path().join("b.scf");
        let c = dir.path().join("c.scf");
        let a = dir.path().join("a.scf");

        fs::write(&c, "{c}\nfrom_c = 1").unwrap();
        fs::write(&b, format!("<{}>\n{{b}}\nfrom_b = 2", c.display())).unwrap();
        fs::write(&a, format!("<{}>\n{{a}}\nfrom_a = 3", b.display())).unwrap();

        let doc = read(&a).expect("Failed to read config");

        assert_eq!(doc.get("a", "from_a"), Some(&Value::Integer(3)));
        assert_eq!(doc.get("b", "from_b"), Some(&Value::Integer(2)));
        assert!(!doc.contains_section("c"));
    }

    #[test]
    fn test_imported_section_overrides_main() {
        let dir = tempdir().unwrap();
        let shared = dir.path().join("shared.scf");
        fs::write(&shared, "{s}\nk = 'imported'").unwrap();

        let text = format!("<{}>\n{{s}}\nk = 'main'\nonly_main = 1", shared.display());
        let doc = parse(&text).expect("Failed to parse");

        // Appended text reopens the section, so the imported block wins.
        assert_eq!(doc.get("s", "k"), Some(&Value::String("imported".into())));
        assert_eq!(doc.get("s", "only_main"), None);
    }

    #[test]
    fn test_strict_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.scf");
        fs::write(&path, "{s}\nk = 1\nk = 2").unwrap();

        assert!(read(&path).is_ok());
        let err = read_with(&path, &ParseOptions::strict()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read(dir.path().join("nope.scf")).unwrap_err();
        assert!(matches!(err, ScfError::FileError { code: Some(301), .. }));
    }

    #[test]
    fn test_missing_import_aborts_parse() {
        let err = parse("<definitely/not/here.scf>\n{s}\nk = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImportReadFailure);
    }
}
