// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use crate::ast::{Document, Section, Value};
use crate::diagnostic::Diagnostic;
use crate::parser::{ParseOptions, Parser};
use crate::resolver::ImportResolver;
use crate::ScfError;

mod access;
mod conversion;
mod helpers;
mod validation;

/// A parsed SCF document together with the text it came from.
///
/// The raw (import-expanded) text is kept so access errors can point at the
/// line a key was defined on.
#[derive(Debug, Clone)]
pub struct ScfConfig {
    document: Document,
    raw_content: String,
    diagnostics: Vec<Diagnostic>,
}

impl ScfConfig {
    /// Load an SCF file; relative imports resolve against the file's directory.
    ///
    /// # Example
    /// ```ignore
    /// let config = ScfConfig::from_file("config.scf")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScfError> {
        Self::from_file_with(path, &ParseOptions::default())
    }

    pub fn from_file_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self, ScfError> {
        let path_ref = path.as_ref();
        let content = crate::read_file(path_ref)?;

        let base_dir = path_ref.parent().unwrap_or_else(|| Path::new("."));
        let expanded = ImportResolver::with_base_dir(base_dir).resolve(&content)?;

        Self::build(expanded, options)
    }

    /// Load an SCF config file with fallback support
    ///
    /// Tries to load from the primary path first. If that file cannot be read,
    /// attempts to load from the fallback path. Parse errors in the primary file
    /// are returned as-is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, ScfError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(ScfError::FileError { .. }) => {
                Self::from_file(&fallback).map_err(|e| match e {
                    ScfError::FileError { message, .. } => ScfError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(301),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Parse an SCF config from a string. Imports resolve against the working directory.
    pub fn from_str(content: &str) -> Result<Self, ScfError> {
        Self::from_str_with(content, &ParseOptions::default())
    }

    pub fn from_str_with(content: &str, options: &ParseOptions) -> Result<Self, ScfError> {
        let expanded = ImportResolver::new().resolve(content)?;
        Self::build(expanded, options)
    }

    fn build(expanded: String, options: &ParseOptions) -> Result<Self, ScfError> {
        let (document, diagnostics) = {
            let mut parser = Parser::with_options(&expanded, options.clone());
            let document = parser.parse_document()?;
            (document, parser.take_diagnostics())
        };

        Ok(Self {
            document,
            raw_content: expanded,
            diagnostics,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Duplicate-key reports collected while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The import-expanded text that was parsed.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.document.section(name)
    }

    pub fn sections(&self) -> Vec<String> {
        self.document.section_names().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests;
