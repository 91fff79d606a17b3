use crate::ast::{Document, Value};
use crate::diagnostic::Diagnostic;
use crate::lexer::{Lexer, Token};
use crate::ScfError;

mod document;
mod options;
mod value;

pub use options::ParseOptions;
pub use value::parse_literal;

/// Scans SCF text into a [`Document`].
///
/// The parser works on text that has already been import-expanded; it never
/// touches the filesystem.
pub struct Parser<'a> {
    input: &'a str,
    options: ParseOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Self {
            input,
            options,
            diagnostics: Vec::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Non-fatal reports from the last call to [`Parser::parse_document`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn parse_document(&mut self) -> Result<Document, ScfError> {
        self.diagnostics.clear();
        document::parse_document(self)
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }
}
