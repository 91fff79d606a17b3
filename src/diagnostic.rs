use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    DuplicateKey,
}

/// A non-fatal report produced while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub section: String,
    pub key: String,
    pub line: usize,
}

impl Diagnostic {
    pub(crate) fn duplicate_key(section: &str, key: &str, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateKey,
            section: section.to_string(),
            key: key.to_string(),
            line,
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            DiagnosticKind::DuplicateKey => format!(
                "Key: `{}` has been replaced in section: {}!",
                self.key, self.section
            ),
        }
    }

    /// Forwards the report to the `tracing` subscriber, if any.
    pub(crate) fn emit(&self) {
        tracing::warn!(
            section = %self.section,
            key = %self.key,
            line = self.line,
            "{}",
            self.message()
        );
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message())
    }
}
