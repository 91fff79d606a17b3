//! Options controlling how a document is scanned and how duplicate keys are handled.
//!
//! ```rust
//! use scf::ParseOptions;
//!
//! // Fail on the first reassigned key instead of overwriting it.
//! let options = ParseOptions::strict();
//! assert!(options.strict);
//!
//! // Reproduce the legacy scanner: whitespace inside quotes is dropped
//! // and `#` always starts a comment.
//! let options = ParseOptions::new().with_quote_aware(false);
//! assert!(!options.quote_aware);
//! ```

/// Configuration for [`Parser`](crate::parser::Parser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report reassigned keys as diagnostics. Default `true`.
    pub report_duplicates: bool,
    /// Fail with `DuplicateKey` when a key is reassigned. Default `false`.
    pub strict: bool,
    /// Track quoted strings while scanning, so whitespace, `#`, `=` and brackets
    /// inside them are kept verbatim. Default `true`.
    pub quote_aware: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            report_duplicates: true,
            strict: false,
            quote_aware: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with strict duplicate handling turned on.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            strict: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_report_duplicates(mut self, report: bool) -> Self {
        self.report_duplicates = report;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_quote_aware(mut self, quote_aware: bool) -> Self {
        self.quote_aware = quote_aware;
        self
    }
}
