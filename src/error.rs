use std::fmt;

/// Broad classification of an [`ScfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ImportReadFailure,
    OutOfSectionValue,
    MalformedLiteral,
    DuplicateKey,
    Syntax,
    File,
    Type,
    NotFound,
    Validation,
}

/// The main error type for SCF loading, parsing and access.
#[derive(Debug, Clone, PartialEq)]
pub enum ScfError {
    /// A file named by an `<import>` marker could not be read.
    ImportReadFailure {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A `key = value` pair was completed before any `{section}` header.
    OutOfSectionValue {
        key: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Value text that is not a supported literal.
    MalformedLiteral {
        text: String,
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A key was reassigned inside a section while strict mode is on.
    DuplicateKey {
        key: String,
        section: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    NotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    ValidationError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ScfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScfError::ImportReadFailure { .. } => ErrorKind::ImportReadFailure,
            ScfError::OutOfSectionValue { .. } => ErrorKind::OutOfSectionValue,
            ScfError::MalformedLiteral { .. } => ErrorKind::MalformedLiteral,
            ScfError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            ScfError::SyntaxError { .. } => ErrorKind::Syntax,
            ScfError::FileError { .. } => ErrorKind::File,
            ScfError::TypeError { .. } => ErrorKind::Type,
            ScfError::NotFound { .. } => ErrorKind::NotFound,
            ScfError::ValidationError { .. } => ErrorKind::Validation,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ScfError::ImportReadFailure { code, .. }
            | ScfError::OutOfSectionValue { code, .. }
            | ScfError::MalformedLiteral { code, .. }
            | ScfError::DuplicateKey { code, .. }
            | ScfError::SyntaxError { code, .. }
            | ScfError::FileError { code, .. }
            | ScfError::TypeError { code, .. }
            | ScfError::NotFound { code, .. }
            | ScfError::ValidationError { code, .. } => *code,
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for ScfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScfError::ImportReadFailure { path, message, hint, code } =>
                write!(f, "[SCF] Import Error '{}': {}{}", path, message, suffix(hint, code)),
            ScfError::OutOfSectionValue { key, line, hint, code } =>
                write!(f, "[SCF] Value found outside of a section at line {}: key `{}`{}",
                    line, key, suffix(hint, code)),
            ScfError::MalformedLiteral { text, message, line, column, hint, code } =>
                write!(f, "[SCF] Malformed literal `{}` at {}:{}: {}{}",
                    text, line, column, message, suffix(hint, code)),
            ScfError::DuplicateKey { key, section, line, hint, code } =>
                write!(f, "[SCF] Key: `{}` has been replaced in section: {} (line {}){}",
                    key, section, line, suffix(hint, code)),
            ScfError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[SCF] Syntax Error at {}:{}: {}{}", line, column, message, suffix(hint, code)),
            ScfError::FileError { path, message, hint, code } =>
                write!(f, "[SCF] File Error '{}': {}{}", path, message, suffix(hint, code)),
            ScfError::TypeError { message, line, column, hint, code } =>
                write!(f, "[SCF] Type Error at {}:{}: {}{}", line, column, message, suffix(hint, code)),
            ScfError::NotFound { path, hint, code } =>
                write!(f, "[SCF] Path '{}' not found in configuration{}", path, suffix(hint, code)),
            ScfError::ValidationError { message, line, column, hint, code } =>
                write!(f, "[SCF] Validation Error at {}:{}: {}{}", line, column, message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for ScfError {}
