// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::ScfError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),

    // --- structure ---
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,

    Eof,
}

/// Tokenizer over the text of a single value literal.
pub struct Lexer<'a> {
    source: &'a str,
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// `line` is the config line the literal was read from, used in errors.
    pub fn new(source: &'a str, line: usize) -> Self {
        let mut lexer = Lexer {
            source,
            input: source.chars(),
            peek: None,
            line,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn next_token(&mut self) -> Result<Token, ScfError> {
        tokenizer::next_token(self)
    }

    /// Build a `MalformedLiteral` error at the current position.
    pub(crate) fn malformed(&self, message: impl Into<String>, hint: Option<&str>, code: u32) -> ScfError {
        ScfError::MalformedLiteral {
            text: self.source.to_string(),
            message: message.into(),
            line: self.line,
            column: self.column,
            hint: hint.map(Into::into),
            code: Some(code),
        }
    }
}
