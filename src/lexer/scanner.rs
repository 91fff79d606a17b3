use super::*;

/// Advance the character iterator and update column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if curr.is_some() {
        lexer.column += 1;
    }
    lexer.peek = lexer.input.next();
    curr
}

pub(super) fn skip_whitespace(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        if c.is_whitespace() {
            bump(lexer);
        } else {
            break;
        }
    }
}

/// Character after the current one, without consuming anything.
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}
