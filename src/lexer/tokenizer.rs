use super::*;
use super::scanner::{bump, peek_second, skip_whitespace};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, ScfError> {
    skip_whitespace(lexer);

    match lexer.peek {
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some('(') => tokenize_symbol(lexer, Token::LParen),
        Some(')') => tokenize_symbol(lexer, Token::RParen),
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some(':') => tokenize_symbol(lexer, Token::Colon),
        Some('"') | Some('\'') => tokenize_string(lexer),
        Some(c) if c.is_ascii_digit() || c == '+' || c == '-' || c == '.' => tokenize_number(lexer),
        Some(c) if c.is_alphabetic() || c == '_' => tokenize_word(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, ScfError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_string(lexer: &mut Lexer) -> Result<Token, ScfError> {
    let quote = match bump(lexer) {
        Some(q) => q,
        None => return Err(lexer.malformed("Expected string", None, 103)),
    };
    let mut content = String::new();

    loop {
        match bump(lexer) {
            Some(ch) if ch == quote => return Ok(Token::Str(content)),
            Some('\\') => {
                let Some(next_ch) = bump(lexer) else {
                    break;
                };
                match next_ch {
                    'n' => content.push('\n'),
                    't' => content.push('\t'),
                    'r' => content.push('\r'),
                    '0' => content.push('\0'),
                    '\\' => content.push('\\'),
                    '"' => content.push('"'),
                    '\'' => content.push('\''),
                    other => {
                        // Unknown escapes keep their backslash.
                        content.push('\\');
                        content.push(other);
                    }
                }
            }
            Some(ch) => content.push(ch),
            None => break,
        }
    }

    Err(lexer.malformed(
        format!("Unclosed string starting with {}", quote),
        Some("String literals must be closed on the same line"),
        103,
    ))
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, ScfError> {
    let mut num = String::new();
    let mut is_float = false;
    let mut digits = 0usize;

    if let Some(sign @ ('+' | '-')) = lexer.peek {
        num.push(sign);
        bump(lexer);
    }

    digits += take_digits(lexer, &mut num);

    if lexer.peek == Some('.') {
        is_float = true;
        num.push('.');
        bump(lexer);
        digits += take_digits(lexer, &mut num);
    }

    if digits == 0 {
        return Err(lexer.malformed(
            format!("Invalid number '{}'", num),
            Some("Numbers need at least one digit"),
            102,
        ));
    }

    if matches!(lexer.peek, Some('e' | 'E')) {
        let exponent_follows = match peek_second(lexer) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => true,
            _ => false,
        };
        if exponent_follows {
            is_float = true;
            num.push('e');
            bump(lexer);
            if let Some(sign @ ('+' | '-')) = lexer.peek {
                num.push(sign);
                bump(lexer);
            }
            if take_digits(lexer, &mut num) == 0 {
                return Err(lexer.malformed(
                    format!("Invalid exponent in '{}'", num),
                    None,
                    102,
                ));
            }
        }
    }

    if is_float {
        num.parse::<f64>()
            .map(Token::Float)
            .map_err(|_| lexer.malformed(format!("Invalid float '{}'", num), None, 102))
    } else {
        num.parse::<i64>().map(Token::Int).map_err(|_| {
            lexer.malformed(
                format!("Invalid integer '{}'", num),
                Some("Integers must fit in a signed 64-bit value"),
                102,
            )
        })
    }
}

fn take_digits(lexer: &mut Lexer, out: &mut String) -> usize {
    let mut count = 0;
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            out.push(ch);
            bump(lexer);
            count += 1;
        } else {
            break;
        }
    }
    count
}

fn tokenize_word(lexer: &mut Lexer) -> Result<Token, ScfError> {
    let mut word = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            word.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    match word.as_str() {
        "true" | "True" => Ok(Token::Bool(true)),
        "false" | "False" => Ok(Token::Bool(false)),
        _ => Err(lexer.malformed(
            format!("Unknown bare word '{}'", word),
            Some("Quote strings with \" or '"),
            101,
        )),
    }
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, ScfError> {
    bump(lexer);
    Err(lexer.malformed(
        format!("Unexpected character '{}'", ch),
        Some("Only booleans, numbers, strings, lists, tuples and maps are allowed"),
        104,
    ))
}
