use super::*;

/// Evaluate literal text (`10`, `"a"`, `[1, (2, 3)]`, `{"k": true}`, ...) into a [`Value`].
///
/// Only the literal grammar is accepted: there are no operators, names or references.
pub fn parse_literal(text: &str) -> Result<Value, ScfError> {
    parse_literal_at(text, 0)
}

pub(crate) fn parse_literal_at(text: &str, line: usize) -> Result<Value, ScfError> {
    let mut parser = LiteralParser::new(text, line)?;
    let value = parser.parse_value()?;

    match parser.bump()? {
        Token::Eof => Ok(value),
        token => Err(parser.lexer.malformed(
            format!("Unexpected {:?} after complete value", token),
            Some("Separate list items with commas and wrap them in brackets"),
            205,
        )),
    }
}

struct LiteralParser<'a> {
    lexer: Lexer<'a>,
    peek: Token,
}

impl<'a> LiteralParser<'a> {
    fn new(text: &'a str, line: usize) -> Result<Self, ScfError> {
        let mut lexer = Lexer::new(text, line);
        let peek = lexer.next_token()?;
        Ok(Self { lexer, peek })
    }

    fn bump(&mut self) -> Result<Token, ScfError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.peek, next))
    }

    fn peek(&self) -> &Token {
        &self.peek
    }

    fn unexpected(&self, token: &Token, expected: &str) -> ScfError {
        if *token == Token::Eof {
            self.lexer.malformed(
                format!("Unexpected end of literal, expected {}", expected),
                Some("Check for a missing closing bracket"),
                201,
            )
        } else {
            self.lexer.malformed(
                format!("Expected {}, got {:?}", expected, token),
                None,
                202,
            )
        }
    }

    fn parse_value(&mut self) -> Result<Value, ScfError> {
        match self.bump()? {
            Token::Str(s) => Ok(Value::String(s)),
            Token::Int(n) => Ok(Value::Integer(n)),
            Token::Float(n) => Ok(Value::Float(n)),
            Token::Bool(b) => Ok(Value::Bool(b)),
            Token::LBracket => self.parse_sequence(Token::RBracket).map(Value::List),
            Token::LParen => self.parse_parenthesized(),
            Token::LBrace => self.parse_map(),
            token => Err(self.unexpected(&token, "a value")),
        }
    }

    /// Comma-separated values up to `close`; a trailing comma is allowed.
    fn parse_sequence(&mut self, close: Token) -> Result<Vec<Value>, ScfError> {
        let mut items = Vec::new();

        loop {
            if *self.peek() == close {
                self.bump()?;
                return Ok(items);
            }

            items.push(self.parse_value()?);

            match self.bump()? {
                Token::Comma => continue,
                token if token == close => return Ok(items),
                token => return Err(self.unexpected(&token, "',' or a closing bracket")),
            }
        }
    }

    /// `()` and `(a, ...)` are tuples; `(a)` is just `a`.
    fn parse_parenthesized(&mut self) -> Result<Value, ScfError> {
        if *self.peek() == Token::RParen {
            self.bump()?;
            return Ok(Value::Tuple(Vec::new()));
        }

        let first = self.parse_value()?;
        match self.bump()? {
            Token::RParen => Ok(first),
            Token::Comma => {
                let mut items = vec![first];
                items.extend(self.parse_sequence(Token::RParen)?);
                Ok(Value::Tuple(items))
            }
            token => Err(self.unexpected(&token, "',' or ')'")),
        }
    }

    fn parse_map(&mut self) -> Result<Value, ScfError> {
        let mut entries: Vec<(Value, Value)> = Vec::new();

        loop {
            if *self.peek() == Token::RBrace {
                self.bump()?;
                return Ok(Value::Map(entries));
            }

            let key = self.parse_value()?;
            match self.bump()? {
                Token::Colon => {}
                token => return Err(self.unexpected(&token, "':' after map key")),
            }
            let value = self.parse_value()?;

            // A repeated key keeps its first position but takes the newer value.
            match entries.iter_mut().find(|(k, _)| same_key(k, &key)) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }

            match self.bump()? {
                Token::Comma => continue,
                Token::RBrace => return Ok(Value::Map(entries)),
                token => return Err(self.unexpected(&token, "',' or '}'")),
            }
        }
    }
}

/// Map key equality: `1`, `1.0` and `true` name the same key.
fn same_key(a: &Value, b: &Value) -> bool {
    fn numeric(v: &Value) -> Option<f64> {
        match v {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Tuple(x), Value::Tuple(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_key(x, y))
        }
        _ => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x == y,
            (None, None) => a == b,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_literal("10"), Ok(Value::Integer(10)));
        assert_eq!(parse_literal("-10.3"), Ok(Value::Float(-10.3)));
        assert_eq!(parse_literal("True"), Ok(Value::Bool(true)));
        assert_eq!(parse_literal("false"), Ok(Value::Bool(false)));
        assert_eq!(parse_literal("'single'"), Ok(Value::String("single".into())));
    }

    #[test]
    fn test_tuple_forms() {
        assert_eq!(parse_literal("()"), Ok(Value::Tuple(vec![])));
        assert_eq!(parse_literal("(1,)"), Ok(Value::Tuple(vec![Value::Integer(1)])));
        assert_eq!(parse_literal("(1)"), Ok(Value::Integer(1)));
        assert_eq!(
            parse_literal("(1, 'a',)"),
            Ok(Value::Tuple(vec![Value::Integer(1), Value::String("a".into())]))
        );
    }

    #[test]
    fn test_map_with_mixed_keys() {
        let value = parse_literal(r#"{"a": 1, 2: [true], (1, 2): {}}"#).unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::String("a".into()), Value::Integer(1)),
                (Value::Integer(2), Value::List(vec![Value::Bool(true)])),
                (
                    Value::Tuple(vec![Value::Integer(1), Value::Integer(2)]),
                    Value::Map(vec![])
                ),
            ])
        );
    }

    #[test]
    fn test_repeated_map_key_keeps_last_value() {
        let value = parse_literal(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::String("a".into()), Value::Integer(3)),
                (Value::String("b".into()), Value::Integer(2)),
            ])
        );
    }

    #[test]
    fn test_numerically_equal_keys_collapse() {
        let value = parse_literal("{1: 'a', 1.0: 'b', True: 'c', 0: 'd', false: 'e'}").unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::Integer(1), Value::String("c".into())),
                (Value::Integer(0), Value::String("e".into())),
            ])
        );

        let value = parse_literal("{(1, 2): 'a', (1.0, 2): 'b', '1': 'c'}").unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (
                    Value::Tuple(vec![Value::Integer(1), Value::Integer(2)]),
                    Value::String("b".into())
                ),
                (Value::String("1".into()), Value::String("c".into())),
            ])
        );
    }

    #[test]
    fn test_malformed_literals() {
        for text in ["[1, 2", "[1 2]", "{1}", "1 2", "", "]", "{'a': }", "(1, 2"] {
            let result = parse_literal(text);
            assert!(
                matches!(result, Err(ScfError::MalformedLiteral { .. })),
                "expected {:?} to be malformed, got {:?}",
                text,
                result
            );
        }
    }

    #[test]
    fn test_trailing_content_code() {
        let err = parse_literal("[1][2]").unwrap_err();
        assert!(matches!(err, ScfError::MalformedLiteral { code: Some(205), .. }));
    }
}
