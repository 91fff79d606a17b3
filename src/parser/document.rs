use super::*;

/// Where the scanner is within the current logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Accumulating a key (or free text that is discarded at end of line).
    AwaitingKey,
    /// Inside `{...}` reading a section name.
    SectionHeader,
    /// After `=`, with no bracket open.
    AwaitingValue,
    /// After `=`, with at least one bracket open; may span physical lines.
    InsideLiteral,
}

/// Open-bracket counts, tracked per bracket kind.
#[derive(Debug, Default)]
struct BracketDepth {
    brace: usize,
    bracket: usize,
    paren: usize,
}

impl BracketDepth {
    fn open(&mut self, ch: char) {
        match ch {
            '{' => self.brace += 1,
            '[' => self.bracket += 1,
            _ => self.paren += 1,
        }
    }

    /// Returns `false` when there is no open bracket of that kind.
    fn close(&mut self, ch: char) -> bool {
        let slot = match ch {
            '}' => &mut self.brace,
            ']' => &mut self.bracket,
            _ => &mut self.paren,
        };
        match slot.checked_sub(1) {
            Some(n) => {
                *slot = n;
                true
            }
            None => false,
        }
    }

    fn is_zero(&self) -> bool {
        self.brace == 0 && self.bracket == 0 && self.paren == 0
    }
}

struct ScanState {
    phase: Phase,
    key: String,
    value: String,
    header: String,
    depth: BracketDepth,
    /// Open quote character while inside a string literal.
    quote: Option<char>,
    escaped: bool,
    /// Line on which the current value's `=` was seen.
    value_line: usize,
    section: Option<String>,
}

impl ScanState {
    fn new() -> Self {
        Self {
            phase: Phase::AwaitingKey,
            key: String::new(),
            value: String::new(),
            header: String::new(),
            depth: BracketDepth::default(),
            quote: None,
            escaped: false,
            value_line: 0,
            section: None,
        }
    }

    fn reset_pending(&mut self) {
        self.phase = Phase::AwaitingKey;
        self.key.clear();
        self.value.clear();
        self.header.clear();
        self.quote = None;
        self.escaped = false;
    }
}

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, ScfError> {
    let input = parser.input;
    let quote_aware = parser.options.quote_aware;

    let mut doc = Document::new();
    let mut state = ScanState::new();
    let mut last_line = 0;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;

        for (col, ch) in line.chars().enumerate() {
            if quote_aware && state.quote.is_some() {
                scan_quoted(&mut state, ch);
                continue;
            }

            if ch.is_whitespace() {
                continue;
            }

            if ch == '#' {
                break;
            }

            match state.phase {
                Phase::SectionHeader => scan_header(&mut state, &mut doc, ch, line_no, col + 1)?,
                Phase::AwaitingKey => scan_key(&mut state, ch, line_no, col + 1)?,
                Phase::AwaitingValue | Phase::InsideLiteral => {
                    scan_value(&mut state, ch, quote_aware, line_no, col + 1)?
                }
            }
        }

        end_of_line(parser, &mut state, &mut doc, line_no, line.chars().count())?;
    }

    if state.phase == Phase::InsideLiteral {
        return Err(ScfError::MalformedLiteral {
            text: state.value.clone(),
            message: format!("Value for `{}` is missing a closing bracket", state.key),
            line: last_line,
            column: state.value.chars().count(),
            hint: Some(format!("The value starts on line {}", state.value_line)),
            code: Some(201),
        });
    }

    Ok(doc)
}

fn scan_quoted(state: &mut ScanState, ch: char) {
    state.value.push(ch);
    if state.escaped {
        state.escaped = false;
    } else if ch == '\\' {
        state.escaped = true;
    } else if Some(ch) == state.quote {
        state.quote = None;
    }
}

fn scan_header(
    state: &mut ScanState,
    doc: &mut Document,
    ch: char,
    line: usize,
    column: usize,
) -> Result<(), ScfError> {
    match ch {
        '{' => state.header.clear(),
        '}' => {
            if state.header.is_empty() {
                return Err(ScfError::SyntaxError {
                    message: "Empty section name".into(),
                    line,
                    column,
                    hint: Some("Name the section, e.g. {server}".into()),
                    code: Some(213),
                });
            }
            let name = std::mem::take(&mut state.header);
            if doc.contains_section(&name) {
                tracing::debug!(section = %name, line, "section reopened, previous keys dropped");
            }
            doc.open_section(&name);
            state.section = Some(name);
            state.phase = Phase::AwaitingKey;
        }
        _ => state.header.push(ch),
    }
    Ok(())
}

fn scan_key(state: &mut ScanState, ch: char, line: usize, column: usize) -> Result<(), ScfError> {
    match ch {
        // A key written before the header survives it: `ab{c} = 1` stores `ab` in `c`.
        '{' => {
            state.header.clear();
            state.phase = Phase::SectionHeader;
        }
        '}' => {
            return Err(ScfError::SyntaxError {
                message: "Unexpected '}' outside of a section header or value".into(),
                line,
                column,
                hint: None,
                code: Some(214),
            });
        }
        '=' => {
            state.value_line = line;
            state.phase = Phase::AwaitingValue;
        }
        _ => state.key.push(ch),
    }
    Ok(())
}

fn scan_value(
    state: &mut ScanState,
    ch: char,
    quote_aware: bool,
    line: usize,
    column: usize,
) -> Result<(), ScfError> {
    match ch {
        // The legacy scanner silently drops a second `=`.
        '=' if !quote_aware => return Ok(()),
        '"' | '\'' if quote_aware => state.quote = Some(ch),
        '{' | '[' | '(' => {
            state.depth.open(ch);
            state.phase = Phase::InsideLiteral;
        }
        '}' | ']' | ')' => {
            if !state.depth.close(ch) {
                state.value.push(ch);
                return Err(ScfError::MalformedLiteral {
                    text: state.value.clone(),
                    message: format!("Unmatched '{}'", ch),
                    line,
                    column,
                    hint: None,
                    code: Some(206),
                });
            }
            if state.depth.is_zero() {
                state.phase = Phase::AwaitingValue;
            }
        }
        _ => {}
    }
    state.value.push(ch);
    Ok(())
}

fn end_of_line(
    parser: &mut Parser,
    state: &mut ScanState,
    doc: &mut Document,
    line: usize,
    width: usize,
) -> Result<(), ScfError> {
    if let Some(quote) = state.quote {
        return Err(ScfError::MalformedLiteral {
            text: state.value.clone(),
            message: format!("Unclosed string starting with {}", quote),
            line,
            column: width,
            hint: Some("String literals must be closed on the same line".into()),
            code: Some(103),
        });
    }

    match state.phase {
        Phase::InsideLiteral => return Ok(()),
        Phase::SectionHeader => {
            return Err(ScfError::SyntaxError {
                message: format!("Section header '{{{}' is not closed", state.header),
                line,
                column: width,
                hint: Some("Close the section name with '}' on the same line".into()),
                code: Some(212),
            });
        }
        Phase::AwaitingValue if !state.key.is_empty() && !state.value.is_empty() => {
            commit(parser, state, doc)?;
        }
        _ => {}
    }

    state.reset_pending();
    Ok(())
}

/// Evaluate the pending value and store it in the current section.
fn commit(parser: &mut Parser, state: &mut ScanState, doc: &mut Document) -> Result<(), ScfError> {
    let line = state.value_line;
    let key = std::mem::take(&mut state.key);

    let out_of_section = || ScfError::OutOfSectionValue {
        key: key.clone(),
        line,
        hint: Some("Add a {section} header before the first key".into()),
        code: Some(210),
    };

    let Some(section_name) = state.section.clone() else {
        return Err(out_of_section());
    };

    let value = value::parse_literal_at(&state.value, line)?;

    let strict = parser.options.strict;
    let report = parser.options.report_duplicates;

    let section = doc.section_mut(&section_name).ok_or_else(out_of_section)?;
    if section.contains_key(&key) {
        if strict {
            return Err(ScfError::DuplicateKey {
                key,
                section: section_name,
                line,
                hint: Some("Remove one of the assignments or disable strict mode".into()),
                code: Some(211),
            });
        }
        if report {
            parser.report(Diagnostic::duplicate_key(&section_name, &key, line));
        }
    }

    tracing::trace!(section = %section_name, key = %key, line, "value committed");
    section.insert(key, value);
    Ok(())
}
