//! Recursive-descent parser for the selector language.
//!
//! Selectors are parsed into a flat list of [`Segment`]s. A selector either
//! parses completely or fails with a [`SelectorSyntaxError`] that points at the
//! offending token; there is no partial result.

use super::ast::{CompareOp, Filter, Literal, Segment, UnionMember};
use thiserror::Error;

/// Reason a selector failed to parse.
///
/// The `Display` output of each variant is stable: it is embedded verbatim in
/// aggregated diff error reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("empty selector")]
    Empty,

    #[error("unrecognized character in action: {}", code_point(*.0))]
    UnrecognizedCharacter(char),

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("unterminated array")]
    UnterminatedArray,

    #[error("unclosed quote")]
    UnclosedQuote,

    #[error("invalid array index {0:?}")]
    InvalidIndex(String),

    #[error("slice step must be positive, got {0}")]
    InvalidSliceStep(i64),

    #[error("unterminated filter")]
    UnterminatedFilter,

    #[error("invalid filter expression: {0}")]
    InvalidFilter(String),
}

/// Formats a character as `U+XXXX 'c'`.
fn code_point(c: char) -> String {
    format!("U+{:04X} '{}'", c as u32, c)
}

/// A selector that could not be parsed.
///
/// Carries the original selector text and the offending token for
/// diagnostics. Displays as the reason only; callers add the selector context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct SelectorSyntaxError {
    selector: String,
    position: usize,
    token: String,
    kind: SyntaxErrorKind,
}

impl SelectorSyntaxError {
    /// The selector text as supplied
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Character offset of the offending token
    pub fn position(&self) -> usize {
        self.position
    }

    /// The offending token (empty when the selector ended early)
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }
}

type ParseResult<T> = std::result::Result<T, SelectorSyntaxError>;

/// Parse selector text into segments.
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] for empty input, characters outside the
/// grammar, unterminated brackets, quotes and filters, and malformed indices.
pub(crate) fn parse_segments(text: &str) -> ParseResult<Vec<Segment>> {
    let mut parser = Parser::new(text);
    if text.trim().is_empty() {
        return Err(parser.error(SyntaxErrorKind::Empty, ""));
    }
    parser.parse_root()
}

/// Characters that end an unquoted key.
fn is_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '[' | ']' | '$' | '@' | '{' | '}' | '\\')
}

/// Inside a filter a key also ends at a comparison or a closing paren.
fn is_key_char(c: char, in_filter: bool) -> bool {
    !is_terminator(c) && !(in_filter && matches!(c, '=' | '!' | '<' | '>' | '(' | ')'))
}

/// A selector without a leading `.` or `$` must open with a plain name.
fn is_leading_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '\\'
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, kind: SyntaxErrorKind, token: impl Into<String>) -> SelectorSyntaxError {
        self.error_at(self.pos, kind, token)
    }

    fn error_at(
        &self,
        position: usize,
        kind: SyntaxErrorKind,
        token: impl Into<String>,
    ) -> SelectorSyntaxError {
        SelectorSyntaxError {
            selector: self.source.to_string(),
            position,
            token: token.into(),
            kind,
        }
    }

    fn unrecognized(&self, c: char) -> SelectorSyntaxError {
        self.error(SyntaxErrorKind::UnrecognizedCharacter(c), c)
    }

    fn unexpected_end(&self) -> SelectorSyntaxError {
        self.error(SyntaxErrorKind::UnexpectedEnd, "")
    }

    /// Consume `expected`, or fail with `at_end` if the input is exhausted.
    fn expect(&mut self, expected: char, at_end: SyntaxErrorKind) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.unrecognized(c)),
            None => Err(self.error(at_end, "")),
        }
    }

    fn parse_root(&mut self) -> ParseResult<Vec<Segment>> {
        self.skip_spaces();
        if self.peek() == Some('$') {
            self.pos += 1;
        }

        let mut segments = Vec::new();
        // A bare leading member: `metadata.name` is `.metadata.name`
        if matches!(self.peek(), Some(c) if is_leading_key_char(c) || c == '*') {
            segments.push(self.parse_member(false)?);
        }
        self.parse_steps(&mut segments, false)?;
        Ok(segments)
    }

    /// Parse `.member`, `..member` and `[...]` steps.
    ///
    /// Inside a filter the path ends at the first character that cannot start
    /// a step; at top level such a character is a syntax error.
    fn parse_steps(&mut self, segments: &mut Vec<Segment>, in_filter: bool) -> ParseResult<()> {
        loop {
            self.skip_spaces();
            let Some(c) = self.peek() else { break };
            match c {
                '.' if self.peek_at(1) == Some('.') => {
                    self.pos += 2;
                    let inner = match self.peek() {
                        Some('[') => self.parse_bracket()?,
                        _ => self.parse_member(in_filter)?,
                    };
                    segments.push(Segment::Descend(Box::new(inner)));
                }
                '.' => {
                    self.pos += 1;
                    segments.push(self.parse_member(in_filter)?);
                }
                '[' => segments.push(self.parse_bracket()?),
                _ if in_filter => break,
                other => return Err(self.unrecognized(other)),
            }
        }
        Ok(())
    }

    fn parse_member(&mut self, in_filter: bool) -> ParseResult<Segment> {
        match self.peek() {
            None => Err(self.unexpected_end()),
            Some('*') => {
                self.pos += 1;
                Ok(Segment::Wildcard)
            }
            Some(c) if is_key_char(c, in_filter) || c == '\\' => {
                Ok(Segment::Key(self.parse_name(in_filter)?))
            }
            Some(c) => Err(self.unrecognized(c)),
        }
    }

    /// Read a key name up to the next terminator; `\` makes the following
    /// character literal.
    fn parse_name(&mut self, in_filter: bool) -> ParseResult<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let escaped = self.bump().ok_or_else(|| self.unexpected_end())?;
                name.push(escaped);
            } else if is_key_char(c, in_filter) {
                self.pos += 1;
                name.push(c);
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn parse_bracket(&mut self) -> ParseResult<Segment> {
        let open = self.pos;
        self.pos += 1;
        self.skip_spaces();

        let segment = match self.peek() {
            None => return Err(self.error_at(open, SyntaxErrorKind::UnterminatedArray, "[")),
            Some('*') => {
                self.pos += 1;
                Segment::Wildcard
            }
            Some('?') => {
                self.pos += 1;
                Segment::Filter(self.parse_filter()?)
            }
            Some(_) => self.parse_subscripts()?,
        };

        self.skip_spaces();
        self.expect(']', SyntaxErrorKind::UnterminatedArray)?;
        Ok(segment)
    }

    /// Parse the inside of `[...]`: an index, a slice, a quoted key or a union.
    fn parse_subscripts(&mut self) -> ParseResult<Segment> {
        let mut members = Vec::new();
        loop {
            self.skip_spaces();
            match self.peek() {
                Some(q @ ('\'' | '"')) => members.push(UnionMember::Key(self.parse_quoted(q)?)),
                _ => {
                    let start = self.pos;
                    let first = self.parse_integer_token()?;
                    if self.peek() == Some(':') {
                        if !members.is_empty() {
                            return Err(self.error_at(
                                start,
                                SyntaxErrorKind::InvalidIndex(":".to_string()),
                                ":",
                            ));
                        }
                        return self.parse_slice_rest(first);
                    }
                    match first {
                        Some(index) => members.push(UnionMember::Index(index)),
                        None => {
                            return Err(
                                self.error(SyntaxErrorKind::InvalidIndex(String::new()), "")
                            )
                        }
                    }
                }
            }

            self.skip_spaces();
            if self.peek() == Some(',') {
                self.pos += 1;
                continue;
            }
            break;
        }

        if members.len() == 1 {
            if let Some(member) = members.pop() {
                return Ok(member.into_segment());
            }
        }
        Ok(Segment::Union(members))
    }

    /// Read an optional signed integer up to the next `:`, `,`, `]` or space.
    fn parse_integer_token(&mut self) -> ParseResult<Option<i64>> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !matches!(c, ':' | ',' | ']') && !c.is_whitespace())
        {
            self.pos += 1;
        }
        let token: String = self.chars[start..self.pos].iter().collect();
        if token.is_empty() {
            return Ok(None);
        }
        token.parse::<i64>().map(Some).map_err(|_| {
            self.error_at(start, SyntaxErrorKind::InvalidIndex(token.clone()), token.clone())
        })
    }

    fn parse_slice_rest(&mut self, start: Option<i64>) -> ParseResult<Segment> {
        self.pos += 1;
        self.skip_spaces();
        let end = self.parse_integer_token()?;
        self.skip_spaces();

        let mut step = None;
        if self.peek() == Some(':') {
            self.pos += 1;
            self.skip_spaces();
            let step_pos = self.pos;
            step = self.parse_integer_token()?;
            if let Some(s) = step.filter(|s| *s <= 0) {
                return Err(self.error_at(
                    step_pos,
                    SyntaxErrorKind::InvalidSliceStep(s),
                    s.to_string(),
                ));
            }
        }

        Ok(Segment::Slice { start, end, step })
    }

    fn parse_quoted(&mut self, quote: char) -> ParseResult<String> {
        let open = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => break,
            }
        }
        Err(self.error_at(open, SyntaxErrorKind::UnclosedQuote, quote))
    }

    /// Parse `(@path)` or `(@path <op> literal)` after the `?`.
    fn parse_filter(&mut self) -> ParseResult<Filter> {
        self.expect('(', SyntaxErrorKind::UnterminatedFilter)?;
        self.skip_spaces();
        match self.peek() {
            Some('@') => self.pos += 1,
            Some(c) => {
                return Err(self.error(
                    SyntaxErrorKind::InvalidFilter(format!("expected '@', found {}", code_point(c))),
                    c,
                ))
            }
            None => return Err(self.error(SyntaxErrorKind::UnterminatedFilter, "")),
        }

        let mut path = Vec::new();
        self.parse_steps(&mut path, true)?;
        self.skip_spaces();

        let predicate = match self.peek() {
            Some(')') => None,
            Some(_) => {
                let op = self.parse_compare_op()?;
                self.skip_spaces();
                let literal = self.parse_literal()?;
                self.skip_spaces();
                Some((op, literal))
            }
            None => return Err(self.error(SyntaxErrorKind::UnterminatedFilter, "")),
        };

        self.expect(')', SyntaxErrorKind::UnterminatedFilter)?;
        Ok(Filter { path, predicate })
    }

    fn parse_compare_op(&mut self) -> ParseResult<CompareOp> {
        let (op, width) = match (self.peek(), self.peek_at(1)) {
            (Some('='), Some('=')) => (CompareOp::Eq, 2),
            (Some('!'), Some('=')) => (CompareOp::Ne, 2),
            (Some('<'), Some('=')) => (CompareOp::Le, 2),
            (Some('>'), Some('=')) => (CompareOp::Ge, 2),
            (Some('<'), _) => (CompareOp::Lt, 1),
            (Some('>'), _) => (CompareOp::Gt, 1),
            (Some(c), _) => {
                return Err(self.error(
                    SyntaxErrorKind::InvalidFilter(format!(
                        "unknown operator starting with {}",
                        code_point(c)
                    )),
                    c,
                ))
            }
            (None, _) => return Err(self.error(SyntaxErrorKind::UnterminatedFilter, "")),
        };
        self.pos += width;
        Ok(op)
    }

    fn parse_literal(&mut self) -> ParseResult<Literal> {
        match self.peek() {
            None => Err(self.error(SyntaxErrorKind::UnterminatedFilter, "")),
            Some(q @ ('\'' | '"')) => Ok(Literal::String(self.parse_quoted(q)?)),
            Some(first) => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_'))
                {
                    self.pos += 1;
                }
                let word: String = self.chars[start..self.pos].iter().collect();
                match word.as_str() {
                    "" => Err(self.unrecognized(first)),
                    "true" => Ok(Literal::Bool(true)),
                    "false" => Ok(Literal::Bool(false)),
                    "null" => Ok(Literal::Null),
                    _ => word.parse::<f64>().map(Literal::Number).map_err(|_| {
                        self.error_at(
                            start,
                            SyntaxErrorKind::InvalidFilter(format!("invalid literal {word:?}")),
                            word.clone(),
                        )
                    }),
                }
            }
        }
    }
}
