//! Query lexer (tokenizer).
//!
//! Produces one token per [`TokenSource::next`] call. At every offset the matchers are tried in
//! order and the first one that matches wins, so the keyword matchers claim `AND`, `OR` and `NOT`
//! before the generic text matcher sees them. A field or value that starts with a keyword has to
//! be quoted.

use std::fmt;

use serde::Serialize;

use crate::{error::QueryError, source::TokenSource};

/// The kind of a token. This set is closed; the parser matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// A bare word or a quoted string.
    Text,
    /// A run of whitespace.
    Whitespace,
    /// `(`
    OpenGroup,
    /// `)`
    CloseGroup,
    /// `AND` or `OR`.
    LogicalOperator,
    /// `NOT`
    Negator,
    /// `:`
    Comparator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Decoded text: the keyword or punctuation as written, or the unquoted text value.
    pub text: String,
    /// Zero-based character offset where the token starts.
    pub column: usize,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            column,
        }
    }

    /// Returns true when the token has the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// A successful match at the current offset.
struct Match {
    /// Kind of the matched token.
    kind: TokenKind,
    /// Decoded token text.
    text: String,
    /// Matched length in bytes.
    len: usize,
}

impl Match {
    /// A match whose text is exactly the consumed slice.
    fn verbatim(kind: TokenKind, matched: &str) -> Self {
        Self {
            kind,
            text: matched.to_string(),
            len: matched.len(),
        }
    }
}

/// Signature shared by all matchers. Each receives the unconsumed input.
type Matcher = fn(&str) -> Option<Match>;

/// Matchers in priority order.
const MATCHERS: &[Matcher] = &[
    match_whitespace,
    match_open_group,
    match_close_group,
    match_logical_operator,
    match_negator,
    match_comparator,
    match_text,
];

/// Matches a run of whitespace.
fn match_whitespace(rest: &str) -> Option<Match> {
    let len = rest
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(rest.len());
    (len > 0).then(|| Match::verbatim(TokenKind::Whitespace, &rest[..len]))
}

/// Matches `(`.
fn match_open_group(rest: &str) -> Option<Match> {
    match_literal(rest, "(", TokenKind::OpenGroup)
}

/// Matches `)`.
fn match_close_group(rest: &str) -> Option<Match> {
    match_literal(rest, ")", TokenKind::CloseGroup)
}

/// Matches the `AND` and `OR` keywords.
fn match_logical_operator(rest: &str) -> Option<Match> {
    match_literal(rest, "AND", TokenKind::LogicalOperator)
        .or_else(|| match_literal(rest, "OR", TokenKind::LogicalOperator))
}

/// Matches the `NOT` keyword.
fn match_negator(rest: &str) -> Option<Match> {
    match_literal(rest, "NOT", TokenKind::Negator)
}

/// Matches `:`.
fn match_comparator(rest: &str) -> Option<Match> {
    match_literal(rest, ":", TokenKind::Comparator)
}

/// Matches a literal prefix, case-sensitively.
fn match_literal(rest: &str, literal: &str, kind: TokenKind) -> Option<Match> {
    rest.starts_with(literal)
        .then(|| Match::verbatim(kind, literal))
}

/// Matches a quoted string or a bare word.
fn match_text(rest: &str) -> Option<Match> {
    match_quoted(rest).or_else(|| match_word(rest))
}

/// Matches `"..."` with at least one character of content.
///
/// Inside the quotes a backslash escapes the following character, so `\"` does not terminate
/// the string.
fn match_quoted(rest: &str) -> Option<Match> {
    let body = rest.strip_prefix('"')?;
    let mut chars = body.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' if idx == 0 => return None,
            '"' => {
                return Some(Match {
                    kind: TokenKind::Text,
                    text: unescape(&body[..idx]),
                    len: idx + 2,
                });
            }
            '\\' => {
                chars.next()?;
            }
            _ => {}
        }
    }

    None
}

/// Matches one or more word characters (letters, digits, underscore).
fn match_word(rest: &str) -> Option<Match> {
    let len = rest
        .find(|c: char| !is_word_char(c))
        .unwrap_or(rest.len());
    (len > 0).then(|| Match::verbatim(TokenKind::Text, &rest[..len]))
}

/// Returns true for characters allowed in unquoted text.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Decodes C-style backslash escapes.
///
/// Recognizes `\a \b \f \n \r \t \v`, up to three octal digits, and `\x` followed by up to two
/// hex digits. Any other escaped character stands for itself, which covers `\"` and `\\`.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };

        match escaped {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            'x' if chars.peek().is_some_and(char::is_ascii_hexdigit) => {
                let mut value = 0u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(16)) {
                        Some(digit) => {
                            value = value * 16 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(byte_char(value));
            }
            '0'..='7' => {
                let mut value = escaped.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(byte_char(value));
            }
            other => out.push(other),
        }
    }

    out
}

/// Maps a numeric escape onto a single byte value, read as Latin-1.
fn byte_char(value: u32) -> char {
    char::from((value & 0xff) as u8)
}

/// Pull-based tokenizer over a query string.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    /// The original input string.
    input: &'a str,
    /// Byte offset of the next unconsumed character.
    offset: usize,
    /// Character offset matching `offset`.
    column: usize,
    /// The token produced by the last `next` call.
    current: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            column: 0,
            current: None,
        }
    }

    /// Runs the matchers against the unconsumed input.
    fn match_here(&self) -> Option<Match> {
        let rest = &self.input[self.offset..];
        MATCHERS.iter().find_map(|matcher| matcher(rest))
    }
}

impl TokenSource for Tokenizer<'_> {
    fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn next(&mut self) -> Result<Option<Token>, QueryError> {
        if self.offset >= self.input.len() {
            self.current = None;
            return Ok(None);
        }

        let Some(matched) = self.match_here() else {
            self.current = None;
            return Err(QueryError::recognition(self.input, self.column));
        };

        let consumed = &self.input[self.offset..self.offset + matched.len];
        let token = Token::new(matched.kind, matched.text, self.column);
        self.offset += matched.len;
        self.column += consumed.chars().count();
        self.current = Some(token.clone());
        Ok(Some(token))
    }

    fn reset(&mut self) {
        self.offset = 0;
        self.column = 0;
        self.current = None;
    }
}

/// Tokenizes the entire input, whitespace included.
pub fn tokenize(input: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::new();

    while let Some(token) = tokenizer.next()? {
        tokens.push(token);
    }

    Ok(tokens)
}
