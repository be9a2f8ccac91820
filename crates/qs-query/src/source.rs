//! Token sources consumed by the parser.
//!
//! The parser only ever talks to a [`TokenSource`], never to the tokenizer's matching code, so
//! any of the sources here can drive it unchanged.

use crate::{
    error::QueryError,
    lexer::{Token, TokenKind},
};

/// A pull-based stream of tokens with a single cursor.
pub trait TokenSource {
    /// Returns the token produced by the last [`next`](Self::next) call.
    ///
    /// Returns `None` before the first `next` call and after exhaustion.
    fn current(&self) -> Option<&Token>;

    /// Advances and returns the new current token, or `None` once the stream is exhausted.
    ///
    /// Calling this again after exhaustion keeps returning `None`.
    fn next(&mut self) -> Result<Option<Token>, QueryError>;

    /// Rewinds to the start of the stream.
    fn reset(&mut self);
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn current(&self) -> Option<&Token> {
        (**self).current()
    }

    fn next(&mut self) -> Result<Option<Token>, QueryError> {
        (**self).next()
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Wraps a token source and hides every whitespace token.
#[derive(Debug, Clone)]
pub struct SkipWhitespace<S> {
    /// The wrapped source.
    inner: S,
}

impl<S: TokenSource> SkipWhitespace<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: TokenSource> TokenSource for SkipWhitespace<S> {
    fn current(&self) -> Option<&Token> {
        self.inner
            .current()
            .filter(|token| !token.is(TokenKind::Whitespace))
    }

    fn next(&mut self) -> Result<Option<Token>, QueryError> {
        loop {
            match self.inner.next()? {
                Some(token) if token.is(TokenKind::Whitespace) => continue,
                other => return Ok(other),
            }
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// A source that replays a prepared list of tokens.
///
/// Useful for driving the parser with hand-built token streams, or for parsing tokens that were
/// buffered up front.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    /// Tokens to replay.
    tokens: Vec<Token>,
    /// Index of the current token; `None` before the first `next`.
    index: Option<usize>,
}

impl ScriptedSource {
    /// Creates a source replaying `tokens` in order.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: None,
        }
    }
}

impl From<Vec<Token>> for ScriptedSource {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for ScriptedSource {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TokenSource for ScriptedSource {
    fn current(&self) -> Option<&Token> {
        self.index.and_then(|idx| self.tokens.get(idx))
    }

    fn next(&mut self) -> Result<Option<Token>, QueryError> {
        let next = self.index.map_or(0, |idx| idx + 1);
        // Park one past the end so exhaustion stays sticky.
        self.index = Some(next.min(self.tokens.len()));
        Ok(self.current().cloned())
    }

    fn reset(&mut self) {
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;

    fn tok(kind: TokenKind, text: &str, column: usize) -> Token {
        Token::new(kind, text, column)
    }

    fn drain<S: TokenSource>(source: &mut S) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = source.next().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn skip_whitespace_hides_whitespace() {
        let mut source = SkipWhitespace::new(Tokenizer::new("  a : b  "));
        assert_eq!(
            drain(&mut source),
            vec![
                tok(TokenKind::Text, "a", 2),
                tok(TokenKind::Comparator, ":", 4),
                tok(TokenKind::Text, "b", 6),
            ]
        );
        assert_eq!(source.current(), None);
    }

    #[test]
    fn skip_whitespace_current_matches_next() {
        let mut source = SkipWhitespace::new(Tokenizer::new(" x"));
        let token = source.next().unwrap();
        assert_eq!(token.as_ref(), source.current());
    }

    #[test]
    fn skip_whitespace_filters_scripted_whitespace() {
        let mut source = SkipWhitespace::new(ScriptedSource::new(vec![
            tok(TokenKind::Whitespace, " ", 0),
            tok(TokenKind::Whitespace, " ", 1),
        ]));
        assert_eq!(source.next().unwrap(), None);
        assert_eq!(source.current(), None);
    }

    #[test]
    fn skip_whitespace_reset_rewinds_inner() {
        let mut source = SkipWhitespace::new(Tokenizer::new("a b"));
        drain(&mut source);
        source.reset();
        assert_eq!(source.next().unwrap(), Some(tok(TokenKind::Text, "a", 0)));
    }

    #[test]
    fn scripted_source_replays_in_order() {
        let mut source = ScriptedSource::new(vec![
            tok(TokenKind::Negator, "NOT", 0),
            tok(TokenKind::Text, "x", 4),
        ]);
        assert_eq!(source.current(), None);
        assert_eq!(
            source.next().unwrap(),
            Some(tok(TokenKind::Negator, "NOT", 0))
        );
        assert_eq!(source.current(), Some(&tok(TokenKind::Negator, "NOT", 0)));
        assert_eq!(source.next().unwrap(), Some(tok(TokenKind::Text, "x", 4)));
        assert_eq!(source.next().unwrap(), None);
        assert_eq!(source.next().unwrap(), None);
        assert_eq!(source.current(), None);
    }

    #[test]
    fn scripted_source_reset() {
        let mut source: ScriptedSource = vec![tok(TokenKind::Text, "x", 0)].into();
        drain(&mut source);
        source.reset();
        assert_eq!(source.next().unwrap(), Some(tok(TokenKind::Text, "x", 0)));
    }

    #[test]
    fn mutable_reference_is_a_source() {
        let mut tokenizer = Tokenizer::new("a");
        let mut borrowed = &mut tokenizer;
        assert!(TokenSource::next(&mut borrowed).unwrap().is_some());
        assert_eq!(tokenizer.current(), Some(&tok(TokenKind::Text, "a", 0)));
    }
}
