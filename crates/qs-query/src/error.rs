//! Error types for tokenizing and parsing queries.

use thiserror::Error;

/// An error produced while tokenizing or parsing a query.
///
/// Both kinds are terminal: the parser stops at the first error and never returns a partial
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No lexical rule matched at `offset`.
    #[error("Unrecognized character at column [{offset}]")]
    Recognition {
        /// The full source text being tokenized.
        text: String,
        /// Character offset where matching failed.
        offset: usize,
    },

    /// The token stream violates the grammar.
    #[error("Semantic error: {message}")]
    Semantic {
        /// Human-readable description of the violated rule.
        message: String,
        /// Column of the offending token, when there is one.
        column: Option<usize>,
    },
}

impl QueryError {
    /// Creates a recognition error at a character offset of `text`.
    pub fn recognition(text: impl Into<String>, offset: usize) -> Self {
        Self::Recognition {
            text: text.into(),
            offset,
        }
    }

    /// Creates a semantic error that is not tied to a token, such as an end-of-input check.
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::Semantic {
            message: message.into(),
            column: None,
        }
    }

    /// Creates a semantic error pointing at a token column.
    pub fn semantic_at(message: impl Into<String>, column: usize) -> Self {
        Self::Semantic {
            message: message.into(),
            column: Some(column),
        }
    }

    /// Returns the error message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Recognition { .. } => self.to_string(),
            Self::Semantic { message, .. } => message.clone(),
        }
    }

    /// Returns the column the error points at, if known.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Recognition { offset, .. } => Some(*offset),
            Self::Semantic { column, .. } => *column,
        }
    }

    /// Returns true for errors raised by the tokenizer.
    pub fn is_recognition(&self) -> bool {
        matches!(self, Self::Recognition { .. })
    }

    /// Formats the error with the query and a caret under the offending column.
    ///
    /// `query` is used for semantic errors, which do not carry the source text themselves.
    /// Recognition errors always render their own text.
    pub fn format_with_context(&self, query: &str) -> String {
        let source = match self {
            Self::Recognition { text, .. } => text.as_str(),
            Self::Semantic { .. } => query,
        };

        let mut result = String::new();
        result.push_str(&format!("{self}\n"));
        result.push_str(&format!("  {source}"));
        if let Some(column) = self.column() {
            let clamped = column.min(source.chars().count());
            result.push_str(&format!("\n  {}^", " ".repeat(clamped)));
        }
        result
    }
}
