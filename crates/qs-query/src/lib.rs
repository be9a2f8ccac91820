//! Tokenizer, parser and AST for the qs field query syntax.
//!
//! Queries are `field:value` comparisons combined with `AND`, `OR`, `NOT` and parentheses:
//!
//! - **Comparisons**: `director:spielberg`, or quoted: `director:"Steven Spielberg"`
//! - **Operators**: `a:1 AND b:2`, `a:1 OR b:2` (keywords are upper case)
//! - **Negation**: `NOT a:1`, `NOT (a:1 OR b:2)`
//! - **Grouping**: `a:1 AND (b:2 OR c:3)`
//!
//! There is no operator precedence. Grouping follows the order operators appear in:
//! `a:1 AND b:2 OR c:3` is `(a:1 AND b:2) OR c:3`.
//!
//! # Example
//!
//! ```
//! use qs_query::{Node, parse};
//!
//! let tree = parse("director:\"Steven Spielberg\" AND (genre:scifi OR genre:horror)").unwrap();
//! assert_eq!(
//!     tree,
//!     Node::and(vec![
//!         Node::comparison("director", "Steven Spielberg"),
//!         Node::or(vec![
//!             Node::comparison("genre", "scifi"),
//!             Node::comparison("genre", "horror"),
//!         ]),
//!     ])
//! );
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;
mod source;

pub use ast::{LogicalOp, Node};
pub use error::QueryError;
pub use lexer::{Token, TokenKind, Tokenizer, tokenize};
pub use parser::{MAX_DEPTH, parse, parse_source};
pub use source::{ScriptedSource, SkipWhitespace, TokenSource};
