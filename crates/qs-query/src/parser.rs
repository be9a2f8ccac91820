//! Query parser.
//!
//! Builds the tree one token at a time. There is no precedence table: the first logical
//! operator seen in a group fixes that group's operator, and a different operator later in the
//! same group regroups everything accumulated so far one level down. `a AND b OR c` therefore
//! parses as `(a AND b) OR c`, and `a OR b AND c` as `(a OR b) AND c`.
//!
//! Open groups live on an explicit stack. The top of the stack is the cursor that receives new
//! children; closing a group pops it and appends the finished node to the group below.
//!
//! # Adjacency
//!
//! Each token restricts what may come right after it:
//!
//! | Just consumed     | Forbidden next                | Required next       |
//! |-------------------|-------------------------------|---------------------|
//! | `(`               | `:`                           |                     |
//! | `)`               | `(`                           |                     |
//! | comparison        | text                          |                     |
//! | `AND` / `OR`      | `AND` / `OR`, `)`             |                     |
//! | `NOT`             |                               | `(`, text           |
//!
//! Whitespace tokens are transparent: they neither satisfy nor reset these rules.
//!
//! # Depth
//!
//! Trees are at most [`MAX_DEPTH`] nodes tall. Both parentheses and operator regrouping add
//! levels, so the limit is checked whenever a group is opened, regrouped or closed.

use std::mem;

use tracing::{debug, trace};

use crate::{
    ast::{LogicalOp, Node},
    error::QueryError,
    lexer::{Token, TokenKind, Tokenizer},
    source::{SkipWhitespace, TokenSource},
};

/// Kinds forbidden after `(`.
const AFTER_OPEN_GROUP: &[TokenKind] = &[TokenKind::Comparator];
/// Kinds forbidden after `)`.
const AFTER_CLOSE_GROUP: &[TokenKind] = &[TokenKind::OpenGroup];
/// Kinds forbidden after a complete comparison.
const AFTER_COMPARISON: &[TokenKind] = &[TokenKind::Text];
/// Kinds forbidden after `AND` / `OR`.
const AFTER_LOGICAL_OPERATOR: &[TokenKind] =
    &[TokenKind::LogicalOperator, TokenKind::CloseGroup];
/// Kinds required after `NOT`.
const NEGATABLE: &[TokenKind] = &[TokenKind::OpenGroup, TokenKind::Text];

/// Tallest tree the parser builds, counted in nodes from the root to a leaf.
pub const MAX_DEPTH: usize = 256;

/// Error for a tree that would exceed [`MAX_DEPTH`].
fn too_deep(column: Option<usize>) -> QueryError {
    let message = format!("Query is nested too deeply (limit is {MAX_DEPTH} levels)");
    match column {
        Some(column) => QueryError::semantic_at(message, column),
        None => QueryError::semantic(message),
    }
}

/// A group that is still accepting children.
#[derive(Debug, Default)]
struct Group {
    /// Operator fixed by the first logical operator in the group.
    op: Option<LogicalOp>,
    /// Children accumulated so far.
    children: Vec<Node>,
    /// Whether the group was opened directly after `NOT`.
    negated: bool,
    /// Height of the tallest child.
    height: usize,
}

impl Group {
    /// Appends a child of the given height.
    fn push(&mut self, node: Node, height: usize) {
        self.height = self.height.max(height);
        self.children.push(node);
    }

    /// Height of the node this group closes into.
    fn node_height(&self) -> usize {
        self.height + 1 + usize::from(self.negated)
    }

    /// Closes the group into a node. A group with no operator defaults to AND.
    fn into_node(self) -> Node {
        let node = Node::logical(self.op.unwrap_or(LogicalOp::And), self.children);
        if self.negated {
            Node::negate(node)
        } else {
            node
        }
    }
}

/// Parse state for a single call. Never reused across calls.
struct Parser<'s, S: ?Sized> {
    /// Where tokens come from.
    source: &'s mut S,
    /// Open groups; the root is at the bottom and the cursor at the top.
    stack: Vec<Group>,
    /// Kinds the next significant token must not have.
    forbidden: &'static [TokenKind],
    /// Kinds the next significant token must have, when non-empty.
    required: &'static [TokenKind],
    /// Set by `NOT`; the next group or comparison is negated.
    negate_next: bool,
    /// Kind of the last significant token.
    last: Option<TokenKind>,
}

impl<'s, S: TokenSource + ?Sized> Parser<'s, S> {
    /// Creates a parser with a fresh operator-less root.
    fn new(source: &'s mut S) -> Self {
        Self {
            source,
            stack: vec![Group::default()],
            forbidden: &[],
            required: &[],
            negate_next: false,
            last: None,
        }
    }

    /// Consumes the whole source and returns the root node.
    fn parse(mut self) -> Result<Node, QueryError> {
        while let Some(token) = self.source.next()? {
            self.dispatch(token)?;
        }
        self.finish()
    }

    /// Number of groups opened and not yet closed.
    fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// The group currently receiving children.
    fn cursor(&mut self) -> &mut Group {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Handles one token.
    fn dispatch(&mut self, token: Token) -> Result<(), QueryError> {
        if token.is(TokenKind::Whitespace) {
            return Ok(());
        }

        trace!(kind = %token.kind, column = token.column, text = %token.text, "token");
        self.check_adjacency(&token)?;
        self.last = Some(token.kind);

        match token.kind {
            TokenKind::Whitespace => {}
            TokenKind::OpenGroup => self.open_group(&token)?,
            TokenKind::CloseGroup => self.close_group(&token)?,
            TokenKind::Text => self.comparison(token)?,
            TokenKind::LogicalOperator => self.logical_operator(&token)?,
            TokenKind::Negator => {
                self.required = NEGATABLE;
                self.negate_next = true;
            }
            TokenKind::Comparator => {
                return Err(QueryError::semantic_at(
                    format!("Unexpected token [{}].", token.kind),
                    token.column,
                ));
            }
        }

        Ok(())
    }

    /// Enforces the bigram rules set by the previous token, then clears them.
    fn check_adjacency(&mut self, token: &Token) -> Result<(), QueryError> {
        if !self.required.is_empty() && !self.required.contains(&token.kind) {
            return Err(QueryError::semantic_at(
                format!(
                    "Unexpected token [{}]. Expected [{}].",
                    token.kind,
                    kind_list(self.required)
                ),
                token.column,
            ));
        }

        if self.forbidden.contains(&token.kind) {
            return Err(QueryError::semantic_at(
                format!("Unexpected token [{}].", token.kind),
                token.column,
            ));
        }

        self.required = &[];
        self.forbidden = &[];
        Ok(())
    }

    /// Opens a group and makes it the cursor.
    fn open_group(&mut self, token: &Token) -> Result<(), QueryError> {
        // The root, each open group and a leaf each take a level.
        if self.depth() + 3 > MAX_DEPTH {
            return Err(too_deep(Some(token.column)));
        }

        let negated = mem::take(&mut self.negate_next);
        self.stack.push(Group {
            negated,
            ..Group::default()
        });
        self.forbidden = AFTER_OPEN_GROUP;
        debug!(depth = self.depth(), negated, "open group");
        Ok(())
    }

    /// Closes the cursor group and appends it to the enclosing group.
    fn close_group(&mut self, token: &Token) -> Result<(), QueryError> {
        if self.depth() == 0 {
            return Err(QueryError::semantic_at(
                "There are too many closed parenthesis",
                token.column,
            ));
        }

        let group = self.stack.pop().ok_or_else(|| {
            QueryError::semantic_at("There are too many closed parenthesis", token.column)
        })?;
        if group.children.is_empty() {
            return Err(QueryError::semantic_at("Empty group", token.column));
        }

        let height = group.node_height();
        if height > MAX_DEPTH {
            return Err(too_deep(Some(token.column)));
        }

        let node = group.into_node();
        debug!(depth = self.depth(), operator = node.operator(), "close group");
        self.cursor().push(node, height);
        self.forbidden = AFTER_CLOSE_GROUP;
        Ok(())
    }

    /// Reads `key : value` starting at the key token and appends the comparison.
    fn comparison(&mut self, key: Token) -> Result<(), QueryError> {
        self.expect(TokenKind::Comparator)?;
        let value = self.expect(TokenKind::Text)?;

        let node = Node::comparison(key.text, value.text);
        let (node, height) = if mem::take(&mut self.negate_next) {
            (Node::negate(node), 2)
        } else {
            (node, 1)
        };

        self.cursor().push(node, height);
        self.forbidden = AFTER_COMPARISON;
        Ok(())
    }

    /// Pulls the next significant token and requires it to have `kind`.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, QueryError> {
        match self.next_significant()? {
            Some(token) if token.is(kind) => Ok(token),
            Some(token) => Err(QueryError::semantic_at(
                format!("Expected [{kind}] token, but received [{}]", token.kind),
                token.column,
            )),
            None => Err(QueryError::semantic(format!(
                "Expected [{kind}] token, but reached the end of text"
            ))),
        }
    }

    /// Pulls tokens until one that is not whitespace.
    fn next_significant(&mut self) -> Result<Option<Token>, QueryError> {
        loop {
            match self.source.next()? {
                Some(token) if token.is(TokenKind::Whitespace) => continue,
                other => return Ok(other),
            }
        }
    }

    /// Applies `AND` / `OR` to the cursor group, regrouping if the operator changes.
    fn logical_operator(&mut self, token: &Token) -> Result<(), QueryError> {
        let op: LogicalOp = token.text.parse().map_err(|_| {
            QueryError::semantic_at(
                format!("Unknown logical operator [{}]", token.text),
                token.column,
            )
        })?;

        let group = self.cursor();
        if group.children.is_empty() {
            return Err(QueryError::semantic_at(
                format!(
                    "Unexpected token [{}]. Expected an operand before it.",
                    token.kind
                ),
                token.column,
            ));
        }

        match group.op {
            None => group.op = Some(op),
            Some(current) if current == op => {}
            Some(current) => {
                if group.node_height() + 1 > MAX_DEPTH {
                    return Err(too_deep(Some(token.column)));
                }
                let previous = mem::take(&mut group.children);
                group.height += 1;
                group.children.push(Node::logical(current, previous));
                group.op = Some(op);
                debug!(from = %current, to = %op, "regroup");
            }
        }

        self.forbidden = AFTER_LOGICAL_OPERATOR;
        Ok(())
    }

    /// Runs the end-of-input checks and returns the root.
    fn finish(mut self) -> Result<Node, QueryError> {
        if self.negate_next {
            return Err(QueryError::semantic(format!(
                "Unexpected end of text. Expected [{}].",
                kind_list(NEGATABLE)
            )));
        }

        if self.last == Some(TokenKind::LogicalOperator) {
            return Err(QueryError::semantic(
                "Unexpected end of text after a logical operator",
            ));
        }

        if self.depth() > 0 {
            return Err(QueryError::semantic("There are unclosed parenthesis"));
        }

        let root = self.stack.pop().unwrap_or_default();
        if root.children.is_empty() {
            return Err(QueryError::semantic("Empty query"));
        }
        if root.node_height() > MAX_DEPTH {
            return Err(too_deep(None));
        }

        Ok(root.into_node())
    }
}

/// Formats a kind set as `A, B`.
fn kind_list(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses every token from `source` into a tree.
///
/// The source is consumed to exhaustion (or to the first error). Whitespace tokens are
/// tolerated, so a raw [`Tokenizer`] works as well as a [`SkipWhitespace`] wrapper.
pub fn parse_source<S: TokenSource + ?Sized>(source: &mut S) -> Result<Node, QueryError> {
    Parser::new(source).parse()
}

/// Parses a query string into a tree.
///
/// The result is always a logical node. A query without any operator is an AND. Queries
/// nested deeper than [`MAX_DEPTH`] are rejected.
pub fn parse(input: &str) -> Result<Node, QueryError> {
    let mut source = SkipWhitespace::new(Tokenizer::new(input));
    parse_source(&mut source)
}
