//! Query abstract syntax tree.
//!
//! Parsed queries are trees of [`Node`]s rooted at a [`Node::Logical`]. The serialized shape is a
//! map keyed by `operator` (`and`, `or`, `not`, `comparison`), which is what the CLI prints and
//! what [`Node`] deserializes from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::QueryError, lexer::is_word_char};

/// Operator of a logical node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Every child must match.
    And,
    /// At least one child must match.
    Or,
}

impl LogicalOp {
    /// Returns the serialized name (`and` or `or`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Returns the keyword as written in queries.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOp {
    type Err = QueryError;

    /// Parses `and`/`or` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(QueryError::semantic(format!(
                "Unknown logical operator [{s}]"
            )))
        }
    }
}

/// A parsed query node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NodeRepr", try_from = "NodeRepr")]
pub enum Node {
    /// Field `key` equals `value`.
    Comparison {
        /// Field name.
        key: String,
        /// Literal value.
        value: String,
    },

    /// Children combined under one operator, in source order.
    Logical {
        /// The combining operator.
        op: LogicalOp,
        /// Child nodes. Never empty in a parsed tree.
        children: Vec<Self>,
    },

    /// Logical complement of the child.
    Negation {
        /// The negated node.
        child: Box<Self>,
    },
}

impl Node {
    /// Creates a comparison leaf.
    pub fn comparison(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Comparison {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a logical node.
    pub fn logical(op: LogicalOp, children: Vec<Self>) -> Self {
        Self::Logical { op, children }
    }

    /// Creates an AND node.
    pub fn and(children: Vec<Self>) -> Self {
        Self::logical(LogicalOp::And, children)
    }

    /// Creates an OR node.
    pub fn or(children: Vec<Self>) -> Self {
        Self::logical(LogicalOp::Or, children)
    }

    /// Wraps a node in a negation.
    pub fn negate(child: Self) -> Self {
        Self::Negation {
            child: Box::new(child),
        }
    }

    /// Returns the serialized operator name of this node.
    pub fn operator(&self) -> &'static str {
        match self {
            Self::Comparison { .. } => "comparison",
            Self::Logical { op, .. } => op.as_str(),
            Self::Negation { .. } => "not",
        }
    }

    /// Returns the children of a logical node, or an empty slice for other nodes.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Logical { children, .. } => children,
            Self::Comparison { .. } | Self::Negation { .. } => &[],
        }
    }

    /// Counts the comparison leaves in this tree.
    pub fn comparison_count(&self) -> usize {
        match self {
            Self::Comparison { .. } => 1,
            Self::Logical { children, .. } => children.iter().map(Self::comparison_count).sum(),
            Self::Negation { child } => child.comparison_count(),
        }
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Comparison { key, value } => writeln!(f, "{prefix}Comparison({key:?}, {value:?})"),
            Self::Logical { op, children } => {
                let name = match op {
                    LogicalOp::And => "And",
                    LogicalOp::Or => "Or",
                };
                writeln!(f, "{prefix}{name}")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Negation { child } => {
                writeln!(f, "{prefix}Not")?;
                child.fmt_tree(f, indent + 1)
            }
        }
    }

    /// Renders the node back into query syntax.
    ///
    /// Nested logical nodes are parenthesized, so parsing the output reproduces the same tree:
    /// `or(and(a, b), c)` prints as `(k:a AND k:b) OR k:c`.
    ///
    /// `NOT` cannot follow `NOT` directly, so a negated negation prints as `NOT (NOT k:a)`,
    /// which parses back as an equivalent tree with an AND group in between. Comparisons with
    /// an empty key or value have no query form and print as `""`.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Comparison { key, value } => format!("{}:{}", quote(key), quote(value)),
            Self::Logical { op, children } => {
                let separator = format!(" {} ", op.keyword());
                children
                    .iter()
                    .map(Self::fmt_operand)
                    .collect::<Vec<_>>()
                    .join(&separator)
            }
            Self::Negation { child } => match child.as_ref() {
                Self::Negation { .. } => format!("NOT ({})", child.to_query_string()),
                _ => format!("NOT {}", child.fmt_operand()),
            },
        }
    }

    /// Renders a node in operand position, grouping logical nodes.
    fn fmt_operand(&self) -> String {
        match self {
            Self::Logical { .. } => format!("({})", self.to_query_string()),
            Self::Comparison { .. } | Self::Negation { .. } => self.to_query_string(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Quotes text unless it would tokenize back as a single bare word.
fn quote(text: &str) -> String {
    let keyword_prefix = ["AND", "OR", "NOT"]
        .iter()
        .any(|keyword| text.starts_with(keyword));
    let bare = !text.is_empty() && !keyword_prefix && text.chars().all(is_word_char);
    if bare {
        return text.to_string();
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Serialized form of [`Node`].
#[derive(Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "lowercase")]
enum NodeRepr {
    /// A comparison leaf.
    Comparison {
        /// Field name.
        key: String,
        /// Literal value.
        value: String,
    },
    /// An AND node.
    And {
        /// Child nodes.
        children: Vec<Node>,
    },
    /// An OR node.
    Or {
        /// Child nodes.
        children: Vec<Node>,
    },
    /// A negation.
    Not {
        /// The negated node.
        child: Box<Node>,
    },
}

impl From<Node> for NodeRepr {
    fn from(node: Node) -> Self {
        match node {
            Node::Comparison { key, value } => Self::Comparison { key, value },
            Node::Logical {
                op: LogicalOp::And,
                children,
            } => Self::And { children },
            Node::Logical {
                op: LogicalOp::Or,
                children,
            } => Self::Or { children },
            Node::Negation { child } => Self::Not { child },
        }
    }
}

impl TryFrom<NodeRepr> for Node {
    type Error = String;

    fn try_from(repr: NodeRepr) -> Result<Self, Self::Error> {
        let (op, children) = match repr {
            NodeRepr::Comparison { key, value } => {
                if key.is_empty() || value.is_empty() {
                    return Err("comparison key and value must not be empty".to_string());
                }
                return Ok(Self::Comparison { key, value });
            }
            NodeRepr::Not { child } => return Ok(Self::Negation { child }),
            NodeRepr::And { children } => (LogicalOp::And, children),
            NodeRepr::Or { children } => (LogicalOp::Or, children),
        };

        if children.is_empty() {
            return Err(format!("{op} node has no children"));
        }
        Ok(Self::Logical { op, children })
    }
}
