//! Rendering and JSON serialization for CLI output.

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use qs_config::OutputFormat;
use qs_highlight::{Highlighter, Paint};
use qs_query::{Node, QueryError, Token, TokenKind};
use serde::Serialize;

/// JSON output for `qs tokens --json`.
#[derive(Serialize)]
struct JsonTokens<'a> {
    /// The original query string.
    query: &'a str,
    /// Tokens in input order.
    tokens: &'a [Token],
}

/// JSON output for a single `qs check` result.
#[derive(Serialize)]
struct JsonCheckResult<'a> {
    /// The query that was checked.
    query: &'a str,
    /// Whether the query parsed.
    valid: bool,
    /// Error message for invalid queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Column of the error, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
}

/// Serializes a value as JSON, pretty or on one line.
fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Renders a parsed tree in the requested format.
///
/// The result always ends with a newline.
pub fn render_node(
    node: &Node,
    format: OutputFormat,
    pretty: bool,
    highlighter: Option<&Highlighter>,
) -> Result<String, serde_json::Error> {
    let out = match format {
        OutputFormat::Tree => node.to_string(),
        OutputFormat::Query => format!("{}\n", node.to_query_string()),
        OutputFormat::Json => {
            let json = format!("{}\n", to_json(node, pretty)?);
            match highlighter {
                Some(hl) => hl.highlight_json(&json),
                None => json,
            }
        }
    };
    Ok(out)
}

/// Renders tokens as a JSON document.
pub fn render_tokens_json(query: &str, tokens: &[Token]) -> Result<String, serde_json::Error> {
    to_json(&JsonTokens { query, tokens }, true)
}

/// Renders `qs check` results as a JSON array, one entry per query.
pub fn render_check_json(
    results: &[(&str, Result<(), QueryError>)],
) -> Result<String, serde_json::Error> {
    let entries: Vec<JsonCheckResult<'_>> = results
        .iter()
        .map(|(query, result)| match result {
            Ok(()) => JsonCheckResult {
                query,
                valid: true,
                error: None,
                column: None,
            },
            Err(e) => JsonCheckResult {
                query,
                valid: false,
                error: Some(e.to_string()),
                column: e.column(),
            },
        })
        .collect();
    to_json(&entries, true)
}

/// Styles token text according to its kind.
fn styled_text(token: &Token, paint: &Paint) -> String {
    let shown = if token.is(TokenKind::Whitespace) {
        format!("{:?}", token.text)
    } else {
        token.text.clone()
    };
    match token.kind {
        TokenKind::LogicalOperator | TokenKind::Negator => paint.keyword(&shown),
        TokenKind::Text => paint.value(&shown),
        TokenKind::Whitespace => paint.dim(&shown),
        TokenKind::OpenGroup | TokenKind::CloseGroup | TokenKind::Comparator => shown,
    }
}

/// Renders tokens as a table with column, kind and text.
pub fn render_tokens_table(tokens: &[Token], paint: &Paint) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Column", "Kind", "Text"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(token.column.to_string()),
            Cell::new(token.kind.to_string()),
            Cell::new(styled_text(token, paint)),
        ]);
    }
    table.to_string()
}

/// Formats a query error for stderr, with the query and a caret under the column.
pub fn render_error(err: &QueryError, query: &str, paint: &Paint) -> String {
    let report = err.format_with_context(query);
    let mut lines = report.lines();
    let mut out = String::new();
    if let Some(first) = lines.next() {
        out.push_str(&format!("{} {first}", paint.error("error:")));
    }
    for line in lines {
        out.push('\n');
        if line.trim_end().ends_with('^') {
            out.push_str(&paint.error(line));
        } else {
            out.push_str(line);
        }
    }
    out
}
