//! Syntax highlighting and terminal colors for qs.
//!
//! [`Highlighter`] colors TOML and JSON documents for the terminal. [`Paint`] styles the
//! smaller pieces of CLI output (query keywords, values, status lines) and turns into a
//! no-op when color is disabled.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and JSON.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content, as printed by `qs config`.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights a JSON document, as printed by `qs parse --json`.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the given syntax, looked up by extension then by name.
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text.
    pub const RED: &str = "\x1b[31m";
    /// Magenta text.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim/gray text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Styles short pieces of terminal output.
///
/// A disabled `Paint` returns its input unchanged, so callers can style unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    /// Whether ANSI codes are emitted.
    enabled: bool,
}

impl Paint {
    /// Creates a painter; `enabled = false` produces plain text.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns true if ANSI codes are emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps `text` in the given codes when enabled.
    fn wrap(&self, codes: &[&str], text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = codes.concat();
        out.push_str(text);
        out.push_str(colors::RESET);
        out
    }

    /// Dimmed, less important text.
    pub fn dim(&self, text: &str) -> String {
        self.wrap(&[colors::DIM], text)
    }

    /// Success message (green).
    pub fn success(&self, text: &str) -> String {
        self.wrap(&[colors::GREEN], text)
    }

    /// Warning (yellow).
    pub fn warning(&self, text: &str) -> String {
        self.wrap(&[colors::YELLOW], text)
    }

    /// Error (bold red).
    pub fn error(&self, text: &str) -> String {
        self.wrap(&[colors::BOLD, colors::RED], text)
    }

    /// Query keyword such as `AND`, `OR` or `NOT`.
    pub fn keyword(&self, text: &str) -> String {
        self.wrap(&[colors::BOLD, colors::MAGENTA], text)
    }

    /// Comparison value.
    pub fn value(&self, text: &str) -> String {
        self.wrap(&[colors::GREEN], text)
    }
}
