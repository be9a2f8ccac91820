//! Clap argument definitions for the `qs` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use qs_config::OutputFormat;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "qs")]
#[command(about = "Query Syntax - parse and inspect field queries")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Mutually exclusive output format flags for `qs parse`.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(multiple = false)]
pub struct FormatArgs {
    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the tree as an indented outline
    #[arg(long)]
    pub tree: bool,

    /// Print the canonical query string
    #[arg(long = "query", id = "canonical_query")]
    pub query: bool,
}

impl FormatArgs {
    /// Returns the format selected on the command line, if any.
    pub fn selected(self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else if self.tree {
            Some(OutputFormat::Tree)
        } else if self.query {
            Some(OutputFormat::Query)
        } else {
            None
        }
    }
}

/// Arguments for `qs parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    pub query: String,

    #[command(flatten)]
    /// Output format override.
    pub format: FormatArgs,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `qs tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to tokenize
    pub query: String,

    /// Output tokens as JSON
    #[arg(long)]
    pub json: bool,

    /// Include whitespace tokens
    #[arg(long)]
    pub keep_whitespace: bool,
}

/// Arguments for `qs check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Queries to validate
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Only set the exit code, print nothing
    #[arg(short = 'q', long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print one JSON result per query
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `qs init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.qs.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `qs` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print its tree
    #[command(after_help = "\
QUERY SYNTAX:
  field:value          Comparison
  field:\"two words\"    Quoted value (C-style escapes)
  a:1 AND b:2          Both must hold
  a:1 OR b:2           Either holds
  NOT a:1              Negation
  (expr)               Grouping

Operators have no precedence: a:1 AND b:2 OR c:3 groups as (a:1 AND b:2) OR c:3.

EXAMPLES:
  qs parse 'director:spielberg'
  qs parse --json 'genre:scifi OR genre:horror'
  qs parse --query 'NOT (a:1 AND b:2)'")]
    Parse(ParseCommand),

    /// Show the token stream for a query
    Tokens(TokensCommand),

    /// Validate one or more queries
    Check(CheckCommand),

    /// Show effective configuration settings
    Config,

    /// Initialize qs configuration in current directory
    Init(InitCommand),
}

/// Parses CLI arguments, exiting with usage information on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flags_are_exclusive() {
        let result = Cli::try_parse_from(["qs", "parse", "--json", "--tree", "a:1"]);
        assert!(result.is_err());
    }

    #[test]
    fn format_selection() {
        let cli = Cli::try_parse_from(["qs", "parse", "--query", "a:1"]).unwrap();
        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(cmd.format.selected(), Some(OutputFormat::Query));
        assert_eq!(FormatArgs::default().selected(), None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["qs", "tokens", "a:1", "-vv", "--no-color"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn check_json_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["qs", "check", "--json", "--quiet", "a:1"]).is_err());
    }

    #[test]
    fn check_requires_a_query() {
        assert!(Cli::try_parse_from(["qs", "check"]).is_err());
    }
}
