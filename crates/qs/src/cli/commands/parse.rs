//! Implementation of `qs parse`.

use std::process::ExitCode;

use qs_query::parse;
use tracing::debug;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{render_error, render_node},
};

/// Parses a query and prints the resulting tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let node = match parse(&cmd.query) {
        Ok(node) => node,
        Err(e) => {
            eprintln!("{}", render_error(&e, &cmd.query, &ctx.paint));
            return ExitCode::FAILURE;
        }
    };
    debug!(comparisons = node.comparison_count(), "parsed query");

    let format = cmd.format.selected().unwrap_or(ctx.config.output.format);
    let pretty = ctx.config.output.pretty && !cmd.compact;
    let highlighter = ctx.highlighter();

    match render_node(&node, format, pretty, highlighter.as_ref()) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
