//! Implementation of `qs tokens`.

use std::process::ExitCode;

use qs_query::{TokenKind, tokenize};

use crate::cli::{
    args::TokensCommand,
    context::CommandContext,
    output::{render_error, render_tokens_json, render_tokens_table},
};

/// Prints the token stream for a query.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let mut tokens = match tokenize(&cmd.query) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", render_error(&e, &cmd.query, &ctx.paint));
            return ExitCode::FAILURE;
        }
    };
    if !cmd.keep_whitespace {
        tokens.retain(|t| !t.is(TokenKind::Whitespace));
    }

    if cmd.json {
        match render_tokens_json(&cmd.query, &tokens) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", render_tokens_table(&tokens, &ctx.paint));
    }
    ExitCode::SUCCESS
}
