//! Implementation of `qs check`.

use std::process::ExitCode;

use qs_query::{QueryError, parse};

use crate::cli::{
    args::CheckCommand,
    context::CommandContext,
    output::{render_check_json, render_error},
};

/// Validates each query, reporting every failure.
///
/// Exits with failure if any query does not parse.
pub fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    let results: Vec<(&str, Result<(), QueryError>)> = cmd
        .queries
        .iter()
        .map(|query| (query.as_str(), parse(query).map(|_| ())))
        .collect();
    let failures = results.iter().filter(|(_, r)| r.is_err()).count();

    if cmd.json {
        match render_check_json(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else if !cmd.quiet {
        for (query, result) in &results {
            match result {
                Ok(()) => println!("{} {query}", ctx.paint.success("ok")),
                Err(e) => eprintln!("{}", render_error(e, query, &ctx.paint)),
            }
        }
        if failures > 0 {
            eprintln!(
                "{}",
                ctx.paint
                    .warning(&format!("{failures} of {} queries failed", cmd.queries.len()))
            );
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
