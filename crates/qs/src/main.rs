//! Command-line interface for the `qs` query tool.

use std::process::ExitCode;

use qs::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();

    // init must work even when an existing config is broken
    let loaded = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only(cli.no_color)
    } else {
        CommandContext::load(cli.no_color)
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    logging::init_logging(cli.verbose, &ctx.config.log.level, ctx.paint.enabled());
    tracing::debug!(
        cwd = %ctx.cwd.display(),
        config_files = ctx.config.sources.len(),
        "starting"
    );

    commands::run(cli.command, &ctx)
}
