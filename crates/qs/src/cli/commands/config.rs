//! Implementation of `qs config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows the config files in effect, the merged settings and any warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let paint = &ctx.paint;

    let toml = match config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.sources.is_empty() {
        println!("{}", paint.dim("# no configuration files found, showing defaults"));
    } else {
        for path in &config.sources {
            println!("{}", paint.dim(&format!("# {}", path.display())));
        }
    }

    match ctx.highlighter() {
        Some(hl) => print!("{}", hl.highlight_toml(&toml)),
        None => print!("{toml}"),
    }

    for warning in config.validate() {
        eprintln!("{} {warning}", paint.warning("warning:"));
    }
    ExitCode::SUCCESS
}
