//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use qs_config::Config;
use qs_highlight::{Highlighter, Paint};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Styling for short output fragments.
    pub paint: Paint,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    ///
    /// `no_color` forces plain output regardless of `output.color`.
    pub fn load(no_color: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        let paint = Paint::new(config.output.color && !no_color);
        Ok(Self { cwd, config, paint })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(no_color: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            paint: Paint::new(!no_color),
        })
    }

    /// Returns a syntax highlighter when color is enabled.
    pub fn highlighter(&self) -> Option<Highlighter> {
        self.paint.enabled().then(Highlighter::new)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
