//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules.

use std::path::PathBuf;

use crate::{
    Config, LogSettings, OutputSettings,
    parse::{RawConfig, RawLogSettings, RawOutputSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every field the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let mut output = OutputSettings::default();
    let mut log = LogSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.output {
            apply_raw_output(&mut output, raw);
        }
        if let Some(ref raw) = parsed.config.log {
            apply_raw_log(&mut log, raw);
        }
    }

    Config {
        output,
        log,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Applies raw output settings to result, overwriting any present values.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.format {
        result.format = v;
    }
    if let Some(v) = raw.pretty {
        result.pretty = v;
        result.pretty_explicit = true;
    }
    if let Some(v) = raw.color {
        result.color = v;
    }
}

/// Applies raw log settings to result.
fn apply_raw_log(result: &mut LogSettings, raw: &RawLogSettings) {
    if let Some(ref v) = raw.level {
        result.level.clone_from(v);
    }
}
