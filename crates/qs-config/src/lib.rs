//! Configuration system for qs.
//!
//! qs uses TOML configuration files named `.qs.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.qs.toml` files found,
//! then loading `~/.qs.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config,
    require_global_config_path,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawLogSettings, RawOutputSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for qs.
///
/// This represents the fully resolved configuration after merging all discovered `.qs.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output settings.
    pub output: OutputSettings,
    /// Logging settings.
    pub log: LogSettings,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.qs.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.qs.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.qs.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Log levels that are not a known filter level
    /// - `pretty` being set while the output format is not JSON
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.qs.toml` file, without the `root` key.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            output: &self.output,
            log: &self.log,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// How a parsed query tree is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented operator tree.
    #[default]
    Tree,
    /// JSON document.
    Json,
    /// Canonical query string.
    Query,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tree => "tree",
            Self::Json => "json",
            Self::Query => "query",
        })
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default format for `qs parse`.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Use ANSI colors and highlighting.
    pub color: bool,
    /// Whether `pretty` was set explicitly by a config file.
    #[serde(skip)]
    pub pretty_explicit: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tree,
            pretty: true,
            color: true,
            pretty_explicit: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive used when `RUST_LOG` and `-v` are absent.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Output settings.
    output: &'a OutputSettings,
    /// Logging settings.
    log: &'a LogSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults() {
        let output = OutputSettings::default();
        assert_eq!(output.format, OutputFormat::Tree);
        assert!(output.pretty);
        assert!(output.color);
        assert!(!output.pretty_explicit);
    }

    #[test]
    fn test_log_defaults() {
        assert_eq!(LogSettings::default().level, "warn");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Tree.to_string(), "tree");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Query.to_string(), "query");
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::default();
        let toml = config.settings_to_toml().unwrap();

        assert!(toml.contains("[output]"));
        assert!(toml.contains("[log]"));
        assert!(toml.contains("format = \"tree\""));
        assert!(toml.contains("pretty = true"));
        assert!(toml.contains("level = \"warn\""));
        assert!(!toml.contains("pretty_explicit"));

        let parsed = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(parsed.output.unwrap().format, Some(OutputFormat::Tree));
    }
}
