//! Configuration file parsing.
//!
//! Parses individual `.qs.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Output settings section.
    pub output: Option<RawOutputSettings>,
    /// Logging settings section.
    pub log: Option<RawLogSettings>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// How parsed trees are printed.
    pub format: Option<OutputFormat>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Use ANSI colors and highlighting.
    pub color: Option<bool>,
}

/// Raw logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLogSettings {
    /// Default log filter directive.
    pub level: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.output.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn test_parse_full_output() {
        let toml = r#"
[output]
format = "json"
pretty = false
color = false
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let output = config.output.unwrap();
        assert_eq!(output.format, Some(OutputFormat::Json));
        assert_eq!(output.pretty, Some(false));
        assert_eq!(output.color, Some(false));
    }

    #[test]
    fn test_parse_partial_output() {
        let toml = r#"
[output]
format = "query"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let output = config.output.unwrap();
        assert_eq!(output.format, Some(OutputFormat::Query));
        assert!(output.pretty.is_none());
        assert!(output.color.is_none());
    }

    #[test]
    fn test_parse_log_level() {
        let toml = r#"
[log]
level = "debug"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.log.unwrap().level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_root_flag() {
        let config = parse_config_str("root = true\n", Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
    }

    #[test]
    fn test_parse_unknown_format_fails() {
        let toml = r#"
[output]
format = "yaml"
"#;
        let err = parse_config_str(toml, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_invalid_toml_fails() {
        let err = parse_config("[output\nformat = ").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/.qs.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
