//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::{Config, OutputFormat};

/// Log levels accepted as a bare `log.level` value.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `log.level` is not a known level or filter directive.
    InvalidLogLevel {
        /// The configured value.
        level: String,
    },
    /// `output.pretty` was set but the output format is not JSON.
    PrettyIgnored {
        /// The configured output format.
        format: OutputFormat,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLogLevel { level } => {
                write!(f, "log level '{level}' is not one of {}", LOG_LEVELS.join(", "))
            }
            Self::PrettyIgnored { format } => {
                write!(f, "output.pretty has no effect with format '{format}'")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !is_valid_level(&config.log.level) {
        warnings.push(ConfigWarning::InvalidLogLevel {
            level: config.log.level.clone(),
        });
    }

    if config.output.pretty_explicit && config.output.format != OutputFormat::Json {
        warnings.push(ConfigWarning::PrettyIgnored {
            format: config.output.format,
        });
    }

    warnings
}

/// Accepts a bare level or a comma-separated list of `target=level` directives.
fn is_valid_level(level: &str) -> bool {
    let level = level.trim();
    if level.is_empty() {
        return false;
    }
    level.split(',').all(|directive| {
        let lvl = directive
            .rsplit_once('=')
            .map_or(directive, |(_, lvl)| lvl)
            .trim();
        LOG_LEVELS.contains(&lvl.to_ascii_lowercase().as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.log.level = "loud".into();
        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![ConfigWarning::InvalidLogLevel {
                level: "loud".into()
            }]
        );
        assert!(warnings[0].to_string().contains("'loud'"));
    }

    #[test]
    fn test_directive_log_level_accepted() {
        let mut config = Config::default();
        config.log.level = "qs_query=trace,warn".into();
        assert!(validate_config(&config).is_empty());

        config.log.level = "DEBUG".into();
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_empty_log_level_rejected() {
        let mut config = Config::default();
        config.log.level = "  ".into();
        assert_eq!(validate_config(&config).len(), 1);
    }

    #[test]
    fn test_pretty_ignored_for_tree_format() {
        let mut config = Config::default();
        config.output.pretty_explicit = true;
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::PrettyIgnored {
                format: OutputFormat::Tree
            }]
        );

        config.output.format = OutputFormat::Json;
        assert!(validate_config(&config).is_empty());
    }
}
