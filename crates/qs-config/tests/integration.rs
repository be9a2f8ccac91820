//! Integration tests for qs-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> validate.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use qs_config::{
    CONFIG_FILENAME, Config, ConfigError, ConfigWarning, OutputFormat, discover_config_files,
    is_global_config, local_template,
};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_from_no_files_returns_default() {
    let config = Config::load_from_files(&[]).unwrap();

    assert!(config.sources.is_empty());
    assert_eq!(config.output.format, OutputFormat::Tree);
    assert!(config.output.pretty);
    assert!(config.output.color);
    assert_eq!(config.log.level, "warn");
}

#[test]
fn test_load_single_config() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[output]
format = "json"
pretty = false
"#,
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(!config.output.pretty);
    assert!(config.output.color);
    assert_eq!(config.sources, vec![env.path().join(CONFIG_FILENAME)]);
    assert!(config.validate().is_empty());
}

#[test]
fn test_nested_configs_merge_closest_first() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[output]
format = "query"
color = false

[log]
level = "info"
"#,
    );
    env.create_file(
        "project/.qs.toml",
        r#"
[output]
color = true
"#,
    );
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.output.format, OutputFormat::Query);
    assert!(config.output.color);
    assert_eq!(config.log.level, "info");
    assert_eq!(
        config.sources,
        vec![
            env.path().join("project").join(CONFIG_FILENAME),
            env.path().join(CONFIG_FILENAME)
        ]
    );
}

#[test]
fn test_root_config_excludes_parents() {
    let env = TestEnv::new();
    env.create_file(CONFIG_FILENAME, "[log]\nlevel = \"trace\"\n");
    let root = env.create_file("project/.qs.toml", "root = true\n");

    let files = discover_config_files(&env.path().join("project"));
    assert_eq!(files, vec![root]);

    let config = Config::load_from_files(&files).unwrap();
    assert_eq!(config.log.level, "warn");
}

#[test]
fn test_invalid_toml_reports_path() {
    let env = TestEnv::new();
    let bad = env.create_file(CONFIG_FILENAME, "[output\nformat = \"json\"\n");

    let err = Config::load_from_files(&[bad.clone()]).unwrap_err();

    match err {
        ConfigError::ParseToml { path, .. } => assert_eq!(path, bad),
        other => panic!("expected ParseToml, got {other:?}"),
    }
}

#[test]
fn test_unknown_format_is_a_parse_error() {
    let env = TestEnv::new();
    let bad = env.create_file(CONFIG_FILENAME, "[output]\nformat = \"xml\"\n");

    let err = Config::load_from_files(&[bad]).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let env = TestEnv::new();
    let missing = env.path().join("nope").join(CONFIG_FILENAME);

    let err = Config::load_from_files(&[missing]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_validate_reports_warnings_after_merge() {
    let env = TestEnv::new();
    let file = env.create_file(
        CONFIG_FILENAME,
        r#"
[output]
pretty = true

[log]
level = "chatty"
"#,
    );

    let config = Config::load_from_files(&[file]).unwrap();
    let warnings = config.validate();

    assert_eq!(warnings.len(), 2);
    assert!(warnings.contains(&ConfigWarning::InvalidLogLevel {
        level: "chatty".into()
    }));
    assert!(warnings.contains(&ConfigWarning::PrettyIgnored {
        format: OutputFormat::Tree
    }));
}

#[test]
fn test_template_written_as_config_loads_defaults() {
    let env = TestEnv::new();
    let file = env.create_file(CONFIG_FILENAME, &local_template());

    let config = Config::load_from_files(&[file]).unwrap();

    assert_eq!(config.output.format, OutputFormat::Tree);
    assert_eq!(config.log.level, "warn");
}

#[test]
fn test_settings_round_trip_through_toml() {
    let env = TestEnv::new();
    let file = env.create_file(
        CONFIG_FILENAME,
        "[output]\nformat = \"json\"\ncolor = false\n",
    );
    let config = Config::load_from_files(&[file]).unwrap();

    let effective = env.create_file("effective/.qs.toml", &config.settings_to_toml().unwrap());
    let reloaded = Config::load_from_files(&[effective]).unwrap();

    assert_eq!(reloaded.output.format, OutputFormat::Json);
    assert!(!reloaded.output.color);
    assert_eq!(reloaded.log, config.log);
}

#[test]
fn test_discovery_without_local_configs_only_finds_global() {
    let env = TestEnv::new();
    let cwd = env.create_dir("a/b");

    for file in discover_config_files(&cwd) {
        assert!(is_global_config(&file));
    }
}
