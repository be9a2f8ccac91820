//! Configuration file discovery.
//!
//! Discovers `.qs.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.qs.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::{ConfigError, parse::is_root_config};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".qs.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.qs.toml`) last.
/// Files closer to `cwd` have higher precedence during merging.
///
/// The function:
/// 1. Walks up from `cwd` to the filesystem root, collecting any `.qs.toml` files found
/// 2. Stops if a config file has `root = true` set
/// 3. Appends `~/.qs.toml` if it exists and no root config was found (lowest precedence)
///
/// Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            debug!(path = %config_path.display(), is_root, "found config file");
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        debug!(path = %global_path.display(), "found global config file");
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.qs.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Like [`global_config_path`], but reports a missing home directory as an error.
pub fn require_global_config_path() -> Result<PathBuf, ConfigError> {
    global_config_path().ok_or(ConfigError::NoHomeDirectory)
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::ConfigTree;

    #[test]
    fn test_discover_no_configs() {
        let tree = ConfigTree::new();
        let cwd = tree.dir("a/b/c");

        for config in discover_config_files(&cwd) {
            assert!(is_global_config(&config), "unexpected config: {config:?}");
        }
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let tree = ConfigTree::new();
        let config = tree.config("project", "[output]\nformat = \"json\"\n");
        let cwd = tree.dir("project/src");

        assert_eq!(discover_config_files(&cwd).first(), Some(&config));
    }

    #[test]
    fn test_discover_closest_first() {
        let tree = ConfigTree::new();
        let outer = tree.config("", "[log]\nlevel = \"info\"\n");
        let inner = tree.config("project", "[output]\ncolor = false\n");
        let cwd = tree.dir("project/src");

        let local: Vec<_> = discover_config_files(&cwd)
            .into_iter()
            .filter(|c| !is_global_config(c))
            .collect();

        assert_eq!(local, vec![inner, outer]);
    }

    #[test]
    fn test_discover_skips_directory_named_like_config() {
        let tree = ConfigTree::new();
        let cwd = tree.dir("project");
        fs::create_dir_all(cwd.join(CONFIG_FILENAME)).unwrap();

        assert!(
            !discover_config_files(&cwd)
                .iter()
                .any(|c| c.starts_with(&cwd))
        );
    }

    #[test]
    fn test_root_config_stops_discovery() {
        let tree = ConfigTree::new();
        tree.config("", "[log]\nlevel = \"trace\"\n");
        let root = tree.config("project", "root = true\n");
        let cwd = tree.dir("project/src");

        assert_eq!(discover_config_files(&cwd), vec![root]);
    }

    #[test]
    fn test_root_config_keeps_closer_configs() {
        let tree = ConfigTree::new();
        let root = tree.config("project", "root = true\n[output]\nformat = \"query\"\n");
        let child = tree.config("project/sub", "[output]\npretty = false\n");

        assert_eq!(
            discover_config_files(&tree.root().join("project/sub")),
            vec![child, root]
        );
    }

    #[test]
    fn test_root_false_does_not_stop_discovery() {
        let tree = ConfigTree::new();
        let outer = tree.config("", "[output]\ncolor = true\n");
        let inner = tree.config("project", "root = false\n");

        let configs = discover_config_files(&tree.root().join("project"));

        assert_eq!(configs[0], inner);
        assert_eq!(configs[1], outer);
    }

    #[test]
    fn test_global_config_path_uses_filename() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with(CONFIG_FILENAME));
            assert!(is_global_config(&path));
            assert_eq!(require_global_config_path().unwrap(), path);
        }
    }
}
