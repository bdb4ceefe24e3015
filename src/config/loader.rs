//! Configuration loading and discovery for `colorcycle.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{CycleConfig, CONFIG_FILE_NAME};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse colorcycle.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Groups given on the command line; replace configured groups entirely
    pub groups: Vec<Vec<String>>,
    /// Override frame duration
    pub duration: Option<u32>,
    /// Override loop count
    pub loop_count: Option<u16>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Enable streaming encode
    pub stream: Option<bool>,
    /// Enable strict mode
    pub strict: Option<bool>,
}

/// Find `colorcycle.toml` by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find `colorcycle.toml` by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Reached root, no config found
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a `colorcycle.toml` file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. If no file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<CycleConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::info!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(CycleConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<CycleConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: CycleConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut CycleConfig, overrides: &CliOverrides) {
    if !overrides.groups.is_empty() {
        config.groups = overrides.groups.clone();
    }

    if let Some(duration) = overrides.duration {
        config.animation.duration = duration;
    }

    if let Some(loop_count) = overrides.loop_count {
        config.animation.loop_count = loop_count;
    }

    if let Some(jobs) = overrides.jobs {
        config.render.jobs = Some(jobs);
    }

    if let Some(stream) = overrides.stream {
        config.render.stream = stream;
    }

    if let Some(strict) = overrides.strict {
        config.render.strict = strict;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("art").join("tiles");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            "groups = [[\"#000000\", \"#ffffff\"]]\n[animation]\nduration = 40\n",
        );

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.groups, vec![vec!["#000000".to_string(), "#ffffff".to_string()]]);
        assert_eq!(config.animation.duration, 40);
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "groups = \"not a list\"");

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "groups = [[\"#000000\"]]");

        let err = load_config(Some(&config_path)).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("groups[0]"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/colorcycle.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = CycleConfig {
            groups: vec![vec!["#000000".to_string(), "#ffffff".to_string()]],
            ..Default::default()
        };

        let overrides = CliOverrides {
            groups: vec![vec!["#ff0000".to_string(), "#00ff00".to_string()]],
            duration: Some(250),
            loop_count: Some(1),
            jobs: Some(3),
            stream: Some(true),
            strict: None,
        };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.groups[0][0], "#ff0000");
        assert_eq!(config.animation.duration, 250);
        assert_eq!(config.animation.loop_count, 1);
        assert_eq!(config.render.jobs, Some(3));
        assert!(config.render.stream);
        assert!(!config.render.strict);
    }

    #[test]
    fn test_merge_keeps_config_groups_without_cli_groups() {
        let mut config = CycleConfig {
            groups: vec![vec!["#000000".to_string(), "#ffffff".to_string()]],
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.animation.duration, 100);
    }
}
