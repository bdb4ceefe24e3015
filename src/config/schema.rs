//! Configuration schema types for `colorcycle.toml`
//!
//! Defines the structure and validation rules for run configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gif::{PlaybackOptions, DEFAULT_DURATION_MS};
use crate::group::{parse_group, ColorGroup, GroupError};

/// Name of the configuration file looked up on disk.
pub const CONFIG_FILE_NAME: &str = "colorcycle.toml";

/// Playback settings for the output animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Duration per frame in milliseconds
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Number of loops (0 = forever)
    #[serde(default, rename = "loop")]
    pub loop_count: u16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration: default_duration(), loop_count: 0 }
    }
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MS
}

impl AnimationConfig {
    pub fn playback(&self) -> PlaybackOptions {
        PlaybackOptions { duration_ms: self.duration, loop_count: self.loop_count }
    }
}

/// Frame generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Number of parallel jobs (default: available parallelism)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
    /// Encode each frame as soon as it is rendered instead of buffering all
    #[serde(default)]
    pub stream: bool,
    /// Treat duplicate-color warnings as errors
    #[serde(default)]
    pub strict: bool,
}

/// Complete `colorcycle.toml` configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Color groups as hex strings, one inner list per group
    #[serde(default)]
    pub groups: Vec<Vec<String>>,
    /// Playback settings
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Frame generation settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: '{}' {}", CONFIG_FILE_NAME, .field, .message)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "groups[1]")
    pub field: String,
    /// Error message
    pub message: String,
}

impl CycleConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.animation.duration == 0 {
            errors.push(ConfigValidationError {
                field: "animation.duration".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.render.jobs == Some(0) {
            errors.push(ConfigValidationError {
                field: "render.jobs".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        for (i, group) in self.groups.iter().enumerate() {
            if let Err(e) = parse_group(&group.join(",")) {
                errors.push(ConfigValidationError {
                    field: format!("groups[{}]", i),
                    message: e.to_string(),
                });
            }
        }

        errors
    }

    /// Parse the configured groups.
    pub fn color_groups(&self) -> Result<Vec<ColorGroup>, GroupError> {
        let lines: Vec<String> = self.groups.iter().map(|g| g.join(",")).collect();
        crate::group::parse_groups(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r##"
groups = [["#ff0000", "#00ff00", "#0000ff"], ["111111", "222222"]]

[animation]
duration = 80
loop = 3

[render]
jobs = 2
stream = true
strict = true
"##;
        let config: CycleConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.animation.duration, 80);
        assert_eq!(config.animation.loop_count, 3);
        assert_eq!(config.render.jobs, Some(2));
        assert!(config.render.stream);
        assert!(config.render.strict);
        assert!(config.validate().is_empty());

        let groups = config.color_groups().unwrap();
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 2);
    }

    #[test]
    fn test_defaults() {
        let config: CycleConfig = toml::from_str("").unwrap();
        assert!(config.groups.is_empty());
        assert_eq!(config.animation.duration, 100);
        assert_eq!(config.animation.loop_count, 0);
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.animation.playback(), PlaybackOptions::default());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let toml_str = r##"
groups = [["#ff0000"], ["#ff0000", "zzz"]]

[animation]
duration = 0

[render]
jobs = 0
"##;
        let config: CycleConfig = toml::from_str(toml_str).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].field, "animation.duration");
        assert_eq!(errors[1].field, "render.jobs");
        assert_eq!(errors[2].field, "groups[0]");
        assert_eq!(errors[3].field, "groups[1]");
        assert!(errors[3].to_string().contains("zzz"));
        assert!(errors[0].to_string().starts_with("colorcycle.toml: 'animation.duration'"));
    }

    #[test]
    fn test_loop_key() {
        let config: CycleConfig = toml::from_str("[animation]\nloop = 5\n").unwrap();
        assert_eq!(config.animation.loop_count, 5);
    }
}
