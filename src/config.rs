use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Config file name, also the one path ignored by default so directive
/// mentions in the tool's own config are never flagged
pub const DEFAULT_CONFIG_FILE: &str = "copwatch.toml";

const DEFAULT_MESSAGE: &str = "Consider fixing the offense instead of disabling the cop, \
or explain in the review thread why the suppression is needed.";

fn default_max_parallel_lookups() -> usize {
    4
}

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub check: RunConfig,
}

/// Caller-supplied configuration for one check run
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    /// Substrings of file paths to skip (substring match, not glob)
    #[serde(default = "default_ignore_paths")]
    pub ignore_paths: Vec<String>,
    /// Note appended to every inline annotation
    #[serde(default = "default_message")]
    pub message: String,
    /// Reviewer handles tagged in the summary annotation (without the @)
    #[serde(default)]
    pub tag_reviewers: Vec<String>,
    /// Upper bound on concurrent docs lookups
    #[serde(default = "default_max_parallel_lookups")]
    pub max_parallel_lookups: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ignore_paths: default_ignore_paths(),
            message: default_message(),
            tag_reviewers: Vec::new(),
            max_parallel_lookups: default_max_parallel_lookups(),
        }
    }
}

fn default_ignore_paths() -> Vec<String> {
    vec![DEFAULT_CONFIG_FILE.to_string()]
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

impl Config {
    /// Load config from a TOML file; a missing file means all defaults
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(path).exists() {
            debug!("Config file {} not found, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Default config file written by `copwatch init`
pub const DEFAULT_CONFIG: &str = r#"[check]
# Skip files whose path contains any of these substrings
ignore_paths = ["copwatch.toml"]

# Note appended to every inline annotation
message = "Consider fixing the offense instead of disabling the cop, or explain in the review thread why the suppression is needed."

# Reviewer handles tagged in the summary annotation (without the @)
tag_reviewers = []

# Upper bound on concurrent `rubocop --show-docs-url` lookups
max_parallel_lookups = 4
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_ignore_own_config_file() {
        let config = RunConfig::default();
        assert_eq!(config.ignore_paths, vec!["copwatch.toml"]);
        assert!(config.tag_reviewers.is_empty());
        assert_eq!(config.max_parallel_lookups, 4);
        assert!(!config.message.is_empty());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: Config = toml::from_str("[check]\ntag_reviewers = [\"alice\"]\n").unwrap();
        assert_eq!(config.check.tag_reviewers, vec!["alice"]);
        assert_eq!(config.check.ignore_paths, vec!["copwatch.toml"]);
        assert_eq!(config.check.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.check.ignore_paths, vec!["copwatch.toml"]);
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.check.ignore_paths, RunConfig::default().ignore_paths);
        assert_eq!(config.check.message, RunConfig::default().message);
        assert_eq!(
            config.check.max_parallel_lookups,
            RunConfig::default().max_parallel_lookups
        );
    }
}
