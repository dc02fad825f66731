//! Configuration for civic
//!
//! Stored in `<config_dir>/civic/config.toml`, overridable with
//! `$CIVIC_CONFIG` or an explicit path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "CIVIC_CONFIG";

/// civic configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON seed file with issues and reports (built-in fixtures if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,

    /// Whether the sidebar starts expanded
    pub sidebar_open: bool,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_file: None,
            sidebar_open: true,
            display: DisplayConfig::default(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Date format for timestamps written by mutations
    pub date_format: String,

    /// Maximum description length in list rows before truncation
    pub max_description_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            max_description_length: 80,
        }
    }
}

impl DisplayConfig {
    /// Cut `s` to `max_description_length` characters, ending in "..."
    pub fn truncate(&self, s: &str) -> String {
        let max = self.max_description_length;
        if s.chars().count() > max {
            let cut: String = s.chars().take(max.saturating_sub(3)).collect();
            format!("{}...", cut)
        } else {
            s.to_string()
        }
    }
}

impl Config {
    /// Default config location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("civic").join("config.toml"))
    }

    /// Resolve the config path: explicit path, then `$CIVIC_CONFIG`, then
    /// the platform default
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_path)
    }

    /// Load from the resolved path; a missing file yields the defaults
    pub fn discover(explicit: Option<&Path>) -> crate::Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;

        // relative seed paths are relative to the config file
        if let (Some(seed), Some(dir)) = (&config.seed_file, path.parent())
            && seed.is_relative()
        {
            config.seed_file = Some(dir.join(seed));
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Generate a default config file with comments
    pub fn default_with_comments() -> String {
        r#"# civic configuration

# JSON seed file with "issues" and "reports" arrays.
# Relative paths are resolved against this file's directory.
# Built-in sample data is used when unset.
# seed_file = "seed.json"

# Whether the sidebar starts expanded
sidebar_open = true

[display]
# Use colors in output
colors = true

# Date format for timestamps written by "mark resolved" and new issues
date_format = "%Y-%m-%d %H:%M"

# Maximum description length in list rows before truncation
max_description_length = 80
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.sidebar_open);
        assert!(config.seed_file.is_none());
        assert_eq!(config.display.max_description_length, 80);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "sidebar_open = false\n[display]\ncolors = false\n").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(!config.sidebar_open);
        assert!(!config.display.colors);
        assert_eq!(config.display.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_relative_seed_path_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "seed_file = \"seed.json\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.seed_file, Some(dir.path().join("seed.json")));
    }

    #[test]
    fn test_commented_default_parses_to_default() {
        let config: Config = toml::from_str(&Config::default_with_comments()).unwrap();
        let default = Config::default();
        assert_eq!(config.sidebar_open, default.sidebar_open);
        assert_eq!(config.display.date_format, default.display.date_format);
    }

    #[test]
    fn test_truncate_counts_chars() {
        let display = DisplayConfig {
            max_description_length: 5,
            ..Default::default()
        };
        assert_eq!(display.truncate("abc"), "abc");
        assert_eq!(display.truncate("abcde"), "abcde");
        assert_eq!(display.truncate("abcdefghijkl"), "ab...");
        assert_eq!(display.truncate(&"ü".repeat(10)), "üü...");
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "sidebar_open = \"maybe\"").unwrap();
        assert!(matches!(Config::load(file.path()), Err(crate::Error::Config(_))));
    }
}
