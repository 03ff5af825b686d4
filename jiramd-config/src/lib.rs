//! Shared configuration loader for the jiramd toolchain.
//!
//! `defaults/jiramd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`JiramdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use jiramd_babel::status::StatusMap;
use jiramd_babel::story::ParseOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/jiramd.default.toml");

/// Top-level configuration consumed by jiramd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct JiramdConfig {
    pub sync: SyncConfig,
    pub parse: ParseConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

/// Where story files live and how they are named.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub input_dir: String,
    pub output_dir: String,
    pub max_file_name_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub require_story_id: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusConfig {
    #[serde(default)]
    pub map: StatusMap,
}

impl JiramdConfig {
    /// Story parser options for a given file.
    pub fn parse_options(&self, file_path: Option<String>) -> ParseOptions {
        ParseOptions {
            file_path,
            ..ParseOptions::from(self)
        }
    }
}

impl From<&JiramdConfig> for ParseOptions {
    fn from(config: &JiramdConfig) -> Self {
        ParseOptions {
            status_map: config.status.map.clone(),
            file_path: None,
            require_story_id: config.parse.require_story_id,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings and env vars).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<JiramdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<JiramdConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.sync.input_dir, "jiramd");
        assert_eq!(config.sync.output_dir, "jira");
        assert_eq!(config.sync.max_file_name_length, 200);
        assert!(!config.parse.require_story_id);
        assert!(config.status.map.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("sync.input_dir", "stories")
            .expect("override to apply")
            .set_override("parse.require_story_id", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.sync.input_dir, "stories");
        assert!(config.parse.require_story_id);
    }

    #[test]
    fn layers_user_file() {
        let dir = std::env::temp_dir().join(format!("jiramd-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("jiramd.toml");
        let mut file = std::fs::File::create(&path).expect("config file");
        writeln!(
            file,
            "[sync]\noutput_dir = \"out\"\n\n[status.map]\n\"ready for qa\" = \"In Review\""
        )
        .expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.sync.output_dir, "out");
        assert_eq!(config.sync.input_dir, "jiramd");
        assert_eq!(
            config.status.map.get("ready for qa").map(String::as_str),
            Some("In Review")
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/jiramd.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn optional_file_may_be_absent() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/jiramd.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.sync.max_file_name_length, 200);
    }

    #[test]
    fn config_converts_to_parse_options() {
        let config = Loader::new()
            .set_override("parse.require_story_id", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = config.parse_options(Some("a.md".into()));
        assert!(options.require_story_id);
        assert_eq!(options.file_path.as_deref(), Some("a.md"));
    }
}
