//! Shared configuration loader for the hilite tools.
//!
//! `defaults/hilite.default.toml` is embedded into every binary so the documented defaults and
//! the runtime behavior cannot drift apart. Applications layer user files and single-key
//! overrides on top of it via [`Loader`] before deserializing into [`HiliteConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/hilite.default.toml");

/// Top-level configuration consumed by hilite applications.
#[derive(Debug, Clone, Deserialize)]
pub struct HiliteConfig {
    pub highlight: HighlightConfig,
    pub render: RenderConfig,
    pub lexing: LexingConfig,
    pub grammars: GrammarsConfig,
}

/// Output selection and language fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub default_format: String,
    #[serde(default)]
    pub fallback_language: Option<String>,
}

/// HTML rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub class_prefix: String,
    pub wrap_pre: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexingConfig {
    pub chunk_lines: usize,
}

/// Directories holding user grammar files.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarsConfig {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
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

    /// Layer an optional configuration file, skipped when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (CLI flags end up here).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<HiliteConfig, ConfigError> {
        let config: HiliteConfig = self.builder.build()?.try_deserialize()?;
        if config.lexing.chunk_lines == 0 {
            return Err(ConfigError::Message(
                "lexing.chunk_lines must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<HiliteConfig, ConfigError> {
    Loader::new().build()
}
