//! Configuration loader for srcxref.
//!
//! `defaults/srcxref.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Callers layer user files and flag overrides on top via
//! [`Loader`] before deserializing into [`SrcxrefConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::analysis::AnalysisOptions;
use crate::error::AnalysisError;
use crate::lines::LineTerminatorPolicy;
use crate::profile::LanguageProfile;
use crate::xref::OutputFormat;

const DEFAULT_TOML: &str = include_str!("../defaults/srcxref.default.toml");

/// Profile name that defers the choice to each file's extension.
pub const AUTO_PROFILE: &str = "auto";

#[derive(Debug, Clone, Deserialize)]
pub struct SrcxrefConfig {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub policy: LineTerminatorPolicy,
    pub language_profile: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub include_trivia: bool,
}

impl SrcxrefConfig {
    /// Options for one file. With the `auto` profile the file's extension decides.
    pub fn options_for(&self, path: &Path) -> Result<AnalysisOptions, AnalysisError> {
        let profile = if self.analysis.language_profile == AUTO_PROFILE {
            LanguageProfile::for_path(path)
        } else {
            LanguageProfile::by_name(&self.analysis.language_profile)?
        };
        Ok(AnalysisOptions {
            policy: self.analysis.policy,
            profile,
            include_trivia: self.output.include_trivia,
        })
    }
}

/// Builds a [`SrcxrefConfig`] in layers: embedded defaults first, then TOML files in the
/// order they are added, then single-key overrides from the command line. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// A TOML file that must exist; whatever its extension, it is read as TOML.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// A TOML file that is skipped when absent (`./srcxref.toml`).
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key such as `analysis.policy` or `output.include_trivia`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer. Unknown policy or format names fail here; profile names are only
    /// checked by [`SrcxrefConfig::options_for`].
    pub fn build(self) -> Result<SrcxrefConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone: wide policy, `auto` profile, JSON without trivia.
pub fn load_defaults() -> Result<SrcxrefConfig, ConfigError> {
    Loader::new().build()
}
