//! Configuration loading
//!
//! `defaults/versicle.default.toml` is embedded into the binary so the documented defaults and
//! runtime behavior stay in sync. User files and command-line overrides are layered on top via
//! [`Loader`] before deserializing into [`Settings`].

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/versicle.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub hierarchy: HierarchySettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HierarchySettings {
    /// Canon file to load; `None` parses against synthetic books only
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Name of a registered formatter
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

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

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert_eq!(settings.output.format, "text");
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.hierarchy.path.is_none());
    }

    #[test]
    fn supports_overrides() {
        let settings = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("hierarchy.path", "canon.yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(settings.output.format, "json");
        assert_eq!(settings.hierarchy.path, Some(PathBuf::from("canon.yaml")));
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let settings = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.output.format, "text");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let settings = Loader::new()
            .with_optional_file("/nonexistent/versicle.toml")
            .build()
            .unwrap();
        assert_eq!(settings.output.format, "text");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new().with_file("/nonexistent/versicle.toml").build().is_err());
    }
}
