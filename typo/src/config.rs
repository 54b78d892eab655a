//! Generator configuration

use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SNIPPET_DIR};
use crate::error::{Error, Result};

/// Wire formats written by [`ApiDocs::generate`](crate::ApiDocs::generate)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `openapi.json` only
    Json,
    /// `openapi.yaml` only
    Yaml,
    /// Both files
    #[default]
    Both,
}

impl OutputFormat {
    /// Whether JSON output is selected
    pub const fn writes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    /// Whether YAML output is selected
    pub const fn writes_yaml(self) -> bool {
        matches!(self, Self::Yaml | Self::Both)
    }
}

/// Where and what the generator writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory receiving the wire documents
    pub output_dir:         PathBuf,
    /// Directory receiving the documentation snippets
    pub snippet_dir:        PathBuf,
    /// Wire formats to write
    pub format:             OutputFormat,
    /// Whether snippets are written
    pub generate_rest_docs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir:         PathBuf::from(DEFAULT_OUTPUT_DIR),
            snippet_dir:        PathBuf::from(DEFAULT_SNIPPET_DIR),
            format:             OutputFormat::default(),
            generate_rest_docs: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from JSON; absent keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Report::new(Error::Configuration(format!("invalid generator configuration: {e}")))
        })
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Report::new(Error::io_failed("read", path, e)))?;
        Self::from_json_str(&contents).attach(format!("Config file: {}", path.display()))
    }

    /// Set the wire document directory
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the snippet directory
    #[must_use]
    pub fn snippet_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snippet_dir = dir.into();
        self
    }

    /// Select the wire formats
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable snippet generation
    #[must_use]
    pub const fn generate_rest_docs(mut self, enabled: bool) -> Self {
        self.generate_rest_docs = enabled;
        self
    }
}
