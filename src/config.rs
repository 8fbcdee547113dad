//! Compilation configuration types and multi-format loading.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

impl ConfigFormat {
    /// Parse a format from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// Syntax of a source filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Adblock-style rules (`||domain^`, `@@` exceptions, `$` modifiers)
    #[default]
    Adblock,
    /// Hosts-file syntax (`0.0.0.0 domain.tld`)
    Hosts,
}

impl SourceKind {
    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Adblock => "adblock",
            SourceKind::Hosts => "hosts",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single filter-list source contributing rules to the compiled output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSource {
    /// Display name of the source
    #[serde(default)]
    pub name: String,

    /// Source URL or filesystem path
    #[serde(default)]
    pub source: String,

    /// Syntax of the source
    #[serde(default, rename = "type")]
    pub kind: SourceKind,

    /// Source-scoped transformations, applied before global ones
    #[serde(default)]
    pub transformations: Vec<String>,

    /// Source-scoped inclusion patterns
    #[serde(default)]
    pub inclusions: Vec<String>,

    /// Source-scoped exclusion patterns
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl FilterSource {
    /// Create a source from a URL or path with default settings.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Name to show in logs and error messages.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.source
        } else {
            &self.name
        }
    }
}

/// Configuration for a compilation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Name of the compiled filter list
    #[serde(default)]
    pub name: String,

    /// Description of the filter list
    #[serde(default)]
    pub description: String,

    /// Homepage URL
    #[serde(default)]
    pub homepage: String,

    /// License identifier
    #[serde(default)]
    pub license: String,

    /// Version of the filter list
    #[serde(default)]
    pub version: String,

    /// Sources to compile, in output order
    #[serde(default)]
    pub sources: Vec<FilterSource>,

    /// Global transformations, applied to the merged rule set
    #[serde(default)]
    pub transformations: Vec<String>,

    /// Global inclusion patterns
    #[serde(default)]
    pub inclusions: Vec<String>,

    /// Global exclusion patterns
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl Configuration {
    /// Parse a configuration from a string in the given format.
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }
}

/// Detect configuration format from a file extension.
pub fn detect_format<P: AsRef<Path>>(file_path: P) -> Result<ConfigFormat> {
    let extension = file_path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    ConfigFormat::parse(&extension).ok_or(Error::UnknownExtension(extension))
}

/// Read and parse a configuration file.
///
/// When `format` is `None` the format is detected from the file extension.
pub fn read_configuration<P: AsRef<Path>>(
    config_path: P,
    format: Option<ConfigFormat>,
) -> Result<Configuration> {
    let path = config_path.as_ref();

    if !path.exists() {
        return Err(Error::ConfigNotFound(path.display().to_string()));
    }

    let format = match format {
        Some(f) => f,
        None => detect_format(path)?,
    };
    let content = fs::read_to_string(path)?;

    Configuration::from_str(&content, format)
}
