//! Error types for rulec.

use std::fmt;

/// Error type for rulec operations.
#[derive(Debug)]
pub enum Error {
    /// Unknown transformation name in configuration
    UnknownTransformation(String),

    /// Configuration has no sources
    EmptySources,

    /// A source entry has an empty source string
    EmptySource(String),

    /// Invalid inclusion/exclusion pattern
    InvalidPattern { pattern: String, reason: String },

    /// A source could not be fetched
    Fetch { source: String, reason: String },

    /// Source content was not valid UTF-8
    Decode(String),

    /// Configuration file not found
    ConfigNotFound(String),

    /// Unknown configuration file extension
    UnknownExtension(String),

    /// JSON parsing error
    Json(serde_json::Error),

    /// YAML parsing error
    Yaml(serde_yaml::Error),

    /// TOML parsing error
    Toml(toml::de::Error),

    /// Output could not be persisted
    Serialize { path: String, reason: String },

    /// IO error
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTransformation(name) => write!(f, "unknown transformation: {}", name),
            Error::EmptySources => write!(f, "configuration has no sources"),
            Error::EmptySource(source) => {
                write!(f, "source {:?} has an empty source string", source)
            }
            Error::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern {:?}: {}", pattern, reason)
            }
            Error::Fetch { source, reason } => {
                write!(f, "failed to fetch source {:?}: {}", source, reason)
            }
            Error::Decode(source) => write!(f, "source {:?} is not valid UTF-8", source),
            Error::ConfigNotFound(path) => write!(f, "configuration file not found: {}", path),
            Error::UnknownExtension(ext) => {
                write!(f, "unknown configuration file extension: {}", ext)
            }
            Error::Json(e) => write!(f, "invalid JSON: {}", e),
            Error::Yaml(e) => write!(f, "invalid YAML: {}", e),
            Error::Toml(e) => write!(f, "invalid TOML: {}", e),
            Error::Serialize { path, reason } => {
                write!(f, "failed to write output {:?}: {}", path, reason)
            }
            Error::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            Error::Yaml(e) => Some(e),
            Error::Toml(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Yaml(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Toml(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for rulec operations.
pub type Result<T> = std::result::Result<T, Error>;
