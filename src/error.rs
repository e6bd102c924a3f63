//! Structured error types for parsing and configuration sources.

use serde::Serialize;
use std::path::PathBuf;

use crate::format::FileFormat;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The environment's root directory could not be found.
    MissingEnvironment,
    /// A listed file could not be read or parsed.
    SourceIo,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingEnvironment => "MISSING_ENVIRONMENT",
            ErrorCode::SourceIo => "SOURCE_IO",
        }
    }
}

/// Stage of a `get_configuration` call that failed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStage {
    /// Resolving the environment to a root directory.
    Environment,
    /// Opening or reading a configuration file.
    Read,
    /// Parsing the contents of a configuration file.
    Parse,
}

impl std::fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorStage::Environment => write!(f, "environment"),
            ErrorStage::Read => write!(f, "read"),
            ErrorStage::Parse => write!(f, "parse"),
        }
    }
}

/// A document could not be parsed in its declared format.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid properties at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("unsupported top-level {format} document: expected an object or a string, found {kind}")]
    UnsupportedDocument { format: FileFormat, kind: &'static str },
}

/// Failure of a configuration source call.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("directory doesn't exist: {}", root.display())]
    MissingEnvironment { root: PathBuf },

    #[error("unable to determine the home directory for the default environment")]
    UnknownHomeDirectory,

    #[error("unable to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl SourceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SourceError::MissingEnvironment { .. } | SourceError::UnknownHomeDirectory => {
                ErrorCode::MissingEnvironment
            }
            SourceError::Read { .. } | SourceError::Parse { .. } => ErrorCode::SourceIo,
        }
    }

    pub fn stage(&self) -> ErrorStage {
        match self {
            SourceError::MissingEnvironment { .. } | SourceError::UnknownHomeDirectory => {
                ErrorStage::Environment
            }
            SourceError::Read { .. } => ErrorStage::Read,
            SourceError::Parse { .. } => ErrorStage::Parse,
        }
    }

    /// True for failures that happened while reading or parsing a listed file.
    pub fn is_source_io(&self) -> bool {
        self.code() == ErrorCode::SourceIo
    }

    /// True when the environment root could not be resolved.
    pub fn is_missing_environment(&self) -> bool {
        self.code() == ErrorCode::MissingEnvironment
    }

    /// Path of the file that failed, if the failure is tied to one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SourceError::Read { path, .. } | SourceError::Parse { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
