//! Document formats and their parsers.
//!
//! Every parser turns raw bytes into a [`ConfigTree`]:
//! - **Properties**: `key=value` lines, already flat
//! - **JSON**: objects, or a bare string literal as a text block
//! - **YAML**: mappings, or a bare string scalar as a text block
//!
//! Which parser a file gets is decided by a [`FormatSelection`].

mod json;
mod properties;
mod yaml;

pub use json::JsonParser;
pub use properties::PropertiesParser;
pub use yaml::YamlParser;

use crate::error::FormatError;
use crate::tree::ConfigTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Converts a document in one syntax into a [`ConfigTree`].
pub trait FormatParser: Send + Sync {
    fn parse(&self, input: &[u8]) -> Result<ConfigTree, FormatError>;

    fn format(&self) -> FileFormat;
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Properties,
    Json,
    Yaml,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Properties => "properties",
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
        }
    }

    /// Guess a format from the file extension. Unknown extensions are properties.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => FileFormat::Json,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Properties,
        }
    }

    pub fn parser(&self) -> &'static dyn FormatParser {
        match self {
            FileFormat::Properties => &PropertiesParser,
            FileFormat::Json => &JsonParser,
            FileFormat::Yaml => &YamlParser,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "properties" | "props" => Ok(FileFormat::Properties),
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            other => Err(format!("unknown file format: {}", other)),
        }
    }
}

/// How a source picks the parser for each file.
///
/// Defaults to the property-file parser for every file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatSelection {
    /// Choose by file extension, falling back to properties.
    ByExtension,
    /// Use one format for every file.
    Fixed(FileFormat),
}

impl Default for FormatSelection {
    fn default() -> Self {
        FormatSelection::Fixed(FileFormat::Properties)
    }
}

impl FormatSelection {
    pub fn format_for(&self, path: &Path) -> FileFormat {
        match self {
            FormatSelection::ByExtension => FileFormat::from_path(path),
            FormatSelection::Fixed(format) => *format,
        }
    }
}

impl fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSelection::ByExtension => write!(f, "by_extension"),
            FormatSelection::Fixed(format) => write!(f, "{}", format),
        }
    }
}

impl FromStr for FormatSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by_extension" | "extension" | "auto" => Ok(FormatSelection::ByExtension),
            other => other.parse().map(FormatSelection::Fixed),
        }
    }
}

impl TryFrom<String> for FormatSelection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatSelection> for String {
    fn from(value: FormatSelection) -> Self {
        value.to_string()
    }
}

/// Drop a leading UTF-8 byte order mark.
fn strip_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input)
}
