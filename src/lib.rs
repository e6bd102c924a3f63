//! Flat configuration loading.
//!
//! Reads configuration documents (property files, JSON, YAML) from a
//! directory selected by an [`Environment`] and normalizes them into one
//! ordered, string-valued [`FlatConfig`]:
//! - nested objects become dot-joined keys (`{"a": {"b": 1}}` → `a.b = 1`)
//! - arrays are kept whole as compact JSON
//! - a document that is only a string literal is stored under `content`
//! - files are merged in list order, later files overriding earlier keys

pub mod environment;
pub mod error;
pub mod flat;
pub mod flatten;
pub mod format;
pub mod logging;
pub mod settings;
pub mod source;
pub mod tree;

pub use environment::Environment;
pub use error::{ErrorCode, ErrorStage, FormatError, SourceError, SourceResult};
pub use flat::FlatConfig;
pub use flatten::flatten;
pub use format::{FileFormat, FormatParser, FormatSelection, JsonParser, PropertiesParser, YamlParser};
pub use settings::SourceSettings;
pub use source::{
    ConfigFilesProvider, ConfigurationSource, FilesConfigurationSource, StaticFilesProvider,
};
pub use tree::{CONTENT_KEY, ConfigTree, Scalar};
