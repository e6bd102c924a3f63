//! YAML documents.

use super::{FileFormat, FormatParser, strip_bom};
use crate::error::FormatError;
use crate::tree::{ConfigTree, Scalar};
use serde_yaml::Value as YamlValue;

/// Parses YAML mappings into a tree.
///
/// Follows the JSON rules: an empty document is an empty object and a bare
/// string scalar is a text block. Non-string mapping keys use their scalar
/// text (`1: a` becomes key `"1"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl FormatParser for YamlParser {
    fn parse(&self, input: &[u8]) -> Result<ConfigTree, FormatError> {
        let text = std::str::from_utf8(strip_bom(input))?;
        if text.trim().is_empty() {
            return Ok(ConfigTree::empty());
        }

        let value: YamlValue = serde_yaml::from_str(text)?;
        match yaml_to_tree(value) {
            ConfigTree::Scalar(Scalar::Null) => Ok(ConfigTree::empty()),
            ConfigTree::Scalar(Scalar::String(content)) => Ok(ConfigTree::TextBlock(content)),
            tree @ ConfigTree::Object(_) => Ok(tree),
            other => Err(FormatError::UnsupportedDocument {
                format: FileFormat::Yaml,
                kind: other.kind(),
            }),
        }
    }

    fn format(&self) -> FileFormat {
        FileFormat::Yaml
    }
}

fn yaml_to_tree(value: YamlValue) -> ConfigTree {
    match value {
        YamlValue::Null => ConfigTree::Scalar(Scalar::Null),
        YamlValue::Bool(b) => ConfigTree::Scalar(Scalar::Bool(b)),
        YamlValue::Number(n) => ConfigTree::Scalar(yaml_number(&n)),
        YamlValue::String(s) => ConfigTree::Scalar(Scalar::String(s)),
        YamlValue::Sequence(items) => {
            ConfigTree::Array(items.into_iter().map(yaml_to_tree).collect())
        }
        YamlValue::Mapping(mapping) => ConfigTree::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (key_string(key), yaml_to_tree(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_tree(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Scalar::Number(u.into())
    } else {
        // .inf and .nan have no JSON number form
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Scalar::Number)
            .unwrap_or_else(|| Scalar::String(n.to_string()))
    }
}

fn key_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Tagged(tagged) => key_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
