//! Tree-to-flat-map conversion.
//!
//! Object fields are joined with `.`; arrays are kept whole and stored as
//! compact JSON. Dots inside keys are not escaped, so `{"a.b": 1}` and
//! `{"a": {"b": 1}}` flatten to the same key.

use crate::flat::FlatConfig;
use crate::tree::{CONTENT_KEY, ConfigTree};

/// Flatten a parsed document into dot-joined keys.
///
/// Text blocks, and scalars or arrays at the root, are stored under
/// [`CONTENT_KEY`].
pub fn flatten(tree: &ConfigTree) -> FlatConfig {
    let mut flat = FlatConfig::new();
    match tree {
        ConfigTree::Object(fields) => flatten_fields(fields, &mut flat, ""),
        ConfigTree::TextBlock(text) => {
            flat.insert(CONTENT_KEY, text.clone());
        }
        leaf => {
            flat.insert(CONTENT_KEY, leaf_string(leaf));
        }
    }
    flat
}

fn flatten_fields(fields: &[(String, ConfigTree)], flat: &mut FlatConfig, prefix: &str) {
    for (key, value) in fields {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            ConfigTree::Object(children) => flatten_fields(children, flat, &path),
            leaf => {
                flat.insert(path, leaf_string(leaf));
            }
        }
    }
}

fn leaf_string(node: &ConfigTree) -> String {
    match node {
        ConfigTree::Scalar(scalar) => scalar.to_property_string(),
        ConfigTree::TextBlock(text) => text.clone(),
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Scalar;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> ConfigTree {
        ConfigTree::from_json(value)
    }

    #[test]
    fn test_flat_input_is_unchanged() {
        let flat = flatten(&tree(json!({"host": "localhost", "port": 8080, "debug": true})));
        let entries: Vec<_> = flat.iter().collect();
        assert_eq!(
            entries,
            vec![("host", "localhost"), ("port", "8080"), ("debug", "true")]
        );
    }

    #[test]
    fn test_nested_objects_join_with_dots() {
        let flat = flatten(&tree(json!({"a": {"b": {"c": 5}}})));
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a.b.c"), Some("5"));
    }

    #[test]
    fn test_arrays_are_opaque() {
        let flat = flatten(&tree(json!({"a": [1, 2, 3]})));
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a"), Some("[1,2,3]"));
        assert!(!flat.contains_key("a.0"));
    }

    #[test]
    fn test_array_of_objects_is_a_single_value() {
        let flat = flatten(&tree(json!({"servers": [{"host": "a"}, {"host": "b"}]})));
        assert_eq!(flat.get("servers"), Some(r#"[{"host":"a"},{"host":"b"}]"#));
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_text_block_maps_to_content() {
        let flat = flatten(&ConfigTree::TextBlock("hello".to_string()));
        assert_eq!(flat.iter().collect::<Vec<_>>(), vec![("content", "hello")]);
    }

    #[test]
    fn test_root_scalar_maps_to_content() {
        let flat = flatten(&ConfigTree::Scalar(Scalar::Bool(true)));
        assert_eq!(flat.get("content"), Some("true"));
    }

    #[test]
    fn test_order_follows_document() {
        let flat = flatten(&tree(json!({
            "z": {"y": 1, "x": 2},
            "a": null
        })));
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["z.y", "z.x", "a"]);
        assert_eq!(flat.get("a"), Some("null"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(flatten(&ConfigTree::empty()).is_empty());
        assert!(flatten(&tree(json!({"section": {}}))).is_empty());
    }

    #[test]
    fn test_dotted_keys_are_not_escaped() {
        let flat = flatten(&tree(json!({"a.b": 1, "c": {"d.e": 2}})));
        assert_eq!(flat.get("a.b"), Some("1"));
        assert_eq!(flat.get("c.d.e"), Some("2"));
    }
}
