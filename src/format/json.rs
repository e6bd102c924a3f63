//! JSON documents.

use super::{FileFormat, FormatParser, strip_bom};
use crate::error::FormatError;
use crate::tree::ConfigTree;
use serde_json::Value;

/// Parses JSON objects into a tree.
///
/// A document that is a single string literal (`"some text"`) is returned
/// as a [`ConfigTree::TextBlock`]; an empty document is an empty object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl FormatParser for JsonParser {
    fn parse(&self, input: &[u8]) -> Result<ConfigTree, FormatError> {
        let text = std::str::from_utf8(strip_bom(input))?;
        let body = text.trim_start_matches([' ', '\t', '\n', '\r']);

        if body.is_empty() {
            return Ok(ConfigTree::empty());
        }

        if body.starts_with('"') {
            let content: String = serde_json::from_str(body)?;
            return Ok(ConfigTree::TextBlock(content));
        }

        let value: Value = serde_json::from_str(body)?;
        match ConfigTree::from_json(value) {
            tree @ ConfigTree::Object(_) => Ok(tree),
            other => Err(FormatError::UnsupportedDocument {
                format: FileFormat::Json,
                kind: other.kind(),
            }),
        }
    }

    fn format(&self) -> FileFormat {
        FileFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::tree::Scalar;

    fn parse(input: &str) -> Result<ConfigTree, FormatError> {
        JsonParser.parse(input.as_bytes())
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse("").unwrap(), ConfigTree::empty());
        assert_eq!(parse("  \n\t ").unwrap(), ConfigTree::empty());
    }

    #[test]
    fn test_text_block() {
        assert_eq!(parse("\"hello\"").unwrap(), ConfigTree::TextBlock("hello".to_string()));
        let flat = flatten(&parse("  \"hello\"\n").unwrap());
        assert_eq!(flat.iter().collect::<Vec<_>>(), vec![("content", "hello")]);
    }

    #[test]
    fn test_text_block_decodes_escapes() {
        let tree = parse(r#""line1\nline2 é""#).unwrap();
        assert_eq!(tree, ConfigTree::TextBlock("line1\nline2 é".to_string()));
    }

    #[test]
    fn test_text_block_with_bad_escape_fails() {
        assert!(matches!(parse(r#""bad \q escape""#), Err(FormatError::Json(_))));
    }

    #[test]
    fn test_object_fields() {
        let tree = parse(r#"{"name": "svc", "port": 80, "tls": false, "extra": null}"#).unwrap();
        assert_eq!(tree.get("name"), Some(&ConfigTree::Scalar(Scalar::from("svc"))));
        assert_eq!(tree.get("tls"), Some(&ConfigTree::Scalar(Scalar::Bool(false))));
        assert_eq!(tree.get("extra"), Some(&ConfigTree::Scalar(Scalar::Null)));
    }

    #[test]
    fn test_nested_object_flattens() {
        let flat = flatten(&parse(r#"{"a": {"b": {"c": 5}}}"#).unwrap());
        assert_eq!(flat.iter().collect::<Vec<_>>(), vec![("a.b.c", "5")]);
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let tree = parse(r#"{"id": 123456789012345678901234, "p": 1.50, "e": 1e2}"#).unwrap();
        let flat = flatten(&tree);
        assert_eq!(flat.get("id"), Some("123456789012345678901234"));
        assert_eq!(flat.get("p"), Some("1.50"));
        assert_eq!(flat.get("e"), Some("1e2"));
    }

    #[test]
    fn test_array_keeps_json_types() {
        let tree = parse(r#"{"a": [1, "two", true, {"x": 1}]}"#).unwrap();
        let Some(ConfigTree::Array(items)) = tree.get("a") else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[2], ConfigTree::Scalar(Scalar::Bool(true)));
        assert_eq!(items[3].kind(), "object");

        let flat = flatten(&tree);
        assert_eq!(flat.get("a"), Some(r#"[1,"two",true,{"x":1}]"#));
    }

    #[test]
    fn test_top_level_non_object_is_rejected() {
        for input in ["42", "[1, 2]", "true", "null"] {
            assert!(
                matches!(parse(input), Err(FormatError::UnsupportedDocument { .. })),
                "input {input} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_syntax() {
        assert!(matches!(parse(r#"{"a": 1,}"#), Err(FormatError::Json(_))));
        assert!(matches!(parse("{not json"), Err(FormatError::Json(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            JsonParser.parse(b"{\"a\": \"\xff\"}"),
            Err(FormatError::Utf8(_))
        ));
    }

    #[test]
    fn test_bom_is_skipped() {
        let tree = JsonParser.parse(b"\xEF\xBB\xBF{\"a\": 1}").unwrap();
        assert_eq!(flatten(&tree).get("a"), Some("1"));
    }
}
