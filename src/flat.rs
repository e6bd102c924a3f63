//! Ordered, string-valued configuration map.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Flat configuration: dot-joined keys mapped to string values.
///
/// Iteration follows insertion order. Re-inserting an existing key replaces
/// its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatConfig {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FlatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Merge `other` into `self`; keys from `other` win.
    pub fn merge(&mut self, other: FlatConfig) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn into_btree_map(self) -> BTreeMap<String, String> {
        self.entries.into_iter().collect()
    }

    pub fn into_hash_map(self) -> HashMap<String, String> {
        self.entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = FlatConfig::new();
        for (key, value) in iter {
            config.insert(key, value);
        }
        config
    }
}

impl IntoIterator for FlatConfig {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for FlatConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position_on_overwrite() {
        let mut config = FlatConfig::new();
        assert!(config.insert("a", "1").is_none());
        config.insert("b", "2");
        assert_eq!(config.insert("a", "3").as_deref(), Some("1"));

        let entries: Vec<_> = config.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base: FlatConfig = [("a", "1"), ("keep", "x")].into_iter().collect();
        let overlay: FlatConfig = [("a", "2"), ("b", "3")].into_iter().collect();
        base.merge(overlay);

        assert_eq!(base.get("a"), Some("2"));
        assert_eq!(base.get("b"), Some("3"));
        assert_eq!(base.get("keep"), Some("x"));
        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["a", "keep", "b"]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let config: FlatConfig = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn test_conversions() {
        let config: FlatConfig = [("b", "2"), ("a", "1")].into_iter().collect();
        let sorted: Vec<_> = config.clone().into_btree_map().into_keys().collect();
        assert_eq!(sorted, vec!["a", "b"]);
        assert_eq!(config.into_hash_map().get("a").map(String::as_str), Some("1"));
    }
}
