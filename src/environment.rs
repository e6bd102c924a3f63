//! Environment selector for configuration sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named selector for the directory a source reads from.
///
/// An empty (or whitespace-only) name is the default environment, which
/// sources resolve to the user's home directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    name: String,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when this environment selects the default root.
    pub fn is_default(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            write!(f, "<default>")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment() {
        let env = Environment::default();
        assert_eq!(env.name(), "");
        assert!(env.is_default());
        assert_eq!(env.to_string(), "<default>");
    }

    #[test]
    fn test_blank_name_is_default() {
        assert!(Environment::new("  \t").is_default());
        assert!(!Environment::new("/etc/app").is_default());
    }

    #[test]
    fn test_equality_is_by_name() {
        assert_eq!(Environment::new("prod"), Environment::from("prod"));
        assert_ne!(Environment::new("prod"), Environment::new("dev"));
    }
}
