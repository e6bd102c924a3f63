//! Configuration sources.
//!
//! A [`ConfigurationSource`] turns an [`Environment`] into a [`FlatConfig`].
//! The file-backed implementation reads the paths supplied by a
//! [`ConfigFilesProvider`] relative to the environment's root directory and
//! merges them in order, later files overriding earlier ones.

mod files;

pub use files::{DEFAULT_CONFIG_FILE, FilesConfigurationSource};

use crate::environment::Environment;
use crate::error::SourceResult;
use crate::flat::FlatConfig;
use std::fmt;
use std::path::PathBuf;

/// Supplies configuration as a flat map for an environment.
pub trait ConfigurationSource: Send + Sync {
    /// Fetch the configuration for `environment`.
    ///
    /// Either every listed file is loaded or the call fails; a partial map
    /// is never returned.
    fn get_configuration(&self, environment: &Environment) -> SourceResult<FlatConfig>;

    /// Refresh any cached state. Sources without a cache do nothing.
    fn reload(&self) -> SourceResult<()>;
}

/// Ordered list of configuration files to read.
pub trait ConfigFilesProvider: Send + Sync {
    fn config_files(&self) -> Vec<PathBuf>;
}

impl<F> ConfigFilesProvider for F
where
    F: Fn() -> Vec<PathBuf> + Send + Sync,
{
    fn config_files(&self) -> Vec<PathBuf> {
        self()
    }
}

/// A fixed list of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFilesProvider {
    files: Vec<PathBuf>,
}

impl StaticFilesProvider {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Default for StaticFilesProvider {
    fn default() -> Self {
        Self::new([DEFAULT_CONFIG_FILE])
    }
}

impl ConfigFilesProvider for StaticFilesProvider {
    fn config_files(&self) -> Vec<PathBuf> {
        self.files.clone()
    }
}

impl fmt::Display for StaticFilesProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.files.iter().map(|p| p.display().to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
