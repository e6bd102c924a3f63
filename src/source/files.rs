//! Configuration source backed by local files.

use super::{ConfigFilesProvider, ConfigurationSource, StaticFilesProvider};
use crate::environment::Environment;
use crate::error::{SourceError, SourceResult};
use crate::flat::FlatConfig;
use crate::flatten::flatten;
use crate::format::FormatSelection;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File read when no provider is given.
pub const DEFAULT_CONFIG_FILE: &str = "application.properties";

/// Reads configuration files relative to the environment's directory.
///
/// The environment name is the root directory; the default (empty)
/// environment uses the user's home directory. Files are read fresh on
/// every call, so [`reload`](ConfigurationSource::reload) has nothing to do.
///
/// # Example
///
/// ```no_run
/// use flatconf::{
///     ConfigurationSource, Environment, FilesConfigurationSource, FormatSelection,
///     StaticFilesProvider,
/// };
///
/// let source = FilesConfigurationSource::with_files(StaticFilesProvider::new([
///     "application.properties",
///     "overrides.json",
/// ]))
/// .with_format(FormatSelection::ByExtension);
/// let config = source.get_configuration(&Environment::new("/etc/myapp")).unwrap();
/// println!("{:?}", config.get("server.port"));
/// ```
pub struct FilesConfigurationSource {
    files: Box<dyn ConfigFilesProvider>,
    formats: FormatSelection,
    home_dir: Option<PathBuf>,
}

impl FilesConfigurationSource {
    /// Source reading `application.properties` from the environment root.
    pub fn new() -> Self {
        Self::with_files(StaticFilesProvider::default())
    }

    /// Source reading the files listed by `provider`.
    pub fn with_files(provider: impl ConfigFilesProvider + 'static) -> Self {
        Self {
            files: Box::new(provider),
            formats: FormatSelection::default(),
            home_dir: None,
        }
    }

    /// Choose how each file's format is determined.
    pub fn with_format(mut self, formats: FormatSelection) -> Self {
        self.formats = formats;
        self
    }

    /// Directory used for the default environment instead of the home directory.
    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    pub fn formats(&self) -> FormatSelection {
        self.formats
    }

    /// Resolve the root directory for `environment`.
    ///
    /// Does not check that it exists.
    pub fn root_path(&self, environment: &Environment) -> SourceResult<PathBuf> {
        if environment.is_default() {
            self.home_dir
                .clone()
                .or_else(dirs::home_dir)
                .ok_or(SourceError::UnknownHomeDirectory)
        } else {
            Ok(PathBuf::from(environment.name()))
        }
    }

    fn load_file(&self, path: &Path) -> SourceResult<FlatConfig> {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let format = self.formats.format_for(path);
        let tree = format
            .parser()
            .parse(&bytes)
            .map_err(|source| SourceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let flat = flatten(&tree);
        debug!(
            path = %path.display(),
            format = %format,
            keys = flat.len(),
            "Loaded configuration file"
        );
        Ok(flat)
    }

    fn load_all(&self, environment: &Environment) -> SourceResult<FlatConfig> {
        let root = self.root_path(environment)?;
        if !root.is_dir() {
            return Err(SourceError::MissingEnvironment { root });
        }
        debug!(environment = %environment, root = %root.display(), "Resolved environment root");

        let mut config = FlatConfig::new();
        for file in self.files.config_files() {
            let path = root.join(file);
            config.merge(self.load_file(&path)?);
        }
        Ok(config)
    }
}

impl Default for FilesConfigurationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationSource for FilesConfigurationSource {
    fn get_configuration(&self, environment: &Environment) -> SourceResult<FlatConfig> {
        self.load_all(environment).inspect_err(|err| {
            warn!(
                environment = %environment,
                stage = %err.stage(),
                error = %err,
                "Failed to load configuration"
            );
        })
    }

    fn reload(&self) -> SourceResult<()> {
        Ok(())
    }
}

impl fmt::Debug for FilesConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilesConfigurationSource")
            .field("files", &self.files.config_files())
            .field("formats", &self.formats)
            .field("home_dir", &self.home_dir)
            .finish()
    }
}
