//! Settings describing a file-backed configuration source.
//!
//! Loaded from YAML, then adjusted by environment variables:
//! - `FLATCONF_ENVIRONMENT` - Environment name (root directory)
//! - `FLATCONF_FILES` - File list, separated like `PATH`
//! - `FLATCONF_FORMAT` - `by_extension`, `properties`, `json` or `yaml`

use crate::environment::Environment;
use crate::format::FormatSelection;
use crate::source::{DEFAULT_CONFIG_FILE, FilesConfigurationSource, StaticFilesProvider};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ENV_ENVIRONMENT: &str = "FLATCONF_ENVIRONMENT";
pub const ENV_FILES: &str = "FLATCONF_FILES";
pub const ENV_FORMAT: &str = "FLATCONF_FORMAT";

/// File source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Environment name; empty selects the home directory.
    #[serde(default)]
    pub environment: String,

    /// Files to read, in merge order.
    #[serde(default = "default_files")]
    pub files: Vec<PathBuf>,

    /// How each file's format is chosen.
    #[serde(default)]
    pub format: FormatSelection,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            environment: String::new(),
            files: default_files(),
            format: FormatSelection::default(),
        }
    }
}

fn default_files() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_CONFIG_FILE)]
}

impl SourceSettings {
    /// Load settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load settings from `path` if it exists, otherwise use defaults; then
    /// apply environment variable overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Apply `FLATCONF_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(environment) = lookup(ENV_ENVIRONMENT) {
            self.environment = environment;
        }

        if let Some(files) = lookup(ENV_FILES) {
            self.files = std::env::split_paths(&files)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            match format.parse() {
                Ok(selection) => self.format = selection,
                Err(e) => warn!("Ignoring {}: {}", ENV_FORMAT, e),
            }
        }
    }

    pub fn environment(&self) -> Environment {
        Environment::new(self.environment.clone())
    }

    /// Build the file source these settings describe.
    pub fn build_source(&self) -> FilesConfigurationSource {
        FilesConfigurationSource::with_files(StaticFilesProvider::new(self.files.clone()))
            .with_format(self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FileFormat;
    use crate::source::ConfigurationSource;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = SourceSettings::default();
        assert!(settings.environment().is_default());
        assert_eq!(settings.files, vec![PathBuf::from("application.properties")]);
        assert_eq!(settings.format, FormatSelection::Fixed(FileFormat::Properties));
    }

    #[test]
    fn test_from_yaml_fills_missing_fields() {
        let settings = SourceSettings::from_yaml("environment: /etc/app\nformat: json\n").unwrap();
        assert_eq!(settings.environment, "/etc/app");
        assert_eq!(settings.files, default_files());
        assert_eq!(settings.format, FormatSelection::Fixed(FileFormat::Json));
        assert_eq!(SourceSettings::from_yaml("").unwrap(), SourceSettings::default());
    }

    #[test]
    fn test_invalid_format_is_an_error() {
        assert!(SourceSettings::from_yaml("format: toml\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, String> = HashMap::from([
            (ENV_ENVIRONMENT, "/srv/conf".to_string()),
            (
                ENV_FILES,
                std::env::join_paths(["a.properties", "b.json"])
                    .unwrap()
                    .into_string()
                    .unwrap(),
            ),
            (ENV_FORMAT, "yaml".to_string()),
        ]);

        let mut settings = SourceSettings::default();
        settings.apply_overrides(|name| vars.get(name).cloned());

        assert_eq!(settings.environment, "/srv/conf");
        assert_eq!(
            settings.files,
            vec![PathBuf::from("a.properties"), PathBuf::from("b.json")]
        );
        assert_eq!(settings.format, FormatSelection::Fixed(FileFormat::Yaml));
    }

    #[test]
    fn test_bad_format_override_is_ignored() {
        let mut settings = SourceSettings::default();
        settings.apply_overrides(|name| (name == ENV_FORMAT).then(|| "xml".to_string()));
        assert_eq!(settings.format, FormatSelection::default());
    }

    #[test]
    fn test_load_and_build_source() {
        let temp = TempDir::new().unwrap();
        let conf_dir = temp.path().join("conf");
        std::fs::create_dir_all(&conf_dir).unwrap();
        std::fs::write(conf_dir.join("app.yaml"), "db:\n  host: localhost\n").unwrap();

        let settings_path = temp.path().join("flatconf.yaml");
        std::fs::write(
            &settings_path,
            format!(
                "environment: {}\nfiles: [app.yaml]\nformat: by_extension\n",
                conf_dir.display()
            ),
        )
        .unwrap();

        let settings = SourceSettings::load(&settings_path).unwrap();
        assert_eq!(settings.format, FormatSelection::ByExtension);
        assert_eq!(settings.build_source().formats(), FormatSelection::ByExtension);
        let config = settings
            .build_source()
            .get_configuration(&settings.environment())
            .unwrap();
        assert_eq!(config.get("db.host"), Some("localhost"));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let err = SourceSettings::load(temp.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }
}
