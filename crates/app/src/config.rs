//! Startup configuration: built-in defaults, an optional TOML file, then
//! environment and command-line overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use topic_core::catalog::Catalog;
use topic_core::model::{SelectionSettings, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Keys accepted in the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub categories: Option<Vec<String>>,
    pub per_category: Option<u32>,
    pub stable: Option<bool>,
    /// Catalog file; relative paths are resolved against the config file's directory.
    pub catalog: Option<PathBuf>,
}

impl ConfigFile {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut file: Self = parse_toml(path)?;
        if let (Some(catalog), Some(dir)) = (file.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }
        Ok(file)
    }
}

/// Values coming from the environment or flags; these win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub categories: Vec<String>,
    pub per_category: Option<u32>,
    pub stable: Option<bool>,
    pub catalog: Option<PathBuf>,
}

/// Fully resolved startup state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: Catalog,
    pub settings: SelectionSettings,
}

impl AppConfig {
    /// Layer overrides on top of the file and fill the gaps with defaults.
    ///
    /// With no categories configured anywhere, every catalog category is selected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog file cannot be loaded or the resulting
    /// selection settings are out of range.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self, ConfigError> {
        let catalog = match overrides.catalog.or(file.catalog) {
            Some(path) => load_catalog(&path)?,
            None => Catalog::builtin(),
        };

        let defaults = SelectionSettings::default_for(&catalog);
        let categories = if overrides.categories.is_empty() {
            file.categories
                .unwrap_or_else(|| defaults.categories().to_vec())
        } else {
            overrides.categories
        };
        let per_category = overrides
            .per_category
            .or(file.per_category)
            .unwrap_or(defaults.per_category());
        let stable = overrides
            .stable
            .or(file.stable)
            .unwrap_or(defaults.stable());

        let settings = SelectionSettings::new(categories, per_category, stable)?;
        Ok(Self { catalog, settings })
    }
}

/// Load a catalog from a TOML file of `[[categories]]` tables.
///
/// # Errors
///
/// Returns `ConfigError::Read` or `ConfigError::Parse`; catalog validation
/// failures surface as parse errors.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    parse_toml(path)
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RUST_CATALOG: &str = r#"
[[categories]]
name = "Rust"

[[categories.topics]]
title = "Ownership"
description = "Every value has exactly one owner."

[[categories.topics]]
title = "Lifetimes"
description = "How long references stay valid."
"#;

    #[test]
    fn defaults_select_all_builtin_categories() {
        let config = AppConfig::resolve(ConfigFile::default(), Overrides::default()).unwrap();
        assert_eq!(config.catalog, Catalog::builtin());
        assert_eq!(config.settings.categories().len(), 6);
        assert_eq!(config.settings.per_category(), 1);
        assert!(config.settings.stable());
    }

    #[test]
    fn overrides_beat_file_values() {
        let file = ConfigFile {
            categories: Some(vec!["SQL".into()]),
            per_category: Some(2),
            stable: Some(true),
            catalog: None,
        };
        let overrides = Overrides {
            categories: vec!["NLP".into(), "Python".into()],
            per_category: Some(3),
            stable: Some(false),
            catalog: None,
        };
        let config = AppConfig::resolve(file, overrides).unwrap();
        assert_eq!(config.settings.categories(), ["NLP", "Python"]);
        assert_eq!(config.settings.per_category(), 3);
        assert!(!config.settings.stable());
    }

    #[test]
    fn file_values_fill_missing_overrides() {
        let file = ConfigFile {
            categories: Some(vec!["SQL".into()]),
            per_category: Some(2),
            stable: None,
            catalog: None,
        };
        let config = AppConfig::resolve(file, Overrides::default()).unwrap();
        assert_eq!(config.settings.categories(), ["SQL"]);
        assert_eq!(config.settings.per_category(), 2);
        assert!(config.settings.stable());
    }

    #[test]
    fn out_of_range_count_is_rejected() {
        let overrides = Overrides {
            per_category: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            AppConfig::resolve(ConfigFile::default(), overrides),
            Err(ConfigError::Settings(SettingsError::PerCategoryOutOfRange {
                provided: 0
            }))
        ));
    }

    #[test]
    fn loads_file_with_relative_catalog() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rust.toml"), RUST_CATALOG).unwrap();
        let config_path = dir.path().join("topics.toml");
        fs::write(
            &config_path,
            "catalog = \"rust.toml\"\nper_category = 2\nstable = false\n",
        )
        .unwrap();

        let file = ConfigFile::load(&config_path).unwrap();
        assert_eq!(file.catalog, Some(dir.path().join("rust.toml")));

        let config = AppConfig::resolve(file, Overrides::default()).unwrap();
        assert_eq!(config.settings.categories(), ["Rust"]);
        assert_eq!(config.catalog.topics_in("Rust").len(), 2);
        assert!(!config.settings.stable());
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.toml");
        fs::write(&path, "per_categroy = 2\n").unwrap();
        assert!(matches!(
            ConfigFile::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn duplicate_topics_in_catalog_file_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(
            &path,
            r#"
[[categories]]
name = "Rust"
topics = [
  { title = "Traits", description = "a" },
  { title = "Traits", description = "b" },
]
"#,
        )
        .unwrap();
        assert!(matches!(
            load_catalog(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ConfigFile::load(&dir.path().join("nope.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
