use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the recipe finder
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Settling delay between the last filter edit and re-filtering, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// JSON catalog to load instead of the bundled one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            catalog_path: None,
        }
    }
}

// Default value functions
fn default_debounce_ms() -> u64 {
    300
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__DEBOUNCE_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config("recipe-finder")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Load configuration from `<file_stem>.toml` (optional) and the environment
pub fn load_config(file_stem: &str) -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_stem).required(false))
        // Use double underscore for nested keys: RECIPE_FINDER__DEBOUNCE_MS
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = FinderConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("definitely-not-a-recipe-finder-config").unwrap();
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finder.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "debounce_ms = 50").unwrap();
        writeln!(file, "catalog_path = \"/tmp/recipes.json\"").unwrap();

        let stem = dir.path().join("finder");
        let config = load_config(stem.to_str().unwrap()).unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/recipes.json")));
    }
}
