//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration and its seed data from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::store::SeedData;

use super::types::ServiceConfig;

/// Loads and provides access to the service configuration.
///
/// # File Layout
///
/// ```text
/// config/
/// ├── payroll.yaml   # Service configuration
/// └── seed.yaml      # Optional seed records, named by `seed_path`
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// let seed = loader.load_seed()?;
/// println!("Seeded {} employees", seed.map_or(0, |s| s.employees.len()));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable ([`EngineError::ConfigNotFound`])
    /// - The file contains invalid YAML or unknown values
    ///   ([`EngineError::ConfigParseError`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<ServiceConfig>(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { config, base_dir })
    }

    /// Wraps an already-built configuration. Relative seed paths resolve
    /// against `base_dir`.
    pub fn from_config(config: ServiceConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The seed file location, resolved against the configuration directory.
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.config
            .seed_path
            .as_ref()
            .map(|seed| self.base_dir.join(seed))
    }

    /// Loads the seed file if one is configured.
    ///
    /// Returns `Ok(None)` when no `seed_path` is set. A configured but
    /// missing or malformed file is an error.
    pub fn load_seed(&self) -> EngineResult<Option<SeedData>> {
        self.seed_path()
            .map(|path| Self::load_yaml::<SeedData>(&path))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn config_path() -> &'static str {
        "./config/payroll.yaml"
    }

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("payroll-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_bundled_config() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config().server.listen_addr, "127.0.0.1:3000");
        assert_eq!(loader.config().export.currency_scale, 2);
        assert_eq!(
            loader.seed_path(),
            Some(PathBuf::from("./config").join("seed.yaml"))
        );
    }

    #[test]
    fn test_load_bundled_seed() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let seed = loader.load_seed().unwrap().unwrap();
        assert_eq!(seed.employees.len(), 4);
        assert_eq!(seed.attendance.len(), 5);
        assert_eq!(seed.cash_advances.len(), 2);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/payroll.yaml");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sections_take_defaults() {
        let path = write_temp("payroll.yaml", "seed_path: null\n");
        let loader = ConfigLoader::load(&path).unwrap();
        assert_eq!(loader.config(), &ServiceConfig::default());
        assert_eq!(loader.config().export.currency_scale, 2);
        assert!(loader.load_seed().unwrap().is_none());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let path = write_temp("payroll.yaml", "export:\n  currency_scale: two\n");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_configured_but_missing_seed_is_error() {
        let path = write_temp("payroll.yaml", "seed_path: missing.yaml\n");
        let loader = ConfigLoader::load(&path).unwrap();
        assert!(matches!(
            loader.load_seed(),
            Err(EngineError::ConfigNotFound { .. })
        ));
    }
}
