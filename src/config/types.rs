//! Configuration types for the payroll service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML service configuration file.

use serde::Deserialize;
use std::path::PathBuf;

use crate::report::DEFAULT_CURRENCY_SCALE;

/// Top-level service configuration.
///
/// Every section is optional in the file; missing sections take their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Export and payslip rendering settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// Optional seed data file used to populate the in-memory store.
    ///
    /// Relative paths are resolved against the directory holding the
    /// configuration file.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Export and payslip rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportConfig {
    /// Decimal places money is rounded to in exports and breakdowns.
    #[serde(default = "default_currency_scale")]
    pub currency_scale: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            currency_scale: default_currency_scale(),
        }
    }
}

fn default_currency_scale() -> u32 {
    DEFAULT_CURRENCY_SCALE
}
