//! Configuration loading for the payroll service.
//!
//! This module loads the service configuration and the optional seed data
//! file from YAML.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Listening on {}", loader.config().server.listen_addr);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ExportConfig, ServerConfig, ServiceConfig};
