//! Logging utilities.
//!
//! Components emit diagnostics through the `log` facade; this module only
//! installs the `env_logger` backend, driven by configuration.

mod init;

pub use init::{init_logging, LoggingConfig};
