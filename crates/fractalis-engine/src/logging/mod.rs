//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the workspace logs
//! through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
