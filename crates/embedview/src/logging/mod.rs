//! Logging setup.
//!
//! Library code logs through the `log` facade only. Binaries call
//! [`init_logging`] early in `main` to install `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
