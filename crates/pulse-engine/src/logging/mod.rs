//! Logging utilities.
//!
//! Native logger setup. Library code only talks to the `log` facade; the web
//! bridge installs its own console backend.

mod init;

pub use init::{init_logging, LoggingConfig};
