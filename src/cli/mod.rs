//! CLI module for the student records service
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - ping: One-shot database connectivity check

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs, StoreArgs, MISSING_URL};
pub use commands::{ping, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
