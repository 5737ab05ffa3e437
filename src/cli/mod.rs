//! CLI module for the feedback API
//!
//! Provides command-line interface for:
//! - serve: Hydrate the store and run the HTTP server (default)
//! - list: One-shot dump of the stored collection

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{default_data_path, init_logging, list, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
