//! CLI argument definitions using clap
//!
//! Commands:
//! - feedback-api serve --config <path> [--host <h>] [--port <n>] [--data-file <f>]
//! - feedback-api list --config <path> [--data-file <f>]
//!
//! With no subcommand, `serve` runs with its defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "./feedback-api.json";

/// Product Feedback API - collect ratings and comments over HTTP
#[derive(Parser, Debug)]
#[command(name = "feedback-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides the config file
        #[arg(long)]
        port: Option<u16>,

        /// Feedback data file, overrides the config file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Print the stored feedback collection and exit
    List {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Feedback data file, overrides the config file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            host: None,
            port: None,
            data_file: None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
