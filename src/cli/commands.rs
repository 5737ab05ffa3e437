//! CLI command implementations
//!
//! Boot order for `serve`: load config, apply flag overrides, hydrate the
//! store, bind, serve until interrupted.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::feedback::{FeedbackStore, JsonFileBackend, WriteMode};
use crate::http_server::{shutdown_signal, HttpServer, HttpServerConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// File name of the data file when none is configured
pub const DEFAULT_DATA_FILE: &str = "feedback.json";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Feedback data file (optional, default: feedback.json next to the executable)
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// How the data file is replaced on save (optional, default "overwrite")
    #[serde(default)]
    pub write_mode: WriteMode,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file. A missing file yields defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config: {}",
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if let Some(path) = &self.data_file {
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error("data_file must not be empty"));
            }
        }

        Ok(())
    }

    /// Resolved data file path
    pub fn data_path(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_path)
    }

    /// Build the backend for the configured data file
    pub fn backend(&self) -> JsonFileBackend {
        JsonFileBackend::with_mode(self.data_path(), self.write_mode)
    }
}

/// `feedback.json` in the executable's directory, or the working directory
/// when that cannot be determined.
pub fn default_data_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DATA_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed, e.g. by an embedding binary
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging();
    run_command(cli.command.unwrap_or_default())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            data_file,
        } => {
            let mut config = Config::load(&config)?;
            apply_overrides(&mut config, host, port, data_file);
            serve(config)
        }
        Command::List { config, data_file } => {
            let mut config = Config::load(&config)?;
            apply_overrides(&mut config, None, None, data_file);
            list(&config)
        }
    }
}

fn apply_overrides(
    config: &mut Config,
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) {
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }
    if data_file.is_some() {
        config.data_file = data_file;
    }
}

/// Hydrate the store and serve HTTP until SIGINT/SIGTERM
pub fn serve(config: Config) -> CliResult<()> {
    let backend = config.backend();
    info!(
        "Feedback data will be stored in: {} ({:?} writes)",
        backend.path().display(),
        backend.mode()
    );

    let store = FeedbackStore::initialize(Box::new(backend));
    let server = HttpServer::with_config(config.http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start(shutdown_signal())
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Write the stored collection to stdout
pub fn list(config: &Config) -> CliResult<()> {
    let store = FeedbackStore::initialize(Box::new(config.backend()));

    write_response(json!({
        "count": store.len(),
        "feedback": store.all(),
    }))
}
