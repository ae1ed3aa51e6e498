//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `NFIELD_SERVER_URL`: Server base address (required)
//! - `NFIELD_TIMEOUT_SECS`: Request timeout in seconds
//! - `NFIELD_USER_AGENT`: User agent sent with every request
//! - `NFIELD_DOMAIN`, `NFIELD_USERNAME`, `NFIELD_PASSWORD`: Sign-in
//!   credentials, used only when all three are set
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./nfield.toml` or `./nfield.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use nfield_domain::constants::DEFAULT_TIMEOUT_SECS;
use nfield_domain::{ClientConfig, Credentials, NfieldError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["nfield.toml", "nfield.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the server address
/// is missing or a value is invalid, falls back to loading from a config
/// file.
///
/// # Errors
/// Returns `NfieldError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `NfieldError::Config` if `NFIELD_SERVER_URL` is missing or a
/// numeric variable cannot be parsed.
pub fn load_from_env() -> Result<ClientConfig> {
    let server_url = env_var("NFIELD_SERVER_URL")?;
    let timeout_seconds = match std::env::var("NFIELD_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| NfieldError::Config(format!("Invalid timeout: {}", e)))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };
    let user_agent = std::env::var("NFIELD_USER_AGENT").ok();

    let credentials = match (
        std::env::var("NFIELD_DOMAIN"),
        std::env::var("NFIELD_USERNAME"),
        std::env::var("NFIELD_PASSWORD"),
    ) {
        (Ok(domain), Ok(username), Ok(password)) => {
            Some(Credentials { domain, username, password })
        }
        _ => None,
    };

    Ok(ClientConfig { server_url, timeout_seconds, user_agent, credentials })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `NfieldError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NfieldError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NfieldError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NfieldError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NfieldError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NfieldError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(NfieldError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the
/// executable's directory, in that order.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `NfieldError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        NfieldError::Config(format!("Missing required environment variable: {}", key))
    })
}
