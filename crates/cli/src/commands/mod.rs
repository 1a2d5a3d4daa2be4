//! CLI command implementations.

pub mod account;
pub mod basket;
pub mod catalog;
pub mod payments;

use std::path::PathBuf;
use std::sync::Arc;

use ddd_micro_client::{ClientConfig, ClientError, FileStore, LogRedirect, ShopClient};
use serde::Serialize;
use thiserror::Error;

/// Directory under `$HOME` holding the cached session.
const SESSION_DIR: &str = ".ddd-micro";

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ddd_micro_client::ConfigError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Invalid email: {0}")]
    Email(#[from] ddd_micro_core::EmailError),

    #[error("Could not encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("No session file configured and HOME is not set")]
    NoSessionFile,
}

/// Build a client from the environment with a file-backed session.
///
/// # Errors
///
/// Returns an error if configuration is invalid or no session file can be located.
pub fn connect() -> Result<ShopClient, CliError> {
    let config = ClientConfig::from_env()?;
    let path = session_file(&config)?;
    tracing::debug!(path = %path.display(), "Using session file");

    let shop = ShopClient::new(&config, Arc::new(FileStore::new(path)), Arc::new(LogRedirect))?;
    Ok(shop)
}

fn session_file(config: &ClientConfig) -> Result<PathBuf, CliError> {
    if let Some(path) = &config.session_file {
        return Ok(path.clone());
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(SESSION_DIR).join("session.json"))
        .ok_or(CliError::NoSessionFile)
}

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
