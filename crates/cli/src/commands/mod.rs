//! CLI commands.
//!
//! Each command returns its output instead of printing it, so `main` owns
//! stdout and the commands stay testable.

pub mod config;
pub mod parse;
pub mod sign;
pub mod verify;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use secrecy::SecretString;
use slackgate_core::{BodyReadError, BufferedBody, SignatureError, SigningSecret};
use slackgate_server::ConfigError;
use thiserror::Error;

/// Environment variable read for the signing secret unless overridden.
pub const DEFAULT_SECRET_ENV: &str = "SLACK_SIGNING_SECRET";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Signing secret environment variable is missing or empty.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Body file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// Body could not be read.
    #[error(transparent)]
    BodyRead(#[from] BodyReadError),

    /// Signing failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Output serialization failed.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// Server configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Load the signing secret from `var`, honoring a `.env` file.
///
/// The value is never echoed, including in errors.
pub fn load_secret(var: &str) -> Result<SigningSecret, CliError> {
    dotenvy::dotenv().ok();

    let value = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::MissingEnvVar(var.to_owned()))?;

    Ok(SigningSecret::from(SecretString::from(value)))
}

/// Open the body source: `path` if given, stdin otherwise.
pub fn open_body(path: Option<&Path>) -> Result<Box<dyn Read>, CliError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.display().to_string(),
                source,
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdin().lock())),
    }
}

/// Read the whole body from `path` or stdin.
pub fn read_body(path: Option<&Path>) -> Result<BufferedBody, CliError> {
    Ok(BufferedBody::read_from(open_body(path)?)?)
}
