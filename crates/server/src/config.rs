//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SLACK_SIGNING_SECRET` - Slack app signing secret (App Credentials page)
//!
//! ## Optional
//! - `SLACKGATE_HOST` - Bind address (default: 127.0.0.1)
//! - `SLACKGATE_PORT` - Listen port (default: 3000)
//! - `SLACK_MAX_BODY_BYTES` - Largest accepted request body (default: 1048576)
//! - `SLACK_MAX_REQUEST_AGE_SECS` - Reject requests whose timestamp is further
//!   than this from the local clock (default: 300, `0` disables the check)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_MAX_REQUEST_AGE_SECS: u64 = 300;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "fillmein",
    "fill-me-in",
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Slack request verification settings
    pub slack: SlackConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Slack request verification settings.
///
/// Implements `Debug` manually to redact the signing secret.
#[derive(Clone)]
pub struct SlackConfig {
    /// Slack app signing secret.
    pub signing_secret: SecretString,
    /// Largest request body the server will buffer for verification.
    pub max_body_bytes: usize,
    /// Maximum clock skew between the request timestamp and now.
    /// `None` disables the freshness check.
    pub max_request_age: Option<Duration>,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("signing_secret", &"[REDACTED]")
            .field("max_body_bytes", &self.max_body_bytes)
            .field("max_request_age", &self.max_request_age)
            .finish()
    }
}

impl SlackConfig {
    /// Build a config around an already-validated secret, using defaults for
    /// everything else.
    #[must_use]
    pub const fn new(signing_secret: SecretString) -> Self {
        Self {
            signing_secret,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_request_age: Some(Duration::from_secs(DEFAULT_MAX_REQUEST_AGE_SECS)),
        }
    }

    fn from_source(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let signing_secret = get_validated_secret(env, "SLACK_SIGNING_SECRET")?;

        let max_body_bytes = parse_env_or_default(
            env,
            "SLACK_MAX_BODY_BYTES",
            DEFAULT_MAX_BODY_BYTES,
        )?;

        let max_age_secs = parse_env_or_default(
            env,
            "SLACK_MAX_REQUEST_AGE_SECS",
            DEFAULT_MAX_REQUEST_AGE_SECS,
        )?;
        let max_request_age = (max_age_secs > 0).then(|| Duration::from_secs(max_age_secs));

        Ok(Self {
            signing_secret,
            max_body_bytes,
            max_request_age,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the signing secret is empty or a placeholder. Low entropy only warns.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_source(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(env, "SLACKGATE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SLACKGATE_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or_default(env, "SLACKGATE_PORT", 3000_u16)?;

        let slack = SlackConfig::from_source(env)?;

        let log_format = match env("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let sentry_dsn = env("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            slack,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Slack configuration.
    #[must_use]
    pub const fn slack(&self) -> &SlackConfig {
        &self.slack
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env(key).map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is present and not a placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.trim().is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }

    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Check that a secret looks randomly generated.
///
/// Random hex secrets occasionally fall below the threshold, so callers
/// treat a failure as a warning.
fn check_secret_entropy(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy low ({entropy:.2} bits/char, expected >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the secret from the Slack app settings."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
///
/// Empty and placeholder values are rejected; low entropy only warns.
fn get_validated_secret(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<SecretString, ConfigError> {
    let value = get_required_env(env, key)?;
    validate_secret_strength(&value, key)?;
    if let Err(e) = check_secret_entropy(&value, key) {
        tracing::warn!("{key} validation warning: {e}");
    }
    Ok(SecretString::from(value))
}
