//! Integration tests for Slackgate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p slackgate-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `core_*` - Public API of `slackgate-core`
//! - `server_*` - Full router driven in-process with `tower::ServiceExt::oneshot`
//!
//! This library holds the shared fixtures: Slack's published sample request
//! and helpers for building signed HTTP requests.

use std::time::Duration;

use axum::{Router, body::Body, http::Request};
use secrecy::SecretString;
use slackgate_core::{SIGNATURE_HEADER, SigningSecret, TIMESTAMP_HEADER, sign};
use slackgate_server::{AppState, LogFormat, ServerConfig, SlackConfig};

/// Signing secret from Slack's request verification guide.
pub const SAMPLE_SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

/// Timestamp of Slack's sample request.
pub const SAMPLE_TIMESTAMP: &str = "1531420618";

/// Body of Slack's sample request.
pub const SAMPLE_BODY: &str = "token=xyzz0WbapA4vBCDEFasx0q6G&team_id=T1DC2JH3J&team_domain=testteamnow&channel_id=G8PSS9T3V&channel_name=foobar&user_id=U2CERLKJA&user_name=roadrunner&command=%2Fwebhook-collect&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1DC2JH3J%2F397700885554%2F96rGlfmibIGlgcZRskXaIFfN&trigger_id=398738663015.47445629121.803a0bc887a14d10d2c447fce8b6703c";

/// Signature Slack sent with the sample request.
pub const SAMPLE_SIGNATURE: &str =
    "v0=a2114d57b48eac39b9ad189dd8316235a7b4a8d21a10bd27519666489c69b503";

/// Secret for the sample vector.
#[must_use]
pub fn sample_secret() -> SigningSecret {
    SigningSecret::new(SAMPLE_SECRET)
}

/// Server configuration around the sample secret.
///
/// `max_request_age` of `None` allows replaying the fixed sample timestamp.
#[must_use]
pub fn test_config(max_body_bytes: usize, max_request_age: Option<Duration>) -> ServerConfig {
    ServerConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        slack: SlackConfig {
            signing_secret: SecretString::from(SAMPLE_SECRET),
            max_body_bytes,
            max_request_age,
        },
        log_format: LogFormat::Text,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The full application router with the given configuration.
#[must_use]
pub fn test_app(config: ServerConfig) -> Router {
    slackgate_server::app(AppState::new(config))
}

/// The current Unix time as a header value.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Build a request to `uri` carrying `signature` and `timestamp` headers.
///
/// # Panics
///
/// Panics if the request cannot be built (invalid header values).
#[must_use]
pub fn request_with(
    uri: &str,
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: impl Into<Body>,
) -> Request<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/x-www-form-urlencoded");
    if let Some(timestamp) = timestamp {
        builder = builder.header(TIMESTAMP_HEADER, timestamp);
    }
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(body.into()).expect("valid test request")
}

/// Build a request to `uri` correctly signed with the sample secret.
///
/// # Panics
///
/// Panics if signing fails.
#[must_use]
pub fn signed_request(uri: &str, timestamp: &str, body: &str) -> Request<Body> {
    let signature =
        sign(&sample_secret(), timestamp, body.as_bytes()).expect("HMAC accepts any key");
    request_with(uri, Some(timestamp), Some(&signature), body.to_owned())
}
