//! `slackgate sign` - compute the signature Slack would send.

use slackgate_core::{BufferedBody, SigningSecret, sign};

use super::CliError;

/// Sign `body` at `timestamp`, returning `v0=<hex>`.
pub fn run(secret: &SigningSecret, timestamp: &str, body: &BufferedBody) -> Result<String, CliError> {
    let signature = sign(secret, timestamp, body.as_bytes())?;
    tracing::debug!(body_len = body.len(), "Request signed");
    Ok(signature)
}
