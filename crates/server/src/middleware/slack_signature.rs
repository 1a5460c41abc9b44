//! Slack request signature middleware.
//!
//! Drains the request body once, verifies the `X-Slack-Signature` header over
//! it, and forwards the request downstream with a fresh body over the same
//! bytes. Handlers behind this layer read the body exactly as Slack sent it.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use slackgate_core::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use tracing::{debug, instrument, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Reject any request that Slack did not sign.
///
/// - Unreadable or oversized body: 400, never treated as a verdict.
/// - Missing headers, stale timestamp, or bad signature: 401 with no detail.
///
/// # Errors
///
/// Returns [`AppError::BodyRead`] or [`AppError::Unauthorized`] as above.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn verify_slack_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let slack = state.config().slack();

    let bytes = axum::body::to_bytes(body, slack.max_body_bytes)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to read Slack request body");
            AppError::BodyRead(e.to_string())
        })?;

    let (Some(timestamp), Some(signature)) = (
        header_str(&parts.headers, TIMESTAMP_HEADER),
        header_str(&parts.headers, SIGNATURE_HEADER),
    ) else {
        warn!(body_len = bytes.len(), "Slack signature headers missing");
        return Err(AppError::Unauthorized);
    };

    if let Some(max_age) = slack.max_request_age {
        let now = chrono::Utc::now().timestamp();
        if !is_fresh(timestamp, now, max_age) {
            warn!(timestamp, "Slack request timestamp outside allowed window");
            return Err(AppError::Unauthorized);
        }
    }

    if !state.verifier().verify(timestamp, &bytes, signature) {
        warn!(body_len = bytes.len(), "Slack signature verification failed");
        return Err(AppError::Unauthorized);
    }

    debug!("Slack signature verified");

    // Reconstruct the request with the body
    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

/// A header that is absent or not visible ASCII counts as missing.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Whether `timestamp` (seconds since the epoch) is within `max_age` of `now`,
/// in either direction. Unparseable timestamps are never fresh.
fn is_fresh(timestamp: &str, now: i64, max_age: Duration) -> bool {
    timestamp
        .parse::<i64>()
        .is_ok_and(|ts| now.abs_diff(ts) <= max_age.as_secs())
}
