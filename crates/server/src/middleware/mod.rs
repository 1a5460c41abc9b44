//! HTTP middleware.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Slack signature verification (Slack routes only, as a route layer)

mod slack_signature;

pub use slack_signature::verify_slack_signature;
