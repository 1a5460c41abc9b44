//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check (unauthenticated)
//!
//! # Slack (signature verified)
//! POST /slack/commands         - Slash command invocations
//! ```

pub mod slack;

use axum::Router;

use crate::state::AppState;

/// Build the application router with all routes.
#[must_use]
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new().merge(slack::router(state))
}
