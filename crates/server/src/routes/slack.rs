//! Slack slash command handler.
//!
//! Requests reach the handler only after the signature layer has verified
//! them, and the body it receives is the same bytes that were verified.

use axum::{Json, Router, body::Bytes, middleware::from_fn_with_state, routing::post};
use slackgate_core::{CommandPayload, MessageBuilder, SlackResponse, Text};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::middleware::verify_slack_signature;
use crate::state::AppState;

/// Create Slack routes, all behind signature verification.
///
/// The layer wraps only the handlers, so unsupported methods get 405.
#[must_use]
pub fn router(state: &AppState) -> Router<AppState> {
    let verified = from_fn_with_state(state.clone(), verify_slack_signature);

    Router::new().route(
        "/slack/commands",
        post(handle_command).route_layer(verified),
    )
}

/// Handle a slash command invocation.
///
/// Replies with an ephemeral message visible only to the invoking user.
#[instrument(skip_all)]
async fn handle_command(body: Bytes) -> Result<Json<SlackResponse>, AppError> {
    let payload = CommandPayload::from_form(&body);

    if payload.command.is_empty() {
        return Err(AppError::BadRequest("missing command".into()));
    }

    info!(
        command = %payload.command,
        team_id = %payload.team_id,
        user_id = %payload.user_id,
        "Slash command received"
    );

    Ok(Json(build_command_response(&payload)))
}

/// Build the acknowledgement message for a slash command.
#[must_use]
pub fn build_command_response(payload: &CommandPayload) -> SlackResponse {
    let mut builder = MessageBuilder::new()
        .with_fallback(format!("{} received", payload.command))
        .section(
            "command",
            format!(
                "*{}* received from <@{}>",
                payload.command, payload.user_id
            ),
            None,
            Vec::new(),
        );

    if !payload.text.is_empty() {
        builder = builder.section("text", format!("> {}", payload.text), None, Vec::new());
    }

    builder
        .context(
            "origin",
            Text::mrkdwn(format!(
                "{} · #{}",
                payload.team_domain, payload.channel_name
            )),
            [],
        )
        .into_response()
}

#[cfg(test)]
mod tests {
    use slackgate_core::{Block, ResponseType};

    use super::*;

    fn payload(text: &str) -> CommandPayload {
        CommandPayload {
            command: "/deploy".to_string(),
            text: text.to_string(),
            user_id: "U2CERLKJA".to_string(),
            team_domain: "testteamnow".to_string(),
            channel_name: "foobar".to_string(),
            ..CommandPayload::default()
        }
    }

    #[test]
    fn test_command_response_is_ephemeral() {
        let response = build_command_response(&payload(""));
        assert_eq!(response.response_type, ResponseType::Ephemeral);
        assert_eq!(response.text, "/deploy received");
    }

    #[test]
    fn test_command_response_without_text() {
        let response = build_command_response(&payload(""));

        assert_eq!(response.blocks.len(), 2);
        assert!(matches!(response.blocks.first(), Some(Block::Section { .. })));
        assert!(matches!(response.blocks.last(), Some(Block::Context { .. })));
    }

    #[test]
    fn test_command_response_echoes_text() {
        let response = build_command_response(&payload("prod now"));

        assert_eq!(response.blocks.len(), 3);
        let json = serde_json::to_string(&response).unwrap_or_default();
        assert!(json.contains("> prod now"));
        assert!(json.contains("<@U2CERLKJA>"));
        assert!(json.contains("testteamnow"));
    }
}
