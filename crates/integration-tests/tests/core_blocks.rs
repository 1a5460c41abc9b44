//! Integration tests for Block Kit response building.
//!
//! These tests compare rendered JSON against the shapes Slack documents for
//! each block type.

use serde_json::{Value, json};

use slackgate_core::{Accessory, Button, ButtonStyle, ImageElement, MessageBuilder, Text};

fn render(builder: MessageBuilder) -> Value {
    let json = builder.render_json().expect("blocks serialize");
    serde_json::from_str(&json).expect("valid JSON")
}

// =============================================================================
// Response Envelope Tests
// =============================================================================

#[test]
fn test_default_response_is_ephemeral_without_blocks() {
    let value = render(MessageBuilder::new().with_fallback("hi"));

    assert_eq!(value, json!({"text": "hi", "response_type": "ephemeral"}));
}

#[test]
fn test_send_to_channel() {
    let value = render(MessageBuilder::new().send_to_channel().divider());

    assert_eq!(value["response_type"], "in_channel");
    assert_eq!(value["blocks"], json!([{"type": "divider"}]));
}

// =============================================================================
// Block Shape Tests
// =============================================================================

#[test]
fn test_full_message_wire_shape() {
    let value = render(
        MessageBuilder::new()
            .with_fallback("Deploy finished")
            .section(
                "summary",
                "*Deploy* finished",
                Some(Accessory::Image(ImageElement::new(
                    "https://example.com/ok.png",
                    "ok",
                ))),
                vec![Text::mrkdwn("*Env*\nprod"), Text::plain("42s")],
            )
            .divider()
            .context("", Text::mrkdwn("by <@U123>"), [])
            .actions(
                "buttons",
                Button::new("Open")
                    .action_id("open")
                    .url("https://example.com")
                    .style(ButtonStyle::Primary),
                [],
            )
            .image("", "https://example.com/graph.png", "graph", "Latency"),
    );

    assert_eq!(
        value["blocks"],
        json!([
            {
                "type": "section",
                "block_id": "summary",
                "text": {"type": "mrkdwn", "text": "*Deploy* finished"},
                "fields": [
                    {"type": "mrkdwn", "text": "*Env*\nprod"},
                    {"type": "plain_text", "text": "42s", "emoji": true}
                ],
                "accessory": {
                    "type": "image",
                    "image_url": "https://example.com/ok.png",
                    "alt_text": "ok"
                }
            },
            {"type": "divider"},
            {
                "type": "context",
                "elements": [{"type": "mrkdwn", "text": "by <@U123>"}]
            },
            {
                "type": "actions",
                "block_id": "buttons",
                "elements": [{
                    "type": "button",
                    "text": {"type": "plain_text", "text": "Open", "emoji": true},
                    "action_id": "open",
                    "url": "https://example.com",
                    "style": "primary"
                }]
            },
            {
                "type": "image",
                "image_url": "https://example.com/graph.png",
                "alt_text": "graph",
                "title": {"type": "plain_text", "text": "Latency", "emoji": true}
            }
        ])
    );
}
