//! Slack Block Kit types for slash command responses.
//!
//! These types cover the subset of Block Kit a command response needs. Every
//! slot is a closed enum, so a message either serializes to a shape Slack
//! accepts or does not compile.
//!
//! See: <https://api.slack.com/block-kit>

use serde::Serialize;

// =============================================================================
// Response
// =============================================================================

/// Who sees a command response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the user who invoked the command.
    #[default]
    Ephemeral,
    /// Everyone in the channel the command was invoked from.
    InChannel,
}

/// The JSON document returned to Slack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlackResponse {
    /// Fallback text for clients that cannot render blocks.
    pub text: String,
    /// Message visibility.
    pub response_type: ResponseType,
    /// Message blocks, in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}

// =============================================================================
// Composition Objects
// =============================================================================

/// Text object types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    /// Plain text (no formatting).
    PlainText {
        text: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        emoji: bool,
    },
    /// Markdown text (supports formatting).
    Mrkdwn { text: String },
}

impl Text {
    /// Create a plain text object that renders emoji shortcodes.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    /// Create a markdown text object.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

// =============================================================================
// Elements
// =============================================================================

/// An image element (section accessory or context element).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageElement {
    pub image_url: String,
    pub alt_text: String,
}

impl ImageElement {
    #[must_use]
    pub fn new(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Button style (affects color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    /// Green primary button.
    Primary,
    /// Red danger button.
    Danger,
}

/// Interactive button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    /// Label; Slack only accepts `plain_text` here.
    pub text: Text,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
}

impl Button {
    /// Create a button with a plain text label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            text: Text::plain(label),
            action_id: None,
            url: None,
            value: None,
            style: None,
        }
    }

    #[must_use]
    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.action_id = Some(action_id.into());
        self
    }

    /// Open `url` in the user's browser when clicked.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub const fn style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Accessory elements for section blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    Image(ImageElement),
    Button(Button),
}

/// Context block elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    /// Markdown text in context.
    Mrkdwn { text: String },
    /// Plain text in context.
    PlainText {
        text: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        emoji: bool,
    },
    /// Small inline image.
    Image(ImageElement),
}

impl From<Text> for ContextElement {
    fn from(text: Text) -> Self {
        match text {
            Text::PlainText { text, emoji } => Self::PlainText { text, emoji },
            Text::Mrkdwn { text } => Self::Mrkdwn { text },
        }
    }
}

impl From<ImageElement> for ContextElement {
    fn from(image: ImageElement) -> Self {
        Self::Image(image)
    }
}

/// Action block elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    Button(Button),
}

impl From<Button> for ActionElement {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// Block Kit block types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Section block with text, optional fields and an optional accessory.
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        text: Text,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<Text>,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
    /// Divider block (horizontal line).
    Divider,
    /// Context block with small muted text/images.
    Context {
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        elements: Vec<ContextElement>,
    },
    /// Actions block with interactive elements.
    Actions {
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        elements: Vec<ActionElement>,
    },
    /// Full-width image.
    Image {
        image_url: String,
        alt_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<Text>,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`SlackResponse`] one block at a time.
///
/// Responses are ephemeral unless [`MessageBuilder::send_to_channel`] is
/// called. Block ids are optional in Slack; pass an empty string to omit one.
///
/// # Example
///
/// ```
/// use slackgate_core::{MessageBuilder, Text};
///
/// let json = MessageBuilder::new()
///     .with_fallback("Deploy started")
///     .section("status", "*Deploy* started", None, Vec::new())
///     .divider()
///     .context("meta", Text::mrkdwn("by <@U123>"), [])
///     .render_json()
///     .unwrap();
///
/// assert!(json.contains(r#""response_type":"ephemeral""#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    text: String,
    response_type: ResponseType,
    blocks: Vec<Block>,
}

impl MessageBuilder {
    /// Start an empty, ephemeral response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcast the response to the whole channel instead of only the invoker.
    #[must_use]
    pub const fn send_to_channel(mut self) -> Self {
        self.response_type = ResponseType::InChannel;
        self
    }

    /// Set the fallback text.
    #[must_use]
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a section block with markdown `text`.
    #[must_use]
    pub fn section(
        mut self,
        block_id: &str,
        text: impl Into<String>,
        accessory: Option<Accessory>,
        fields: Vec<Text>,
    ) -> Self {
        self.blocks.push(Block::Section {
            block_id: non_empty(block_id),
            text: Text::mrkdwn(text),
            fields,
            accessory,
        });
        self
    }

    /// Append a divider.
    #[must_use]
    pub fn divider(mut self) -> Self {
        self.blocks.push(Block::Divider);
        self
    }

    /// Append a context block. Slack requires at least one element.
    #[must_use]
    pub fn context(
        mut self,
        block_id: &str,
        element: impl Into<ContextElement>,
        more: impl IntoIterator<Item = ContextElement>,
    ) -> Self {
        let elements = std::iter::once(element.into()).chain(more).collect();
        self.blocks.push(Block::Context {
            block_id: non_empty(block_id),
            elements,
        });
        self
    }

    /// Append an actions block. Slack requires at least one element.
    #[must_use]
    pub fn actions(
        mut self,
        block_id: &str,
        element: impl Into<ActionElement>,
        more: impl IntoIterator<Item = ActionElement>,
    ) -> Self {
        let elements = std::iter::once(element.into()).chain(more).collect();
        self.blocks.push(Block::Actions {
            block_id: non_empty(block_id),
            elements,
        });
        self
    }

    /// Append an image block. An empty `title` is omitted.
    #[must_use]
    pub fn image(
        mut self,
        block_id: &str,
        image_url: impl Into<String>,
        alt_text: impl Into<String>,
        title: &str,
    ) -> Self {
        self.blocks.push(Block::Image {
            image_url: image_url.into(),
            alt_text: alt_text.into(),
            title: (!title.is_empty()).then(|| Text::plain(title)),
            block_id: non_empty(block_id),
        });
        self
    }

    /// The blocks added so far, in order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Consume the builder and return only the blocks.
    #[must_use]
    pub fn build(self) -> Vec<Block> {
        self.blocks
    }

    /// Consume the builder and return the full response document.
    #[must_use]
    pub fn into_response(self) -> SlackResponse {
        SlackResponse {
            text: self.text,
            response_type: self.response_type,
            blocks: self.blocks,
        }
    }

    /// Serialize the response document.
    ///
    /// # Errors
    ///
    /// Returns error if JSON serialization fails.
    pub fn render_json(self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.into_response())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn test_default_response_is_ephemeral() {
        let response = MessageBuilder::new().with_fallback("hi").into_response();
        assert_eq!(
            to_json(&response),
            json!({"text": "hi", "response_type": "ephemeral"})
        );
    }

    #[test]
    fn test_send_to_channel() {
        let response = MessageBuilder::new().send_to_channel().into_response();
        assert_eq!(response.response_type, ResponseType::InChannel);
        assert_eq!(to_json(&response)["response_type"], "in_channel");
    }

    #[test]
    fn test_text_objects() {
        assert_eq!(
            to_json(&Text::mrkdwn("*bold*")),
            json!({"type": "mrkdwn", "text": "*bold*"})
        );
        assert_eq!(
            to_json(&Text::plain("hi :wave:")),
            json!({"type": "plain_text", "text": "hi :wave:", "emoji": true})
        );
        assert_eq!(
            to_json(&Text::PlainText {
                text: "raw".to_string(),
                emoji: false
            }),
            json!({"type": "plain_text", "text": "raw"})
        );
    }

    #[test]
    fn test_section_with_fields_and_image_accessory() {
        let blocks = MessageBuilder::new()
            .section(
                "summary",
                "*Build* passed",
                Some(Accessory::Image(ImageElement::new(
                    "https://example.com/ok.png",
                    "ok",
                ))),
                vec![Text::mrkdwn("*Branch*\nmain"), Text::mrkdwn("*Took*\n42s")],
            )
            .build();

        assert_eq!(
            to_json(&blocks),
            json!([{
                "type": "section",
                "block_id": "summary",
                "text": {"type": "mrkdwn", "text": "*Build* passed"},
                "fields": [
                    {"type": "mrkdwn", "text": "*Branch*\nmain"},
                    {"type": "mrkdwn", "text": "*Took*\n42s"}
                ],
                "accessory": {
                    "type": "image",
                    "image_url": "https://example.com/ok.png",
                    "alt_text": "ok"
                }
            }])
        );
    }

    #[test]
    fn test_section_omits_empty_optionals() {
        let blocks = MessageBuilder::new().section("", "plain", None, Vec::new()).build();
        assert_eq!(
            to_json(&blocks),
            json!([{"type": "section", "text": {"type": "mrkdwn", "text": "plain"}}])
        );
    }

    #[test]
    fn test_section_with_button_accessory() {
        let button = Button::new("Open")
            .action_id("open_dashboard")
            .url("https://example.com")
            .style(ButtonStyle::Primary);
        let blocks = MessageBuilder::new()
            .section("s1", "Dashboard", Some(Accessory::Button(button)), Vec::new())
            .build();

        assert_eq!(
            to_json(&blocks)[0]["accessory"],
            json!({
                "type": "button",
                "text": {"type": "plain_text", "text": "Open", "emoji": true},
                "action_id": "open_dashboard",
                "url": "https://example.com",
                "style": "primary"
            })
        );
    }

    #[test]
    fn test_divider() {
        let blocks = MessageBuilder::new().divider().build();
        assert_eq!(to_json(&blocks), json!([{"type": "divider"}]));
    }

    #[test]
    fn test_context_elements_keep_order() {
        let blocks = MessageBuilder::new()
            .context(
                "ctx",
                Text::mrkdwn("first"),
                [
                    ContextElement::from(ImageElement::new("https://example.com/a.png", "a")),
                    ContextElement::from(Text::plain("third")),
                ],
            )
            .build();

        assert_eq!(
            to_json(&blocks),
            json!([{
                "type": "context",
                "block_id": "ctx",
                "elements": [
                    {"type": "mrkdwn", "text": "first"},
                    {"type": "image", "image_url": "https://example.com/a.png", "alt_text": "a"},
                    {"type": "plain_text", "text": "third", "emoji": true}
                ]
            }])
        );
    }

    #[test]
    fn test_actions_block() {
        let blocks = MessageBuilder::new()
            .actions(
                "buttons",
                Button::new("Approve")
                    .value("approve")
                    .style(ButtonStyle::Primary),
                [ActionElement::from(
                    Button::new("Reject")
                        .value("reject")
                        .style(ButtonStyle::Danger),
                )],
            )
            .build();

        let Some(Block::Actions { elements, .. }) = blocks.first() else {
            panic!("expected actions block");
        };
        assert_eq!(elements.len(), 2);
        assert_eq!(to_json(&blocks)[0]["elements"][1]["style"], "danger");
        assert_eq!(to_json(&blocks)[0]["elements"][0]["type"], "button");
    }

    #[test]
    fn test_image_block() {
        let blocks = MessageBuilder::new()
            .image("img", "https://example.com/cat.png", "a cat", "Cat")
            .image("", "https://example.com/dog.png", "a dog", "")
            .build();

        assert_eq!(
            to_json(&blocks),
            json!([
                {
                    "type": "image",
                    "image_url": "https://example.com/cat.png",
                    "alt_text": "a cat",
                    "title": {"type": "plain_text", "text": "Cat", "emoji": true},
                    "block_id": "img"
                },
                {
                    "type": "image",
                    "image_url": "https://example.com/dog.png",
                    "alt_text": "a dog"
                }
            ])
        );
    }

    #[test]
    fn test_render_json_full_document() {
        let json = MessageBuilder::new()
            .with_fallback("Deployed")
            .send_to_channel()
            .section("", "*Deployed* v1.2.3", None, Vec::new())
            .divider()
            .render_json()
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "Deployed",
                "response_type": "in_channel",
                "blocks": [
                    {"type": "section", "text": {"type": "mrkdwn", "text": "*Deployed* v1.2.3"}},
                    {"type": "divider"}
                ]
            })
        );
        assert!(value.get("attachments").is_none());
    }

    #[test]
    fn test_blocks_accessor_matches_build() {
        let builder = MessageBuilder::new().divider().divider();
        assert_eq!(builder.blocks().len(), 2);
        assert_eq!(builder.build().len(), 2);
    }
}
