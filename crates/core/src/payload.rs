//! Slash command payloads.
//!
//! Slack posts slash commands as `application/x-www-form-urlencoded` bodies.
//! Only parse a body after its signature has been verified.

use serde::Serialize;

/// Fields Slack sends with a slash command.
///
/// Every field is the decoded form value, or an empty string when Slack did
/// not send it. No validation is performed.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandPayload {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub enterprise_id: String,
    pub enterprise_name: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

impl CommandPayload {
    /// Extract the recognized fields from a form-encoded body.
    ///
    /// Unknown keys are ignored. When a key repeats, the first value wins.
    /// Bytes that are not form data simply produce empty fields.
    #[must_use]
    pub fn from_form(body: &[u8]) -> Self {
        let mut payload = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in url::form_urlencoded::parse(body) {
            if seen.iter().any(|k| *k == key) {
                continue;
            }
            let Some(field) = payload.field_mut(&key) else {
                continue;
            };
            *field = value.into_owned();
            seen.push(key.into_owned());
        }

        payload
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let field = match key {
            "token" => &mut self.token,
            "team_id" => &mut self.team_id,
            "team_domain" => &mut self.team_domain,
            "enterprise_id" => &mut self.enterprise_id,
            "enterprise_name" => &mut self.enterprise_name,
            "channel_id" => &mut self.channel_id,
            "channel_name" => &mut self.channel_name,
            "user_id" => &mut self.user_id,
            "user_name" => &mut self.user_name,
            "command" => &mut self.command,
            "text" => &mut self.text,
            "response_url" => &mut self.response_url,
            "trigger_id" => &mut self.trigger_id,
            _ => return None,
        };
        Some(field)
    }
}

// The verification token is a credential.
impl std::fmt::Debug for CommandPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPayload")
            .field("token", &"[REDACTED]")
            .field("team_id", &self.team_id)
            .field("team_domain", &self.team_domain)
            .field("enterprise_id", &self.enterprise_id)
            .field("enterprise_name", &self.enterprise_name)
            .field("channel_id", &self.channel_id)
            .field("channel_name", &self.channel_name)
            .field("user_id", &self.user_id)
            .field("user_name", &self.user_name)
            .field("command", &self.command)
            .field("text", &self.text)
            .field("response_url", &self.response_url)
            .field("trigger_id", &self.trigger_id)
            .finish()
    }
}
