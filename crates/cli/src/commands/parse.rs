//! `slackgate parse` - show the slash command fields of a form body.

use slackgate_core::{BufferedBody, CommandPayload};

use super::CliError;

/// Extract the payload from `body` and render it as pretty JSON.
pub fn run(body: &BufferedBody) -> Result<String, CliError> {
    let payload = CommandPayload::from_form(body.as_bytes());
    Ok(serde_json::to_string_pretty(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_renders_fields() {
        let body = BufferedBody::from(b"command=%2Fdeploy&text=prod+now&user_id=U1".as_slice());

        let json = run(&body).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();

        assert_eq!(value["command"], "/deploy");
        assert_eq!(value["text"], "prod now");
        assert_eq!(value["user_id"], "U1");
        assert_eq!(value["channel_id"], "");
    }
}
