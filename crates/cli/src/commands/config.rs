//! `slackgate check-config` - validate server configuration.
//!
//! # Environment Variables
//!
//! Reads the same variables as `slackgate-server`; see its `config` module.

use slackgate_server::ServerConfig;

use super::CliError;

/// Load configuration from the environment and summarize it.
///
/// The summary never contains the signing secret or the Sentry DSN.
pub fn check() -> Result<String, CliError> {
    let config = ServerConfig::from_env()?;
    Ok(summarize(&config))
}

fn summarize(config: &ServerConfig) -> String {
    let slack = config.slack();
    let max_age = slack
        .max_request_age
        .map_or_else(|| "disabled".to_string(), |age| format!("{}s", age.as_secs()));
    let sentry = if config.sentry_dsn.is_some() {
        "enabled"
    } else {
        "disabled"
    };

    format!(
        "listen:          {}\n\
         signing secret:  [REDACTED] (ok)\n\
         max body bytes:  {}\n\
         max request age: {max_age}\n\
         log format:      {:?}\n\
         sentry:          {sentry}",
        config.socket_addr(),
        slack.max_body_bytes,
        config.log_format,
    )
}
