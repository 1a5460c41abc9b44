//! `slackgate verify` - check a captured request offline.

use std::io::Read;

use slackgate_core::{SigningSecret, Verifier};

use super::CliError;

/// Verify `presented` over the body read from `reader`.
///
/// Returns `Ok(false)` for any signature mismatch; only read failures are
/// errors.
pub fn run(
    secret: SigningSecret,
    timestamp: &str,
    presented: &str,
    reader: impl Read,
) -> Result<bool, CliError> {
    let verification =
        Verifier::new(secret).verify_reader(Some(timestamp), Some(presented), reader)?;

    tracing::debug!(
        body_len = verification.body().len(),
        authentic = verification.is_authentic(),
        "Signature checked"
    );

    Ok(verification.is_authentic())
}
