//! Slack request signing (`v0` scheme).
//!
//! Slack signs every HTTP callback with the app's signing secret:
//!
//! 1. Concatenate `v0:{timestamp}:{body}` into the base string, inserting the
//!    body bytes exactly as they arrived on the wire.
//! 2. Compute `HMAC-SHA256(signing_secret, base_string)`.
//! 3. Send `v0={lowercase_hex_digest}` in the `X-Slack-Signature` header.
//!
//! See: <https://api.slack.com/authentication/verifying-requests-from-slack>
//!
//! Verification never distinguishes a malformed signature from a wrong one:
//! both are simply `false`. Nothing in this module logs secrets or signatures.

use std::io::Read;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::body::{BodyReadError, BufferedBody};

/// The only signature version Slack has published.
pub const SIGNATURE_VERSION: &str = "v0";

/// Header carrying the request timestamp (seconds since the epoch, as a string).
pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";

/// Header carrying the `v0=...` signature.
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur while computing a signature.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The MAC could not be keyed with the secret.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Slack app signing secret.
///
/// Cloning is cheap and shares the same zeroize-on-drop allocation.
/// `Debug` never prints the secret.
#[derive(Clone)]
pub struct SigningSecret(Arc<SecretBox<[u8]>>);

impl SigningSecret {
    /// Create a signing secret from raw bytes.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Arc::new(SecretBox::new(secret.into().into_boxed_slice())))
    }

    /// Number of bytes in the secret.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }

    fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

impl From<&SecretString> for SigningSecret {
    fn from(secret: &SecretString) -> Self {
        Self::new(secret.expose_secret().as_bytes())
    }
}

impl From<SecretString> for SigningSecret {
    fn from(secret: SecretString) -> Self {
        Self::from(&secret)
    }
}

/// Everything needed to verify one inbound request.
///
/// Headers are kept exactly as received. A header that was absent is `None`
/// and can never verify.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignedRequest {
    /// `X-Slack-Request-Timestamp` header value.
    pub timestamp: Option<String>,
    /// Raw request body.
    pub body: Vec<u8>,
    /// `X-Slack-Signature` header value.
    pub presented_signature: Option<String>,
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("timestamp", &self.timestamp)
            .field("body_len", &self.body.len())
            .field(
                "presented_signature",
                &self.presented_signature.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Build the exact byte string Slack signs: `v0:{timestamp}:{body}`.
#[must_use]
pub fn canonical_message(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut message =
        Vec::with_capacity(SIGNATURE_VERSION.len() + timestamp.len() + body.len() + 2);
    message.extend_from_slice(SIGNATURE_VERSION.as_bytes());
    message.push(b':');
    message.extend_from_slice(timestamp.as_bytes());
    message.push(b':');
    message.extend_from_slice(body);
    message
}

/// Compute the `v0=...` signature Slack would send for this request.
///
/// # Errors
///
/// Returns error if the MAC cannot be keyed with `secret`.
pub fn sign(secret: &SigningSecret, timestamp: &str, body: &[u8]) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.expose())
        .map_err(|e| SignatureError::InvalidKey(e.to_string()))?;

    mac.update(&canonical_message(timestamp, body));

    Ok(format!(
        "{SIGNATURE_VERSION}={}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Check a presented `X-Slack-Signature` against the request it came with.
///
/// Returns `true` only on an exact match. Empty or malformed signatures,
/// versions other than `v0`, and mismatched digests all return `false`.
/// The final comparison runs in constant time.
#[must_use]
pub fn verify(secret: &SigningSecret, timestamp: &str, body: &[u8], presented: &str) -> bool {
    if !has_supported_version(presented) {
        return false;
    }

    let Ok(expected) = sign(secret, timestamp, body) else {
        return false;
    };

    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

/// The version tag is public, so rejecting early leaks nothing about the digest.
fn has_supported_version(presented: &str) -> bool {
    presented
        .split_once('=')
        .is_some_and(|(version, _)| version == SIGNATURE_VERSION)
}

/// Outcome of verifying a streamed body.
///
/// The body is returned whatever the verdict, so downstream code can still
/// read it after a rejection (for example to log its size).
#[derive(Debug, Clone)]
#[must_use]
pub struct Verification {
    authentic: bool,
    body: BufferedBody,
}

impl Verification {
    /// Whether the signature matched.
    #[must_use]
    pub const fn is_authentic(&self) -> bool {
        self.authentic
    }

    /// The drained body.
    #[must_use]
    pub const fn body(&self) -> &BufferedBody {
        &self.body
    }

    /// Take ownership of the drained body.
    #[must_use]
    pub fn into_body(self) -> BufferedBody {
        self.body
    }
}

/// Verifies Slack requests against one signing secret.
///
/// Stateless apart from the read-only secret, so a single instance can be
/// shared by every request handler.
#[derive(Clone)]
pub struct Verifier {
    secret: SigningSecret,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Verifier {
    /// Create a verifier for the given signing secret.
    #[must_use]
    pub const fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// See [`verify`].
    #[must_use]
    pub fn verify(&self, timestamp: &str, body: &[u8], presented: &str) -> bool {
        verify(&self.secret, timestamp, body, presented)
    }

    /// Verify a request whose headers may be missing.
    #[must_use]
    pub fn verify_request(&self, request: &SignedRequest) -> bool {
        match (&request.timestamp, &request.presented_signature) {
            (Some(timestamp), Some(presented)) => {
                self.verify(timestamp, &request.body, presented)
            }
            _ => false,
        }
    }

    /// Drain `body` exactly once, verify it, and hand back the buffered bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError`] if reading the body fails. That is a
    /// transport problem, not a verdict: callers must not treat it as either
    /// authentic or forged.
    pub fn verify_reader<R: Read>(
        &self,
        timestamp: Option<&str>,
        presented: Option<&str>,
        body: R,
    ) -> Result<Verification, BodyReadError> {
        let body = BufferedBody::read_from(body)?;

        let authentic = match (timestamp, presented) {
            (Some(timestamp), Some(presented)) => {
                self.verify(timestamp, body.as_bytes(), presented)
            }
            _ => false,
        };

        Ok(Verification { authentic, body })
    }

    /// See [`sign`].
    ///
    /// # Errors
    ///
    /// Returns error if the MAC cannot be keyed with the secret.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> Result<String, SignatureError> {
        sign(&self.secret, timestamp, body)
    }
}
