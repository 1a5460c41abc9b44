//! Slackgate Core - Slack request authentication library.
//!
//! This crate provides everything needed to accept Slack HTTP callbacks:
//! - [`signature`] - `v0` HMAC-SHA256 request signing and constant-time verification
//! - [`body`] - Single-read body buffering so verification never exhausts the stream
//! - [`payload`] - Slash command form payload extraction
//! - [`blocks`] - Block Kit response messages
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no HTTP framework,
//! no logging, no global state. The signing secret is injected into a
//! [`Verifier`] at construction, which keeps its lifecycle auditable and makes
//! the verifier trivially shareable across threads.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod blocks;
pub mod body;
pub mod payload;
pub mod signature;

pub use blocks::{
    Accessory, ActionElement, Block, Button, ButtonStyle, ContextElement, ImageElement,
    MessageBuilder, ResponseType, SlackResponse, Text,
};
pub use body::{BodyReadError, BufferedBody};
pub use payload::CommandPayload;
pub use signature::{
    SIGNATURE_HEADER, SIGNATURE_VERSION, SignatureError, SignedRequest, SigningSecret,
    TIMESTAMP_HEADER, Verification, Verifier, canonical_message, sign, verify,
};
