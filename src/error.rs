//! Top-level error surface for the harness.
//!
//! Each concern keeps its own error type next to its module; this
//! umbrella collects them so send steps can propagate any failure with
//! `?` up to the step boundary, where it fails the scenario.

use thiserror::Error;

use crate::{
    codec::CodecError,
    config::ConfigError,
    context::ContextError,
    response::ResponseError,
    transport::TransportError,
};

/// Any failure that aborts a scenario step.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required configuration key was missing or unreadable. Fatal.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The payload could not be encoded in the requested format.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Scenario data bookkeeping failed (missing token, no response yet).
    #[error(transparent)]
    Context(#[from] ContextError),
    /// A response accessor failed (malformed JSON, absent field).
    #[error(transparent)]
    Response(#[from] ResponseError),
    /// The exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
