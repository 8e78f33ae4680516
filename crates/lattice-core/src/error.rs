//! # Error Types — Structured Error Hierarchy
//!
//! The error taxonomy for the signing stack. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - `SchemaError` and `PayloadError` are recoverable: they are expected
//!   during normal operation (a user submits a disallowed message kind, a
//!   wallet sends a malformed fee) and are surfaced to the caller. They
//!   must never crash the process.
//! - `InternalFault` is unrecoverable: a trusted collaborator violated its
//!   contract (for example, bytes we serialized ourselves failed to decode).
//!   The request is aborted with a clearly labeled internal error. Partial
//!   recovery or silent continuation is forbidden.

use thiserror::Error;

/// Top-level error type for the signing pipeline.
#[derive(Error, Debug)]
pub enum SigningError {
    /// Allow-list or type-graph violation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Malformed or undecodable request payload.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Contract violation by a trusted collaborator. Abort the request.
    #[error(transparent)]
    Internal(#[from] InternalFault),
}

/// Violation of the message-schema allow-list or the type graph.
///
/// Each variant carries the offending identifier so callers and logs can
/// name exactly what was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// Two schemas in one registry share a message type identifier.
    #[error("duplicate allowed message type: {0}")]
    DuplicateTypeId(String),

    /// A message's type identifier is not in the allow-list.
    #[error("message type \"{0}\" is not permitted")]
    UnpermittedMessageType(String),

    /// The message payload and the type graph disagree about a field.
    #[error("schema mismatch in type {type_name}: field {field}")]
    SchemaMismatch {
        /// The named type being encoded when the mismatch was found.
        type_name: String,
        /// The field present on one side but not the other.
        field: String,
    },
}

/// Malformed request payload, recoverable and surfaced to the caller.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The transaction payload has no parseable fee object.
    #[error("cannot parse fee from tx data")]
    MalformedFeePayload,

    /// Float values are not permitted in sign documents; amounts must be
    /// strings or integers.
    #[error("float values are not permitted in sign documents: {0}")]
    FloatRejected(f64),

    /// The caller-supplied payload failed to decode as JSON.
    #[error("failed to JSON decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Contract violation by a trusted collaborator.
///
/// The legacy equivalent of this condition was a panic. It is a typed
/// error here so the top-level handler can label it as an internal fault
/// and abort the single request instead of the process.
#[derive(Error, Debug)]
#[error("internal fault: {0}")]
pub struct InternalFault(pub String);

impl InternalFault {
    /// Fault for a round-trip failure on bytes this stack produced itself.
    pub fn round_trip(context: &str, err: &serde_json::Error) -> Self {
        Self(format!("{context}: re-decode of self-produced bytes failed: {err}"))
    }
}
