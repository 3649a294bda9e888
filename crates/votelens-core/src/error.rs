//! Error taxonomy for the Votelens pipeline.
//!
//! Failure domains map to the propagation policy: script and vote-record
//! failures are fatal to a report; source and decode failures degrade
//! the field or call they touch and never abort report assembly.

use thiserror::Error;

/// A corrupt or truncated execution script. Fatal to the whole report —
/// a partially decoded script is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("truncated segment address at offset {offset}: {remaining} bytes remain, need 20")]
    TruncatedAddress { offset: usize, remaining: usize },

    #[error("truncated calldata length at offset {offset}: {remaining} bytes remain, need 4")]
    TruncatedLength { offset: usize, remaining: usize },

    #[error("truncated calldata at offset {offset}: expected {expected} bytes, {remaining} remain")]
    TruncatedCalldata {
        offset: usize,
        expected: usize,
        remaining: usize,
    },
}

/// Failures talking to the chain client or the ABI/verification source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transient rate limiting — retry with backoff.
    #[error("rate limited by {provider}")]
    RateLimited { provider: String },

    /// Definitive service error (e.g. unknown address) — never retried.
    #[error("lookup failed: {reason}")]
    Lookup { reason: String },

    /// Network / HTTP layer fault — transient.
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// JSON-RPC protocol error returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The service returned a payload that is not a usable ABI.
    #[error("invalid ABI from {provider}: {reason}")]
    InvalidAbi { provider: String, reason: String },

    /// The service returned a value we could not decode.
    #[error("bad response: {reason}")]
    BadResponse { reason: String },
}

impl SourceError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transport { .. })
    }
}

/// Failures decoding calldata against a resolved interface. Non-fatal:
/// the affected call degrades to its raw form.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("calldata too short for a selector: {len} bytes")]
    SelectorMissing { len: usize },

    #[error("no function in interface for selector 0x{}", hex::encode(.selector))]
    UnknownSelector { selector: [u8; 4] },

    #[error("unsupported parameter type: {ty}")]
    UnsupportedType { ty: String },

    #[error("ABI decode failed: {reason}")]
    Abi { reason: String },

    #[error("invalid ABI JSON: {reason}")]
    InvalidAbi { reason: String },

    #[error("argument mismatch for {function}: expected {expected}, got {got}")]
    ArgumentMismatch {
        function: String,
        expected: usize,
        got: usize,
    },
}

/// The fatal surface of one report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed execution script: {0}")]
    MalformedScript(#[from] ScriptError),

    #[error("failed to fetch vote {id}: {source}")]
    VoteLookup {
        id: u64,
        #[source]
        source: SourceError,
    },

    #[error("chain query failed: {0}")]
    Chain(#[from] SourceError),
}
