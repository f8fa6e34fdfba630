//! Error types for the ChainABI codec and log decoder.

use alloy_primitives::B256;
use thiserror::Error;

use crate::types::AbiEvent;

/// Errors raised while parsing signatures, encoding or decoding parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    // ─── Signatures & types ─────────────────────────────────────────────────
    #[error("Invalid signature `{signature}`: {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("Invalid ABI type `{ty}`: {reason}")]
    InvalidType { ty: String, reason: String },

    #[error("Invalid ABI JSON: {reason}")]
    InvalidAbiJson { reason: String },

    // ─── Encoding ───────────────────────────────────────────────────────────
    #[error("ABI encoding params/values length mismatch: expected {expected}, given {given}")]
    EncodingLengthMismatch { expected: usize, given: usize },

    #[error("Integer {value} is out of range for type {ty}")]
    IntegerOutOfRange { ty: String, value: String },

    #[error("Size of bytes {given} does not match expected size of bytes{expected}")]
    FixedBytesSizeMismatch { expected: usize, given: usize },

    #[error("Array length mismatch for type {ty}: expected {expected}, given {given}")]
    ArrayLengthMismatch {
        ty: String,
        expected: usize,
        given: usize,
    },

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    // ─── Decoding ───────────────────────────────────────────────────────────
    #[error("Cannot decode zero data (\"0x\") with ABI parameters")]
    DecodingZeroData,

    #[error("Data size too small: {required} bytes required, {available} available")]
    DecodingDataSizeTooSmall { required: usize, available: usize },

    #[error("Invalid boolean word 0x{word}")]
    InvalidBool { word: String },

    #[error("Function selector mismatch: expected {expected}, got {actual}")]
    SelectorMismatch { expected: String, actual: String },
}

impl AbiError {
    /// `true` for errors caused by data that is too short for the parameters
    /// (including empty data).
    pub fn is_size_error(&self) -> bool {
        matches!(
            self,
            Self::DecodingZeroData | Self::DecodingDataSizeTooSmall { .. }
        )
    }

    pub(crate) fn invalid_type(ty: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidType {
            ty: ty.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while decoding a single event log.
///
/// Only [`LogDecodeError::DataMismatch`] and [`LogDecodeError::TopicsMismatch`]
/// describe a log that simply does not fit the event; every other variant is a
/// hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogDecodeError {
    #[error("Data does not match event `{}` non-indexed parameters: {source}", .event.name)]
    DataMismatch {
        event: Box<AbiEvent>,
        #[source]
        source: AbiError,
    },

    #[error(
        "Topics do not match event `{}`: expected {expected} indexed topics, got {actual}",
        .event.name
    )]
    TopicsMismatch {
        event: Box<AbiEvent>,
        expected: usize,
        actual: usize,
    },

    #[error("Event signature mismatch for `{event}`: expected {expected}, got {actual}")]
    SignatureMismatch {
        event: String,
        expected: B256,
        actual: B256,
    },

    #[error("Log has no topics to identify the event")]
    EventTopicsEmpty,

    #[error("No event in ABI matches signature {topic}")]
    EventSignatureNotFound { topic: B256 },

    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),
}

impl LogDecodeError {
    /// `true` when the log does not fit the event (recoverable by the caller).
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::DataMismatch { .. } | Self::TopicsMismatch { .. })
    }

    /// The event a mismatch was detected against.
    pub fn event(&self) -> Option<&AbiEvent> {
        match self {
            Self::DataMismatch { event, .. } | Self::TopicsMismatch { event, .. } => Some(&**event),
            _ => None,
        }
    }
}
