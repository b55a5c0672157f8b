//! Signal codec and frame construction errors.

use crate::common::ErrorSeverity;

/// Maximum classic CAN payload length in bytes.
pub const MAX_PAYLOAD_LEN: usize = 8;

/// Errors raised by signal codec implementations and frame construction.
///
/// Unknown message or signal names point at a profile/codec mismatch,
/// which no amount of retrying will fix, so they are critical.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The codec has no definition for a message name.
    #[error("Unknown message: {0}")]
    UnknownMessage(String),

    /// The codec has no definition for a bus address.
    #[error("Unknown address: 0x{0:03X}")]
    UnknownAddress(u32),

    /// The message exists but has no such signal.
    #[error("Unknown signal {message}.{signal}")]
    UnknownSignal {
        /// Message name
        message: String,
        /// Signal name
        signal: String,
    },

    /// A payload is longer than a classic CAN frame allows.
    #[error("Payload too long: {len} bytes (max: {max})", max = MAX_PAYLOAD_LEN)]
    PayloadTooLong {
        /// Offending length
        len: usize,
    },

    /// A payload is shorter than the message layout requires.
    #[error("Payload too short for {message}: {len} bytes (need {needed})")]
    PayloadTooShort {
        /// Message name
        message: String,
        /// Actual length
        len: usize,
        /// Required length
        needed: usize,
    },

    /// A value cannot be represented in the signal's bit width.
    #[error("Value {value} out of range for {message}.{signal}")]
    ValueOutOfRange {
        /// Message name
        message: String,
        /// Signal name
        signal: String,
        /// Offending physical value
        value: f64,
    },
}

impl CodecError {
    /// Create an unknown-signal error.
    pub fn unknown_signal(message: impl Into<String>, signal: impl Into<String>) -> Self {
        CodecError::UnknownSignal {
            message: message.into(),
            signal: signal.into(),
        }
    }

    /// Create a value-out-of-range error.
    pub fn out_of_range(message: impl Into<String>, signal: impl Into<String>, value: f64) -> Self {
        CodecError::ValueOutOfRange {
            message: message.into(),
            signal: signal.into(),
            value,
        }
    }

    /// Severity of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CodecError::UnknownMessage(_)
            | CodecError::UnknownAddress(_)
            | CodecError::UnknownSignal { .. } => ErrorSeverity::Critical,
            CodecError::PayloadTooLong { .. }
            | CodecError::PayloadTooShort { .. }
            | CodecError::ValueOutOfRange { .. } => ErrorSeverity::Error,
        }
    }
}
