//! State decoding errors.
//!
//! Decoding fails only when a mandatory signal group is absent from the
//! cycle's input. Out-of-range values are passed through untouched.

use crate::common::ErrorSeverity;

/// Errors raised while producing a vehicle state snapshot.
///
/// A decode error is fatal for the cycle that raised it. The caller decides
/// whether to skip the cycle or reuse the previous snapshot, and should
/// report "controls unavailable" instead of fabricating values.
///
/// # Examples
///
/// ```
/// use opencar_errors::{DecodeError, ErrorSeverity};
///
/// let err = DecodeError::missing_message(2, "Dat_BSI");
/// assert_eq!(err.bus(), 2);
/// assert_eq!(err.message(), "Dat_BSI");
/// assert_eq!(err.severity(), ErrorSeverity::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A mandatory message was not observed on its bus.
    #[error("Missing message {message} on bus {bus}")]
    MissingMessage {
        /// Bus index
        bus: u8,
        /// Message name
        message: String,
    },

    /// A message was observed but lacks a signal the decoder needs.
    #[error("Missing signal {message}.{signal} on bus {bus}")]
    MissingSignal {
        /// Bus index
        bus: u8,
        /// Message name
        message: String,
        /// Signal name
        signal: String,
    },
}

impl DecodeError {
    /// Create a missing-message error.
    pub fn missing_message(bus: u8, message: impl Into<String>) -> Self {
        DecodeError::MissingMessage {
            bus,
            message: message.into(),
        }
    }

    /// Create a missing-signal error.
    pub fn missing_signal(bus: u8, message: impl Into<String>, signal: impl Into<String>) -> Self {
        DecodeError::MissingSignal {
            bus,
            message: message.into(),
            signal: signal.into(),
        }
    }

    /// Bus the missing data was expected on.
    pub fn bus(&self) -> u8 {
        match self {
            DecodeError::MissingMessage { bus, .. } | DecodeError::MissingSignal { bus, .. } => {
                *bus
            }
        }
    }

    /// Name of the message involved.
    pub fn message(&self) -> &str {
        match self {
            DecodeError::MissingMessage { message, .. }
            | DecodeError::MissingSignal { message, .. } => message,
        }
    }

    /// Severity of this error.
    ///
    /// Missing input degrades the cycle but never the process, so decode
    /// errors are always recoverable.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}
