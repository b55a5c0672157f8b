//! Common error types and classification used across all OpenCar crates.

use core::fmt;

use crate::{CodecError, DecodeError, ProfileError};

/// Top-level error type that can wrap all OpenCar sub-errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpenCarError {
    /// State decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Signal codec errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Profile and configuration errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl OpenCarError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OpenCarError::Decode(_) => ErrorCategory::Decode,
            OpenCarError::Codec(_) => ErrorCategory::Codec,
            OpenCarError::Profile(_) => ErrorCategory::Profile,
            OpenCarError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OpenCarError::Decode(e) => e.severity(),
            OpenCarError::Codec(e) => e.severity(),
            OpenCarError::Profile(e) => e.severity(),
            OpenCarError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors should degrade the control loop to
    /// "controls unavailable" for the affected cycle.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        OpenCarError::Other(msg.into())
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// State decoding errors
    Decode = 0,
    /// Signal codec errors
    Codec = 1,
    /// Profile and configuration errors
    Profile = 2,
    /// Other errors
    Other = 255,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Decode => write!(f, "Decode"),
            ErrorCategory::Codec => write!(f, "Codec"),
            ErrorCategory::Profile => write!(f, "Profile"),
            ErrorCategory::Other => write!(f, "Other"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, configuration or code defect
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
