//! Vehicle profile errors.

use crate::common::ErrorSeverity;

/// Vehicle profile loading and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// A field holds a value the algorithms cannot run with.
    #[error("Invalid profile field {field}: {reason}")]
    InvalidField {
        /// Dotted path of the field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The profile document could not be parsed.
    #[error("Failed to parse profile: {0}")]
    Parse(String),

    /// The profile was written by a newer release.
    #[error("Unsupported schema version {found}: maximum supported is {max}")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Highest version this release understands
        max: u32,
    },
}

impl ProfileError {
    /// Create an invalid-field error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Severity of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProfileError::UnsupportedVersion { .. } => ErrorSeverity::Warning,
            ProfileError::InvalidField { .. } | ProfileError::Parse(_) => ErrorSeverity::Error,
        }
    }
}
