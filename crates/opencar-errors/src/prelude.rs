//! Convenience re-exports.

pub use crate::codec::CodecError;
pub use crate::common::{ErrorCategory, ErrorSeverity, OpenCarError};
pub use crate::decode::DecodeError;
pub use crate::profile::ProfileError;
pub use crate::{CodecResult, DecodeResult, ProfileResult, Result};
