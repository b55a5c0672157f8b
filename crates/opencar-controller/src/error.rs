//! Controller error types.

use opencar_errors::{CodecError, OpenCarError, ProfileError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("Frame encoding failed: {0}")]
    Codec(#[from] CodecError),

    #[error("Controller setup failed: {0}")]
    Profile(#[from] ProfileError),
}

pub type ControlResult<T> = Result<T, ControlError>;

impl From<ControlError> for OpenCarError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::Codec(e) => OpenCarError::Codec(e),
            ControlError::Profile(e) => OpenCarError::Profile(e),
        }
    }
}
