//! Centralized error types for OpenCar
//!
//! Every stage of the control cycle reports failures through an explicit
//! error value. Nothing in the cycle panics for control-flow purposes.
//!
//! # Architecture
//!
//! - [`common`]: Top-level error type, categories and severity levels
//! - [`decode`]: Errors raised while producing a vehicle state snapshot
//! - [`codec`]: Errors raised by signal codec implementations and frame construction
//! - [`profile`]: Vehicle profile loading and validation errors
//!
//! # Example
//!
//! ```
//! use opencar_errors::prelude::*;
//!
//! fn require_group(present: bool) -> Result<()> {
//!     if !present {
//!         return Err(DecodeError::missing_message(0, "STEERING").into());
//!     }
//!     Ok(())
//! }
//!
//! let err = require_group(false).err();
//! assert!(err.is_some_and(|e| e.is_recoverable()));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod common;
pub mod decode;
pub mod prelude;
pub mod profile;

pub use codec::CodecError;
pub use common::{ErrorCategory, ErrorSeverity, OpenCarError};
pub use decode::DecodeError;
pub use profile::ProfileError;

/// A specialized `Result` type for OpenCar operations.
pub type Result<T> = std::result::Result<T, OpenCarError>;

/// A specialized `Result` type for state decoding.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// A specialized `Result` type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// A specialized `Result` type for vehicle profile operations.
pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
