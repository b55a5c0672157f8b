//! Shared test utilities for OpenCar.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`assertions`] - Float assertion macros
//! - [`codec`] - Table-driven little-endian [`SignalCodec`](opencar_can_common::SignalCodec) double
//! - [`model`] - Steady-state bicycle [`VehicleModel`](opencar_lateral::VehicleModel) double
//! - [`fixtures`] - Message layouts and bus snapshot builders for AEE2010 vehicles
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! opencar-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use opencar_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod assertions;
pub mod codec;
pub mod fixtures;
pub mod model;
pub mod must;
pub mod prelude;

pub use must::*;
