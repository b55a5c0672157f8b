//! Shared CAN types for OpenCar
//!
//! This crate holds the types that sit on either side of the signal codec:
//!
//! - [`CanFrame`]: an outgoing or observed frame (address, up to 8 payload bytes, bus)
//! - [`BusSnapshot`]: one cycle of decoded input, keyed by bus and message name
//! - [`SignalCodec`]: the seam to the DBC-style codec that maps named signals to bytes
//!
//! The codec itself is not implemented here. Vehicle crates only ever talk to
//! it through [`SignalCodec`], so any table-driven implementation can be
//! plugged in.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod codec;
pub mod frame;
pub mod snapshot;

pub use codec::{DecodedMessage, EncodedMessage, SignalCodec};
pub use frame::CanFrame;
pub use snapshot::{BusSnapshot, SignalValues, signal_values};

pub use opencar_errors::{CodecError, CodecResult};
