//! Signal codec seam.

use crate::snapshot::SignalValues;
use opencar_errors::CodecResult;

/// A message encoded by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    /// Bus address of the message
    pub address: u32,
    /// Packed payload bytes
    pub payload: Vec<u8>,
}

/// A frame decoded by the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// Message name
    pub name: String,
    /// Physical signal values
    pub values: SignalValues,
}

/// DBC-style signal codec.
///
/// Implementations map named physical signal values to packed payload bytes
/// and back. Signals absent from `values` on encode are packed as zero.
///
/// Implementations must be deterministic: the same message name and values
/// always pack to the same bytes.
pub trait SignalCodec {
    /// Pack `values` into the layout of `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`](opencar_errors::CodecError) for an unknown
    /// message or signal, or a value that does not fit its signal.
    fn encode(&self, message: &str, values: &SignalValues) -> CodecResult<EncodedMessage>;

    /// Unpack a payload received at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownAddress`](opencar_errors::CodecError::UnknownAddress)
    /// when no message is defined at `address`.
    fn decode(&self, address: u32, payload: &[u8]) -> CodecResult<DecodedMessage>;

    /// Bit position of the least significant bit of `signal` within `message`.
    ///
    /// Checksum writers use this to blank the nibble they are about to fill.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`](opencar_errors::CodecError) for an unknown
    /// message or signal.
    fn signal_start_bit(&self, message: &str, signal: &str) -> CodecResult<u16>;
}

impl<C: SignalCodec + ?Sized> SignalCodec for &C {
    fn encode(&self, message: &str, values: &SignalValues) -> CodecResult<EncodedMessage> {
        (**self).encode(message, values)
    }

    fn decode(&self, address: u32, payload: &[u8]) -> CodecResult<DecodedMessage> {
        (**self).decode(address, payload)
    }

    fn signal_start_bit(&self, message: &str, signal: &str) -> CodecResult<u16> {
        (**self).signal_start_bit(message, signal)
    }
}
