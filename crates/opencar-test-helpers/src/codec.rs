//! Table-driven signal codec for tests.
//!
//! Layouts are little-endian (Intel): signal bit `i` lives in payload byte
//! `(start_bit + i) / 8`, bit `(start_bit + i) % 8`. Physical values map to
//! raw values as `raw = round((value - offset) / factor)`.

use std::collections::BTreeMap;

use opencar_can_common::{
    CodecError, CodecResult, DecodedMessage, EncodedMessage, SignalCodec, SignalValues,
};

/// One signal in a message layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalLayout {
    /// Signal name
    pub name: &'static str,
    /// Position of the least significant bit
    pub start_bit: u16,
    /// Width in bits (1..=32)
    pub size: u8,
    /// Two's complement raw value
    pub signed: bool,
    /// Physical units per raw count
    pub factor: f64,
    /// Physical value at raw zero
    pub offset: f64,
}

impl SignalLayout {
    /// Unsigned integer signal with unit scale.
    pub const fn unsigned(name: &'static str, start_bit: u16, size: u8) -> Self {
        Self {
            name,
            start_bit,
            size,
            signed: false,
            factor: 1.0,
            offset: 0.0,
        }
    }

    /// Signed signal with the given scale.
    pub const fn signed(name: &'static str, start_bit: u16, size: u8, factor: f64) -> Self {
        Self {
            name,
            start_bit,
            size,
            signed: true,
            factor,
            offset: 0.0,
        }
    }

    /// Unsigned signal with scale and offset.
    pub const fn scaled(
        name: &'static str,
        start_bit: u16,
        size: u8,
        factor: f64,
        offset: f64,
    ) -> Self {
        Self {
            name,
            start_bit,
            size,
            signed: false,
            factor,
            offset,
        }
    }

    fn mask(&self) -> u64 {
        (1u64 << self.size) - 1
    }

    fn raw_range(&self) -> (i64, i64) {
        if self.signed {
            let half = 1i64 << (self.size - 1);
            (-half, half - 1)
        } else {
            (0, (1i64 << self.size) - 1)
        }
    }
}

/// One message layout.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLayout {
    /// Message name
    pub name: &'static str,
    /// Bus address
    pub address: u32,
    /// Payload length in bytes
    pub len: usize,
    /// Signals
    pub signals: Vec<SignalLayout>,
}

/// Table-driven [`SignalCodec`].
#[derive(Debug, Clone, Default)]
pub struct TableCodec {
    by_name: BTreeMap<&'static str, MessageLayout>,
    by_address: BTreeMap<u32, &'static str>,
}

impl TableCodec {
    /// Build a codec from message layouts.
    ///
    /// # Panics
    ///
    /// Panics if two layouts share a name or address, or a signal does not
    /// fit its message.
    pub fn new(messages: impl IntoIterator<Item = MessageLayout>) -> Self {
        let mut codec = Self::default();
        for message in messages {
            for signal in &message.signals {
                let end = usize::from(signal.start_bit) + usize::from(signal.size);
                assert!(
                    signal.size > 0 && signal.size <= 32 && end <= message.len * 8,
                    "signal {}.{} does not fit",
                    message.name,
                    signal.name
                );
            }
            assert!(
                codec.by_address.insert(message.address, message.name).is_none(),
                "duplicate address 0x{:03X}",
                message.address
            );
            assert!(
                codec.by_name.insert(message.name, message).is_none(),
                "duplicate message name"
            );
        }
        codec
    }

    /// Layout of a message.
    pub fn layout(&self, message: &str) -> Option<&MessageLayout> {
        self.by_name.get(message)
    }

    fn layout_or_err(&self, message: &str) -> CodecResult<&MessageLayout> {
        self.by_name
            .get(message)
            .ok_or_else(|| CodecError::UnknownMessage(message.to_string()))
    }
}

impl SignalCodec for TableCodec {
    fn encode(&self, message: &str, values: &SignalValues) -> CodecResult<EncodedMessage> {
        let layout = self.layout_or_err(message)?;
        if let Some(unknown) = values
            .keys()
            .find(|name| !layout.signals.iter().any(|s| s.name == name.as_str()))
        {
            return Err(CodecError::unknown_signal(message, unknown.as_str()));
        }

        let mut word = 0u64;
        for signal in &layout.signals {
            let value = values.get(signal.name).copied().unwrap_or(0.0);
            let raw = ((value - signal.offset) / signal.factor).round();
            let (lo, hi) = signal.raw_range();
            if !raw.is_finite() || raw < lo as f64 || raw > hi as f64 {
                return Err(CodecError::out_of_range(message, signal.name, value));
            }
            let bits = (raw as i64 as u64) & signal.mask();
            word |= bits << signal.start_bit;
        }

        let bytes = word.to_le_bytes();
        Ok(EncodedMessage {
            address: layout.address,
            payload: bytes[..layout.len].to_vec(),
        })
    }

    fn decode(&self, address: u32, payload: &[u8]) -> CodecResult<DecodedMessage> {
        let name = self
            .by_address
            .get(&address)
            .ok_or(CodecError::UnknownAddress(address))?;
        let layout = self.layout_or_err(name)?;
        if payload.len() < layout.len {
            return Err(CodecError::PayloadTooShort {
                message: layout.name.to_string(),
                len: payload.len(),
                needed: layout.len,
            });
        }

        let mut bytes = [0u8; 8];
        for (dst, src) in bytes.iter_mut().zip(payload) {
            *dst = *src;
        }
        let word = u64::from_le_bytes(bytes);

        let values = layout
            .signals
            .iter()
            .map(|signal| {
                let bits = (word >> signal.start_bit) & signal.mask();
                let raw = if signal.signed && bits >> (signal.size - 1) & 1 == 1 {
                    bits as i64 - (1i64 << signal.size)
                } else {
                    bits as i64
                };
                (
                    signal.name.to_string(),
                    raw as f64 * signal.factor + signal.offset,
                )
            })
            .collect();

        Ok(DecodedMessage {
            name: layout.name.to_string(),
            values,
        })
    }

    fn signal_start_bit(&self, message: &str, signal: &str) -> CodecResult<u16> {
        self.layout_or_err(message)?
            .signals
            .iter()
            .find(|s| s.name == signal)
            .map(|s| s.start_bit)
            .ok_or_else(|| CodecError::unknown_signal(message, signal))
    }
}
