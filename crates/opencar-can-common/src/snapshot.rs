//! Per-cycle decoded input.

use std::collections::BTreeMap;

use tracing::trace;

use crate::codec::SignalCodec;
use crate::frame::CanFrame;
use opencar_errors::{CodecError, CodecResult};

/// Decoded signal values of one message, keyed by signal name.
pub type SignalValues = BTreeMap<String, f64>;

/// Build a [`SignalValues`] map from `(name, value)` pairs.
///
/// # Example
///
/// ```
/// use opencar_can_common::signal_values;
///
/// let values = signal_values([("ANGLE", 12.5), ("RATE", 3.0)]);
/// assert_eq!(values.get("RATE"), Some(&3.0));
/// ```
pub fn signal_values<I, S>(pairs: I) -> SignalValues
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect()
}

/// One cycle of decoded bus input: `(bus, message name) -> signals`.
///
/// A message appears at most once per bus. Inserting the same message twice
/// keeps the latest values, matching a codec that reports the last frame seen
/// in the cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusSnapshot {
    buses: BTreeMap<u8, BTreeMap<String, SignalValues>>,
}

impl BusSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a batch of raw frames into a snapshot.
    ///
    /// Frames whose address the codec does not know are skipped; a bus
    /// carries far more traffic than any one vehicle layer consumes.
    ///
    /// # Errors
    ///
    /// Returns any codec error other than [`CodecError::UnknownAddress`].
    pub fn from_frames<C>(codec: &C, frames: &[CanFrame]) -> CodecResult<Self>
    where
        C: SignalCodec + ?Sized,
    {
        let mut snapshot = Self::new();
        for frame in frames {
            match codec.decode(frame.address(), frame.payload()) {
                Ok(decoded) => {
                    snapshot.insert(frame.bus(), decoded.name, decoded.values);
                }
                Err(CodecError::UnknownAddress(address)) => {
                    trace!(address, bus = frame.bus(), "skipping frame with unknown address");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(snapshot)
    }

    /// Insert a message's values, returning the previous values if any.
    pub fn insert(
        &mut self,
        bus: u8,
        message: impl Into<String>,
        values: SignalValues,
    ) -> Option<SignalValues> {
        self.buses
            .entry(bus)
            .or_default()
            .insert(message.into(), values)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, bus: u8, message: impl Into<String>, values: SignalValues) -> Self {
        self.buses
            .entry(bus)
            .or_default()
            .insert(message.into(), values);
        self
    }

    /// Remove a message from a bus.
    pub fn remove(&mut self, bus: u8, message: &str) -> Option<SignalValues> {
        self.buses.get_mut(&bus)?.remove(message)
    }

    /// Signal group of a message on a bus.
    pub fn group(&self, bus: u8, message: &str) -> Option<&SignalValues> {
        self.buses.get(&bus)?.get(message)
    }

    /// Single signal value.
    pub fn signal(&self, bus: u8, message: &str, signal: &str) -> Option<f64> {
        self.group(bus, message)?.get(signal).copied()
    }

    /// Whether a message is present on a bus.
    pub fn contains(&self, bus: u8, message: &str) -> bool {
        self.group(bus, message).is_some()
    }

    /// Number of messages across all buses.
    pub fn len(&self) -> usize {
        self.buses.values().map(BTreeMap::len).sum()
    }

    /// Whether the snapshot holds no messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(bus, message, values)`.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str, &SignalValues)> {
        self.buses.iter().flat_map(|(bus, messages)| {
            messages
                .iter()
                .map(move |(name, values)| (*bus, name.as_str(), values))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_per_bus() {
        let snapshot = BusSnapshot::new()
            .with(0, "STEERING", signal_values([("DRIVER_TORQUE", 1.5)]))
            .with(2, "DRIVER", signal_values([("GAS_PEDAL", 0.0)]));

        assert_eq!(snapshot.signal(0, "STEERING", "DRIVER_TORQUE"), Some(1.5));
        assert_eq!(snapshot.signal(2, "STEERING", "DRIVER_TORQUE"), None);
        assert!(snapshot.contains(2, "DRIVER"));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut snapshot = BusSnapshot::new();
        assert!(
            snapshot
                .insert(1, "HS2_DAT_MDD_CMD_452", signal_values([("SPEED_SETPOINT", 90.0)]))
                .is_none()
        );
        let previous =
            snapshot.insert(1, "HS2_DAT_MDD_CMD_452", signal_values([("SPEED_SETPOINT", 100.0)]));
        assert_eq!(
            previous.and_then(|v| v.get("SPEED_SETPOINT").copied()),
            Some(90.0)
        );
        assert_eq!(snapshot.signal(1, "HS2_DAT_MDD_CMD_452", "SPEED_SETPOINT"), Some(100.0));
    }

    #[test]
    fn test_remove_and_iter() {
        let mut snapshot = BusSnapshot::new()
            .with(0, "A", SignalValues::new())
            .with(0, "B", SignalValues::new());
        assert!(snapshot.remove(0, "A").is_some());
        let names: Vec<_> = snapshot.iter().map(|(_, name, _)| name).collect();
        assert_eq!(names, vec!["B"]);
        assert!(snapshot.remove(3, "B").is_none());
    }
}
