//! CAN frame type.

use opencar_errors::{CodecError, CodecResult, codec::MAX_PAYLOAD_LEN};

/// A classic CAN frame bound to a bus.
///
/// The payload is stored inline; frames are `Copy` so a cycle's output can
/// be built without per-frame heap allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanFrame {
    address: u32,
    data: [u8; MAX_PAYLOAD_LEN],
    len: u8,
    bus: u8,
}

impl CanFrame {
    /// Create a frame from a payload of at most 8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::PayloadTooLong`] if `payload` exceeds 8 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use opencar_can_common::CanFrame;
    ///
    /// let frame = CanFrame::new(0x6B6, &[0x02, 0x10, 0x02], 1)?;
    /// assert_eq!(frame.payload(), &[0x02, 0x10, 0x02]);
    /// assert_eq!(frame.bus(), 1);
    /// # Ok::<(), opencar_can_common::CodecError>(())
    /// ```
    pub fn new(address: u32, payload: &[u8], bus: u8) -> CodecResult<Self> {
        let len = u8::try_from(payload.len())
            .ok()
            .filter(|len| usize::from(*len) <= MAX_PAYLOAD_LEN)
            .ok_or(CodecError::PayloadTooLong { len: payload.len() })?;

        let mut data = [0u8; MAX_PAYLOAD_LEN];
        for (dst, src) in data.iter_mut().zip(payload) {
            *dst = *src;
        }

        Ok(Self {
            address,
            data,
            len,
            bus,
        })
    }

    /// Bus address (arbitration ID).
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Bus index the frame belongs to.
    pub fn bus(&self) -> u8 {
        self.bus
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        self.data.get(..self.len()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_payload() -> Result<(), Box<dyn std::error::Error>> {
        let frame = CanFrame::new(0x3F2, &[1, 2, 3, 4, 5, 6, 7, 8], 0)?;
        assert_eq!(frame.address(), 0x3F2);
        assert_eq!(frame.len(), 8);
        assert_eq!(frame.payload(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }

    #[test]
    fn test_empty_payload() -> Result<(), Box<dyn std::error::Error>> {
        let frame = CanFrame::new(0x100, &[], 2)?;
        assert!(frame.is_empty());
        assert_eq!(frame.payload(), &[] as &[u8]);
        Ok(())
    }

    #[test]
    fn test_rejects_long_payload() {
        let result = CanFrame::new(0x100, &[0; 9], 0);
        assert_eq!(result, Err(CodecError::PayloadTooLong { len: 9 }));
    }
}
