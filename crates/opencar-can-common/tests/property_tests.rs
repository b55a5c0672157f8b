//! Property tests for frame construction and snapshots.

use opencar_can_common::{BusSnapshot, CanFrame, CodecError, signal_values};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn frame_accepts_up_to_eight_bytes(
        address in 0u32..0x800,
        payload in proptest::collection::vec(any::<u8>(), 0..=8),
        bus in 0u8..4,
    ) {
        let frame = CanFrame::new(address, &payload, bus);
        prop_assert!(frame.is_ok());
        if let Ok(frame) = frame {
            prop_assert_eq!(frame.payload(), payload.as_slice());
            prop_assert_eq!(frame.address(), address);
            prop_assert_eq!(frame.bus(), bus);
        }
    }

    #[test]
    fn frame_rejects_longer_payloads(payload in proptest::collection::vec(any::<u8>(), 9..64)) {
        let len = payload.len();
        prop_assert_eq!(CanFrame::new(0x100, &payload, 0), Err(CodecError::PayloadTooLong { len }));
    }

    #[test]
    fn snapshot_returns_what_was_inserted(bus in 0u8..4, value in -1e6f64..1e6) {
        let snapshot = BusSnapshot::new().with(bus, "MSG", signal_values([("SIG", value)]));
        prop_assert_eq!(snapshot.signal(bus, "MSG", "SIG"), Some(value));
        prop_assert_eq!(snapshot.len(), 1);
    }
}
