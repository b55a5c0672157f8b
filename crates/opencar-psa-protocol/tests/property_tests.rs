//! Property-based and known-answer tests for checksums and packing.

use opencar_can_common::{SignalCodec, SignalValues};
use opencar_psa_protocol::{
    ChecksumTable, EpsStatus, LaneKeepAssistCommand, SteerSetpoint, addresses, checksum,
    lane_keep_assist, mask_checksum_nibble, message_names, pack_with_checksum, signals,
};
use opencar_test_helpers::prelude::*;
use proptest::prelude::*;

fn lka(counter: u8, angle: f64) -> SignalValues {
    lane_keep_assist(&LaneKeepAssistCommand {
        counter,
        status: EpsStatus::Active,
        torque_factor: 100.0,
        setpoint: SteerSetpoint::Angle(angle),
    })
}

fn pack_lka(codec: &TableCodec, values: SignalValues) -> Vec<u8> {
    must(pack_with_checksum(
        codec,
        message_names::LANE_KEEP_ASSIST,
        values,
        signals::lane_keep_assist::CHECKSUM,
        &ChecksumTable::psa(),
    ))
    .payload
}

#[test]
fn lane_keep_assist_known_answer() {
    let codec = psa_codec();
    // byte0: DRIVE | LXA | STATUS 4; byte2: TORQUE_FACTOR 100
    // nibbles 1 + 3 + 6 + 4 = 14, (0xB - 14) & 0xF = 0xD
    assert_eq!(pack_lka(&codec, lka(0, 0.0)), vec![0x13, 0xD0, 0x64, 0, 0, 0, 0, 0]);
    // counter 5 adds 5: (0xB - 19) & 0xF = 0x8
    assert_eq!(pack_lka(&codec, lka(5, 0.0)), vec![0x13, 0x85, 0x64, 0, 0, 0, 0, 0]);
}

#[test]
fn checksum_uses_address_init() {
    let table = ChecksumTable::psa();
    assert_eq!(table.init_for(addresses::HS2_DAT_MDD_CMD_452), 0x4);
    assert_eq!(table.init_for(addresses::HS2_DYN_ABR_38D), 0x7);
    assert_eq!(table.init_for(addresses::HS2_BSI_42D), 0xC);
    assert_eq!(table.init_for(addresses::LANE_KEEP_ASSIST), 0xB);

    let payload = [0x00u8; 8];
    assert_eq!(checksum(&payload, table.init_for(addresses::HS2_DAT_MDD_CMD_452)), 0x4);
}

#[test]
fn shared_checksum_nibble_is_masked() {
    use signals::hs2_dat_mdd_cmd_452::*;

    let codec = psa_codec();
    let values: SignalValues = [
        (SPEED_SETPOINT, 90.0),
        (CHECKSUM_CONS_RVV_LVV2, 3.0),
        (FRAME_COUNTER_BSI2, 6.0),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    let packed = must(pack_with_checksum(
        &codec,
        message_names::HS2_DAT_MDD_CMD_452,
        values,
        CHECKSUM_SPEED_SETPOINT,
        &ChecksumTable::psa(),
    ));
    let decoded = must(codec.decode(packed.address, &packed.payload)).values;
    let get = |name: &str| decoded.get(name).copied().unwrap_or(f64::NAN);

    // nibbles without CHECKSUM_CONS: 5 + 10 + 6 = 21, (0x4 - 21) & 0xF = 0xF
    assert!((get(CHECKSUM_SPEED_SETPOINT) - 15.0).abs() < 1e-9);
    assert!((get(CHECKSUM_CONS_RVV_LVV2) - 3.0).abs() < 1e-9);

    // Counting the other checksum's nibble would give 0xC.
    let mut unmasked = packed.payload.clone();
    let own = must(codec.signal_start_bit(message_names::HS2_DAT_MDD_CMD_452, CHECKSUM_SPEED_SETPOINT));
    mask_checksum_nibble(&mut unmasked, own);
    assert_eq!(checksum(&unmasked, 0x4), 0xC);
}

#[test]
fn checksum_table_round_trips_through_json() -> TestResult {
    let table = ChecksumTable::psa();
    let json = serde_json::to_string(&table)?;
    let back: ChecksumTable = serde_json::from_str(&json)?;
    assert_eq!(back, table);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The checksum is always a nibble.
    #[test]
    fn prop_checksum_is_nibble(payload in proptest::collection::vec(any::<u8>(), 0..=8), init: u8) {
        prop_assert!(checksum(&payload, init) <= 0x0F);
    }

    /// Same payload and init always give the same checksum.
    #[test]
    fn prop_checksum_is_pure(payload in proptest::collection::vec(any::<u8>(), 0..=8), init: u8) {
        prop_assert_eq!(checksum(&payload, init), checksum(&payload, init));
    }

    /// Only the low nibble of the init value matters.
    #[test]
    fn prop_checksum_ignores_init_high_nibble(payload in proptest::collection::vec(any::<u8>(), 0..=8), init: u8) {
        prop_assert_eq!(checksum(&payload, init), checksum(&payload, init & 0x0F));
    }

    /// A packed frame verifies: masking the checksum nibble and recomputing
    /// yields the transmitted value.
    #[test]
    fn prop_packed_frame_verifies(counter in 0u8..16, angle in -390.0f64..390.0) {
        let codec = psa_codec();
        let mut payload = pack_lka(&codec, lka(counter, angle));
        let decoded = must(codec.decode(addresses::LANE_KEEP_ASSIST, &payload));
        let transmitted = decoded.values[signals::lane_keep_assist::CHECKSUM];

        let start = must(codec.signal_start_bit(
            message_names::LANE_KEEP_ASSIST,
            signals::lane_keep_assist::CHECKSUM,
        ));
        mask_checksum_nibble(&mut payload, start);
        let recomputed = checksum(&payload, ChecksumTable::psa().init_for(addresses::LANE_KEEP_ASSIST));
        prop_assert!((transmitted - f64::from(recomputed)).abs() < 1e-9);
    }

    /// Masking touches only the addressed nibble.
    #[test]
    fn prop_mask_touches_one_nibble(payload in proptest::collection::vec(any::<u8>(), 8), start in 0u16..64) {
        let mut masked = payload.clone();
        mask_checksum_nibble(&mut masked, start);
        let byte = usize::from(start / 8);
        for (i, (a, b)) in payload.iter().zip(&masked).enumerate() {
            if i == byte {
                let keep = if start % 8 >= 4 { 0x0F } else { 0xF0 };
                prop_assert_eq!(*b, a & keep);
            } else {
                prop_assert_eq!(a, b);
            }
        }
    }
}
