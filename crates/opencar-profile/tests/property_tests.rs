//! Property-based tests for profile validation.

use opencar_lateral::{AngleRateLimit, AngleTableLimits};
use opencar_profile::{
    LimiterConfig, VehicleProfile, validate_longitudinal, validate_profile,
};
use proptest::prelude::*;

fn ascending(len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.1f64..10.0, len).prop_map(|steps| {
        steps
            .iter()
            .scan(-5.0, |acc, step| {
                *acc += step;
                Some(*acc)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Strictly increasing breakpoints with matching values are accepted.
    #[test]
    fn prop_ascending_tables_accepted(bp in (1usize..8).prop_flat_map(ascending)) {
        let values: Vec<f64> = bp.iter().map(|x| x * 100.0).collect();

        let mut profile = VehicleProfile::psa();
        profile.longitudinal.accel_bp = bp;
        profile.longitudinal.torque_v = values;
        prop_assert!(validate_longitudinal(&profile.longitudinal).is_ok());
    }

    /// Reversing a table of two or more breakpoints is always rejected.
    #[test]
    fn prop_descending_tables_rejected(bp in ascending(3)) {
        let mut reversed = bp.clone();
        reversed.reverse();
        let limits = AngleTableLimits {
            rate_up: AngleRateLimit { speed_bp: reversed, angle_v: vec![1.0, 1.0, 1.0] },
            ..AngleTableLimits::psa()
        };
        let profile = VehicleProfile::psa().with_limiter(LimiterConfig::AngleTable(limits));
        prop_assert!(validate_profile(&profile).is_err());
    }

    /// Any checksum init above a nibble is rejected, any nibble accepted.
    #[test]
    fn prop_checksum_init_width(init: u8) {
        let mut profile = VehicleProfile::psa();
        profile.checksum.default_init = init;
        prop_assert_eq!(validate_profile(&profile).is_ok(), init <= 0x0F);
    }

    /// Validation never panics on arbitrary limit values.
    #[test]
    fn prop_validation_total(steer_max in any::<f64>(), delta in any::<f64>()) {
        let mut limits = opencar_lateral::TorqueLimits::psa();
        limits.steer_max = steer_max;
        limits.delta_up = delta;
        let profile = VehicleProfile::psa().with_limiter(LimiterConfig::Torque(limits));
        let ok = validate_profile(&profile).is_ok();
        prop_assert_eq!(
            ok,
            steer_max.is_finite() && steer_max > 0.0 && delta.is_finite() && delta > 0.0
        );
    }
}
