//! Property tests for the engagement sequence and the encoder.

use opencar_carstate::VehicleState;
use opencar_controller::{
    ActuatorRequest, CarController, EngagementState, next_eps_status, next_resume_counter,
};
use opencar_profile::VehicleProfile;
use opencar_psa_protocol::{EpsLkaState, EpsStatus};
use opencar_test_helpers::prelude::*;
use proptest::prelude::*;

fn authorized() -> VehicleState {
    VehicleState {
        eps_lka_state: EpsLkaState::Active,
        v_ego: 20.0,
        v_ego_raw: 20.0,
        ..VehicleState::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Clean cycles reach Active after exactly two steps and stay there.
    #[test]
    fn prop_clean_cycles_reach_active(cycles in 2usize..50) {
        let mut status = EpsStatus::Ready;
        for cycle in 1..=cycles {
            status = next_eps_status(status, true, true, false);
            let expected = if cycle == 1 { EpsStatus::Authorized } else { EpsStatus::Active };
            prop_assert_eq!(status, expected);
        }
    }

    /// One override cycle resets to Ready whatever came before.
    #[test]
    fn prop_override_always_resets(history in proptest::collection::vec(any::<(bool, bool, bool)>(), 0..30)) {
        let mut status = EpsStatus::Ready;
        for (active, authorized, pressed) in history {
            status = next_eps_status(status, active, authorized, pressed);
            prop_assert!(matches!(
                status,
                EpsStatus::Ready | EpsStatus::Authorized | EpsStatus::Active
            ));
        }
        prop_assert_eq!(next_eps_status(status, true, true, true), EpsStatus::Ready);
    }

    /// Resume counters advance by one, modulo 16.
    #[test]
    fn prop_resume_counter_advances(previous in proptest::option::of(0u8..16), observed in 0.0f64..16.0) {
        let next = next_resume_counter(previous, observed);
        prop_assert!(next < 16);
        if let Some(previous) = previous {
            prop_assert_eq!(next, (previous + 1) % 16);
        }
    }

    /// Encoded torque commands stay bounded and rate limited.
    #[test]
    fn prop_encoded_torque_bounded(requests in proptest::collection::vec(-2.0f64..2.0, 1..60)) {
        let controller = must(CarController::new(VehicleProfile::psa(), psa_codec(), None));
        let mut state = EngagementState::new();
        let vehicle = authorized();
        for torque in requests {
            let before = state.last_applied_torque;
            let frames = must(controller.encode(&mut state, &vehicle, &ActuatorRequest::torque(torque)));
            prop_assert!(!frames.is_empty());
            prop_assert!(state.last_applied_torque.abs() <= 100.0);
            prop_assert!((state.last_applied_torque - before).abs() <= 10.0 + 1e-9);
        }
    }

    /// The frame counter advances once per successful cycle.
    #[test]
    fn prop_frame_counts_cycles(cycles in 1u32..40) {
        let controller = must(CarController::new(VehicleProfile::psa(), psa_codec(), None));
        let mut state = EngagementState::new();
        for _ in 0..cycles {
            must(controller.encode(&mut state, &authorized(), &ActuatorRequest::default()));
        }
        prop_assert_eq!(state.frame, cycles);
    }
}
