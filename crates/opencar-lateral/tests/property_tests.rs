//! Property-based tests for the steering limiters.
//!
//! Uses proptest with 500 cases to verify invariants on:
//! - Torque output stays within ±steer_max and grows at most delta_up per cycle
//! - Angle outputs stay within the absolute maximum and track the measured angle while inactive
//! - Dynamics bounds shrink with speed, strictly above the speed floor, and are always finite
//! - Larger curvature demand never loosens the dynamics angle bound
//! - The "up" angle table stays within a factor of two below the dynamics rate bound

use approx::assert_relative_eq;
use opencar_lateral::{
    AngleTableLimits, DynamicsLimits, SteerContext, SteerLimiter, TorqueLimits,
    VehicleModel, apply_std_steer_angle_limits, apply_steer_angle_limits_vm,
};
use opencar_test_helpers::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn finite() -> impl Strategy<Value = f64> {
    -1.0e4f64..1.0e4
}

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => finite(),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Torque output is finite and within ±steer_max for any input.
    #[test]
    fn prop_torque_bounded(
        request in any_f64(),
        last in any_f64(),
        driver in any_f64(),
        active: bool,
    ) {
        let limits = TorqueLimits::psa();
        let out = limits.limit(request, last, driver, active);
        prop_assert!(out.is_finite());
        prop_assert!(out.abs() <= limits.steer_max);
    }

    /// Growing away from zero never exceeds delta_up per cycle.
    #[test]
    fn prop_torque_rate_up(request in finite(), last in -100.0f64..100.0) {
        let limits = TorqueLimits::psa();
        let out = limits.limit(request, last, 0.0, true);
        prop_assert!(out.abs() <= last.abs() + limits.delta_up + 0.5);
    }

    /// Inactive torque never grows in magnitude.
    #[test]
    fn prop_torque_inactive_decays(last in -100.0f64..100.0, request in finite()) {
        let limits = TorqueLimits::psa();
        let out = limits.limit(request, last, 0.0, false);
        prop_assert!(out.abs() <= last.abs());
        prop_assert!(out * last >= 0.0);
    }

    /// Table angle output is finite and within the absolute maximum.
    #[test]
    fn prop_angle_table_bounded(
        request in any_f64(),
        last in any_f64(),
        v_ego in any_f64(),
        measured in any_f64(),
        active: bool,
    ) {
        let limits = AngleTableLimits::psa();
        let out = apply_std_steer_angle_limits(request, last, v_ego, measured, active, &limits);
        prop_assert!(out.is_finite());
        prop_assert!(out.abs() <= limits.steer_angle_max);
    }

    /// Table angle moves at most the standstill "up" rate per cycle.
    #[test]
    fn prop_angle_table_rate(request in finite(), last in -390.0f64..390.0, v_ego in 0.0f64..40.0) {
        let limits = AngleTableLimits::psa();
        let out = apply_std_steer_angle_limits(request, last, v_ego, last, true, &limits);
        prop_assert!((out - last).abs() <= 20.0 + 1e-9);
    }

    /// Inactive angle output equals the measured angle inside the range.
    #[test]
    fn prop_angle_inactive_tracks_measured(measured in -390.0f64..390.0, request in finite(), last in finite()) {
        let limits = AngleTableLimits::psa();
        let out = apply_std_steer_angle_limits(request, last, 10.0, measured, false, &limits);
        prop_assert!((out - measured).abs() < 1e-12);

        let out = apply_steer_angle_limits_vm(
            request, last, 10.0, measured, false, &DynamicsLimits::iso(), &BicycleModel::psa(),
        );
        prop_assert!((out - measured).abs() < 1e-12);
    }

    /// Dynamics output is finite and within both the dynamics and absolute bounds.
    #[test]
    fn prop_dynamics_bounded(
        request in any_f64(),
        last in any_f64(),
        v_ego_raw in any_f64(),
        measured in -390.0f64..390.0,
    ) {
        let limits = DynamicsLimits::iso();
        let model = BicycleModel::psa();
        let out = apply_steer_angle_limits_vm(request, last, v_ego_raw, measured, true, &limits, &model);
        prop_assert!(out.is_finite());
        prop_assert!(out.abs() <= limits.steer_angle_max);
        prop_assert!(out.abs() <= limits.max_angle(v_ego_raw, &model) + 1e-9);
    }

    /// Dynamics bounds never grow with speed.
    #[test]
    fn prop_dynamics_shrink_with_speed(v in 0.0f64..60.0, dv in 0.0f64..20.0) {
        let limits = DynamicsLimits::iso();
        let model = BicycleModel::psa();
        prop_assert!(limits.max_angle_delta(v + dv, &model) <= limits.max_angle_delta(v, &model) + 1e-12);
        prop_assert!(limits.max_angle(v + dv, &model) <= limits.max_angle(v, &model) + 1e-12);
    }

    /// Above the speed floor both dynamics bounds strictly decrease.
    #[test]
    fn prop_dynamics_strictly_shrink_above_floor(v in 1.0f64..60.0, dv in 0.01f64..20.0) {
        let limits = DynamicsLimits::iso();
        let model = BicycleModel::psa();
        prop_assert!(limits.max_angle_delta(v + dv, &model) < limits.max_angle_delta(v, &model));
        prop_assert!(limits.max_angle(v + dv, &model) < limits.max_angle(v, &model));
    }

    /// A tighter curve needs at least as much steering, and the limited
    /// output leaves no more headroom under the angle bound.
    #[test]
    fn prop_dynamics_monotone_in_curvature(
        v in 1.0f64..60.0,
        curvature in 0.0f64..0.2,
        extra in 0.0f64..0.2,
        left: bool,
    ) {
        let limits = DynamicsLimits::iso();
        let model = BicycleModel::psa();
        let sign = if left { 1.0 } else { -1.0 };
        let gentle = sign * curvature;
        let tight = sign * (curvature + extra);

        let gentle_angle = model.steer_from_curvature(gentle, v, 0.0).to_degrees();
        let tight_angle = model.steer_from_curvature(tight, v, 0.0).to_degrees();
        prop_assert!(gentle_angle.abs() <= tight_angle.abs() + 1e-12);

        let bound = limits.max_angle(v, &model);
        let gentle_out = apply_steer_angle_limits_vm(gentle_angle, 0.0, v, 0.0, true, &limits, &model);
        let tight_out = apply_steer_angle_limits_vm(tight_angle, 0.0, v, 0.0, true, &limits, &model);
        prop_assert!(gentle_out.abs() <= tight_out.abs() + 1e-12);
        prop_assert!(bound - tight_out.abs() <= bound - gentle_out.abs() + 1e-12);
        prop_assert!(tight_out.abs() <= bound + 1e-9);
    }

    /// The enum dispatch matches the free functions.
    #[test]
    fn prop_limiter_dispatch(request in finite(), last in -390.0f64..390.0, v in 0.0f64..40.0) {
        let ctx = SteerContext {
            v_ego: v,
            v_ego_raw: v,
            measured_angle: last,
            driver_torque: 0.0,
            active: true,
        };
        let table = AngleTableLimits::psa();
        let limiter = SteerLimiter::AngleTable(table.clone());
        prop_assert_eq!(
            limiter.limit(request, last, &ctx),
            apply_std_steer_angle_limits(request, last, v, last, true, &table)
        );

        let limits = DynamicsLimits::iso();
        let model = BicycleModel::psa();
        let limiter = SteerLimiter::AngleDynamics { limits, model: Arc::new(model) };
        prop_assert_eq!(
            limiter.limit(request, last, &ctx),
            apply_steer_angle_limits_vm(request, last, v, last, true, &limits, &model)
        );
    }
}

/// At each "up" table breakpoint the dynamics rate bound is at least as
/// permissive, so switching limiters never loosens growth. Above the speed
/// floor the table is also no more than twice as strict as the bound.
#[test]
fn up_table_tracks_dynamics_rate_at_breakpoints() {
    let table = AngleTableLimits::psa();
    let limits = DynamicsLimits::iso();
    let model = BicycleModel::psa();
    let mut compared = 0;
    for (speed, rate) in table.rate_up.speed_bp.iter().zip(&table.rate_up.angle_v) {
        let bound = limits.max_angle_delta(*speed, &model);
        assert!(*rate <= bound, "up rate {rate} exceeds dynamics bound {bound} at {speed} m/s");
        if *speed > limits.min_speed {
            assert!(bound <= 2.0 * rate, "up rate {rate} far below dynamics bound {bound} at {speed} m/s");
            compared += 1;
        }
    }
    assert_eq!(compared, 2);
}

/// A table far looser than the dynamics bound fails the upper side, and one
/// far stricter fails the lower side.
#[test]
fn dynamics_tolerance_rejects_tables_on_either_side() {
    let limits = DynamicsLimits::iso();
    let model = BicycleModel::psa();
    let bound = limits.max_angle_delta(15.0, &model);
    let within = |rate: f64| rate <= bound && bound <= 2.0 * rate;

    assert!(within(0.6));
    assert!(!within(bound * 1.5));
    assert!(!within(bound / 4.0));
}

#[test]
fn dynamics_ceilings_match_iso_with_roll() {
    let limits = DynamicsLimits::iso();
    assert_relative_eq!(limits.max_lateral_jerk(), 5.5886, epsilon = 1e-9);
    assert_relative_eq!(limits.max_lateral_accel(), 3.5886, epsilon = 1e-9);
}

#[test]
fn limits_deserialize_from_json() -> TestResult {
    let limits: TorqueLimits = serde_json::from_str(
        r#"{"steer_max":100.0,"delta_up":10.0,"delta_down":10.0,
            "driver_allowance":10.0,"driver_factor":1.0,"driver_multiplier":1.0}"#,
    )?;
    assert!(limits.inactive_decay);
    assert_eq!(limits, TorqueLimits::psa());
    Ok(())
}
