//! Profile validation

use opencar_errors::{ProfileError, ProfileResult};
use opencar_lateral::{AngleRateLimit, AngleTableLimits, DynamicsLimits, TorqueLimits};
use opencar_psa_protocol::ChecksumTable;

use crate::{
    LimiterConfig, LongitudinalConfig, ResumeConfig, StateConfig, SteeringConfig, VehicleProfile,
};

pub fn validate_profile(profile: &VehicleProfile) -> ProfileResult<()> {
    if profile.name.trim().is_empty() {
        return Err(ProfileError::invalid("name", "cannot be empty"));
    }

    positive("timing.dt", profile.timing.dt)?;
    nonzero("timing.steer_step", profile.timing.steer_step)?;

    validate_steering(&profile.steering)?;
    validate_state(&profile.state)?;
    validate_longitudinal(&profile.longitudinal)?;
    validate_resume(&profile.resume)?;

    nonzero(
        "diagnostics.tester_present_period",
        profile.diagnostics.tester_present_period,
    )?;
    validate_checksum(&profile.checksum)?;

    Ok(())
}

pub fn validate_steering(steering: &SteeringConfig) -> ProfileResult<()> {
    match &steering.limiter {
        LimiterConfig::Torque(limits) => validate_torque(limits)?,
        LimiterConfig::AngleTable(limits) => validate_angle_table(limits)?,
        LimiterConfig::AngleDynamics(limits) => validate_dynamics(limits)?,
    }
    positive("steering.driver_allowance", steering.driver_allowance)?;
    if let LimiterConfig::Torque(limits) = &steering.limiter {
        // Pressed detection and the torque limiter must agree on the threshold.
        if (limits.driver_allowance - steering.driver_allowance).abs() > f64::EPSILON {
            return Err(ProfileError::invalid(
                "steering.limiter.driver_allowance",
                "must equal steering.driver_allowance",
            ));
        }
    }
    nonzero("steering.debounce.cycles", steering.debounce.cycles)?;
    if !(0.0..=100.0).contains(&steering.eps_torque_factor) {
        return Err(ProfileError::invalid(
            "steering.eps_torque_factor",
            "must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_torque(limits: &TorqueLimits) -> ProfileResult<()> {
    positive("steering.limiter.steer_max", limits.steer_max)?;
    positive("steering.limiter.delta_up", limits.delta_up)?;
    positive("steering.limiter.delta_down", limits.delta_down)?;
    non_negative("steering.limiter.driver_allowance", limits.driver_allowance)?;
    non_negative("steering.limiter.driver_factor", limits.driver_factor)?;
    non_negative("steering.limiter.driver_multiplier", limits.driver_multiplier)?;
    Ok(())
}

fn validate_angle_table(limits: &AngleTableLimits) -> ProfileResult<()> {
    validate_rate_table("steering.limiter.rate_up", &limits.rate_up)?;
    validate_rate_table("steering.limiter.rate_down", &limits.rate_down)?;
    positive("steering.limiter.steer_angle_max", limits.steer_angle_max)
}

fn validate_rate_table(field: &str, table: &AngleRateLimit) -> ProfileResult<()> {
    breakpoints(field, &table.speed_bp, &table.angle_v)?;
    if table.angle_v.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ProfileError::invalid(field, "rates must be finite and non-negative"));
    }
    Ok(())
}

fn validate_dynamics(limits: &DynamicsLimits) -> ProfileResult<()> {
    positive("steering.limiter.iso_lateral_accel", limits.iso_lateral_accel)?;
    positive("steering.limiter.iso_lateral_jerk", limits.iso_lateral_jerk)?;
    non_negative("steering.limiter.average_road_roll", limits.average_road_roll)?;
    positive("steering.limiter.min_speed", limits.min_speed)?;
    positive("steering.limiter.steer_angle_max", limits.steer_angle_max)
}

pub fn validate_state(state: &StateConfig) -> ProfileResult<()> {
    positive("state.wheel_speed_factor", state.wheel_speed_factor)?;
    non_negative("state.standstill_threshold", state.standstill_threshold)?;

    let filter = &state.speed_filter;
    positive("state.speed_filter.dt", filter.dt)?;
    positive("state.speed_filter.reset_threshold", filter.reset_threshold)?;
    if filter.gains.iter().any(|k| !k.is_finite()) {
        return Err(ProfileError::invalid("state.speed_filter.gains", "must be finite"));
    }
    Ok(())
}

pub fn validate_longitudinal(longitudinal: &LongitudinalConfig) -> ProfileResult<()> {
    breakpoints(
        "longitudinal.accel_bp",
        &longitudinal.accel_bp,
        &longitudinal.torque_v,
    )?;
    if longitudinal.torque_v.iter().any(|v| !v.is_finite()) {
        return Err(ProfileError::invalid("longitudinal.torque_v", "must be finite"));
    }
    if !(longitudinal.torque_min < longitudinal.torque_max) {
        return Err(ProfileError::invalid(
            "longitudinal.torque_min",
            "must be below torque_max",
        ));
    }

    let brake = &longitudinal.brake;
    if !(brake.engage_below <= brake.release_above) {
        return Err(ProfileError::invalid(
            "longitudinal.brake.engage_below",
            "must not exceed release_above",
        ));
    }
    positive("longitudinal.brake.max_deceleration", brake.max_deceleration)?;

    nonzero("longitudinal.status_step", longitudinal.status_step)?;
    nonzero("longitudinal.target_step", longitudinal.target_step)?;
    nonzero("longitudinal.supervision_step", longitudinal.supervision_step)?;
    Ok(())
}

pub fn validate_resume(resume: &ResumeConfig) -> ProfileResult<()> {
    nonzero("resume.period", resume.period)?;
    if resume.pulse_cycles > resume.period {
        return Err(ProfileError::invalid(
            "resume.pulse_cycles",
            "must not exceed period",
        ));
    }
    Ok(())
}

pub fn validate_checksum(table: &ChecksumTable) -> ProfileResult<()> {
    if table.default_init > 0x0F {
        return Err(ProfileError::invalid("checksum.default_init", "must fit a nibble"));
    }
    if let Some((address, _)) = table.overrides.iter().find(|(_, init)| **init > 0x0F) {
        return Err(ProfileError::invalid(
            format!("checksum.overrides.0x{address:03X}"),
            "must fit a nibble",
        ));
    }
    Ok(())
}

fn breakpoints(field: &str, xp: &[f64], fp: &[f64]) -> ProfileResult<()> {
    if xp.is_empty() {
        return Err(ProfileError::invalid(field, "table cannot be empty"));
    }
    if xp.len() != fp.len() {
        return Err(ProfileError::invalid(
            field,
            format!("{} breakpoints but {} values", xp.len(), fp.len()),
        ));
    }
    if xp.iter().any(|x| !x.is_finite()) {
        return Err(ProfileError::invalid(field, "breakpoints must be finite"));
    }
    if xp.windows(2).any(|w| matches!(w, [a, b] if a >= b)) {
        return Err(ProfileError::invalid(field, "breakpoints must be strictly increasing"));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> ProfileResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::invalid(field, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> ProfileResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::invalid(field, "must be non-negative"))
    }
}

fn nonzero(field: &str, value: u32) -> ProfileResult<()> {
    if value == 0 {
        Err(ProfileError::invalid(field, "must be at least 1"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DebouncePolicy;

    #[test]
    fn test_validate_profile_valid() {
        assert!(validate_profile(&VehicleProfile::psa()).is_ok());
    }

    #[test]
    fn test_validate_profile_empty_name() {
        let mut profile = VehicleProfile::psa();
        profile.name = "  ".to_string();
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_angle_profiles_valid() {
        let table = VehicleProfile::psa().with_limiter(LimiterConfig::AngleTable(AngleTableLimits::psa()));
        assert!(validate_profile(&table).is_ok());
        let dynamics = VehicleProfile::psa().with_limiter(LimiterConfig::AngleDynamics(DynamicsLimits::iso()));
        assert!(validate_profile(&dynamics).is_ok());
    }

    #[test]
    fn test_non_monotonic_table() {
        let mut limits = AngleTableLimits::psa();
        limits.rate_up.speed_bp = vec![0.0, 15.0, 5.0];
        let profile = VehicleProfile::psa().with_limiter(LimiterConfig::AngleTable(limits));
        let err = validate_profile(&profile).err();
        insta::assert_snapshot!(
            format!("{err:?}"),
            @r#"Some(InvalidField { field: "steering.limiter.rate_up", reason: "breakpoints must be strictly increasing" })"#
        );
    }

    #[test]
    fn test_mismatched_table_lengths() {
        let mut profile = VehicleProfile::psa();
        profile.longitudinal.torque_v.pop();
        let err = validate_profile(&profile).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Invalid profile field longitudinal.accel_bp: 4 breakpoints but 3 values")
        );
    }

    #[test]
    fn test_zero_debounce_window() {
        let mut profile = VehicleProfile::psa();
        profile.steering.debounce.cycles = 0;
        profile.steering.debounce.policy = DebouncePolicy::Symmetric;
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_zero_cadence() {
        let mut profile = VehicleProfile::psa();
        profile.longitudinal.status_step = 0;
        assert!(validate_profile(&profile).is_err());

        let mut profile = VehicleProfile::psa();
        profile.diagnostics.tester_present_period = 0;
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_checksum_init_wider_than_nibble() {
        let mut profile = VehicleProfile::psa();
        profile.checksum.overrides.insert(0x3F2, 0x10);
        let err = validate_profile(&profile).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Invalid profile field checksum.overrides.0x3F2: must fit a nibble")
        );
    }

    #[test]
    fn test_non_positive_limits() {
        let mut limits = TorqueLimits::psa();
        limits.steer_max = 0.0;
        let profile = VehicleProfile::psa().with_limiter(LimiterConfig::Torque(limits));
        assert!(validate_profile(&profile).is_err());

        let mut limits = DynamicsLimits::iso();
        limits.min_speed = f64::NAN;
        let profile = VehicleProfile::psa().with_limiter(LimiterConfig::AngleDynamics(limits));
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_torque_driver_allowance_must_match() {
        let mut limits = TorqueLimits::psa();
        limits.driver_allowance = 12.0;
        let profile = VehicleProfile::psa().with_limiter(LimiterConfig::Torque(limits));
        let err = validate_profile(&profile).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Invalid profile field steering.limiter.driver_allowance: must equal steering.driver_allowance")
        );

        let mut profile = VehicleProfile::psa().with_limiter(LimiterConfig::Torque(limits));
        profile.steering.driver_allowance = 12.0;
        assert!(validate_profile(&profile).is_ok());

        let mut angle = VehicleProfile::psa().with_limiter(LimiterConfig::AngleTable(AngleTableLimits::psa()));
        angle.steering.driver_allowance = 12.0;
        assert!(validate_profile(&angle).is_ok());
    }

    #[test]
    fn test_brake_hysteresis_order() {
        let mut profile = VehicleProfile::psa();
        profile.longitudinal.brake.engage_below = 0.0;
        profile.longitudinal.brake.release_above = -1.0;
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_pulse_longer_than_period() {
        let mut profile = VehicleProfile::psa();
        profile.resume.pulse_cycles = 301;
        assert!(validate_profile(&profile).is_err());
    }
}
