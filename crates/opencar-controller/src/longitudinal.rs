//! Acceleration to powertrain request mapping.

use opencar_lateral::interp;
use opencar_profile::{BrakeModeConfig, LongitudinalConfig};

/// Wheel torque (Nm) for a requested acceleration, clamped to the
/// powertrain limits. A non-finite request maps as zero acceleration.
pub fn accel_to_wheel_torque(accel: f64, config: &LongitudinalConfig) -> f64 {
    let accel = if accel.is_finite() { accel } else { 0.0 };
    let torque = interp(accel, &config.accel_bp, &config.torque_v);
    torque.max(config.torque_min).min(config.torque_max)
}

/// Deceleration magnitude (m/s²) for a requested acceleration.
pub fn accel_to_deceleration(accel: f64, config: &BrakeModeConfig) -> f64 {
    if accel.is_finite() {
        (-accel).max(0.0).min(config.max_deceleration)
    } else {
        0.0
    }
}

/// Engine-torque vs friction-brake decision with hysteresis.
///
/// Friction braking engages once the request drops below `engage_below`
/// and releases once it rises above `release_above`. With `gas_overrides`
/// a pressed gas pedal always selects engine torque. A non-finite request
/// keeps the previous mode.
pub fn friction_brake_mode(
    braking: bool,
    accel: f64,
    gas_pressed: bool,
    config: &BrakeModeConfig,
) -> bool {
    if config.gas_overrides && gas_pressed {
        return false;
    }
    if !accel.is_finite() {
        return braking;
    }
    if braking {
        accel <= config.release_above
    } else {
        accel < config.engage_below
    }
}
