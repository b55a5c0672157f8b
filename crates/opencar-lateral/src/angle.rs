//! Angle-space steering limiter backed by speed-indexed tables.

use serde::{Deserialize, Serialize};

use crate::interp::interp;
use crate::{clip, finite_or};

/// Speed-indexed per-cycle angle delta table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleRateLimit {
    /// Speed breakpoints (m/s), ascending
    pub speed_bp: Vec<f64>,
    /// Allowed per-cycle angle change (deg) at each breakpoint
    pub angle_v: Vec<f64>,
}

impl AngleRateLimit {
    /// Allowed per-cycle delta at `speed`.
    pub fn at(&self, speed: f64) -> f64 {
        interp(speed, &self.speed_bp, &self.angle_v)
    }
}

/// Static-table angle limiter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleTableLimits {
    /// Table used while the command grows away from zero
    pub rate_up: AngleRateLimit,
    /// Table used while the command shrinks or crosses zero
    pub rate_down: AngleRateLimit,
    /// Absolute angle limit (deg)
    pub steer_angle_max: f64,
}

impl AngleTableLimits {
    /// Limits for AEE2010 angle-controlled EPS.
    pub fn psa() -> Self {
        Self {
            rate_up: AngleRateLimit {
                speed_bp: vec![0.0, 5.0, 15.0],
                angle_v: vec![20.0, 3.2, 0.6],
            },
            rate_down: AngleRateLimit {
                speed_bp: vec![0.0, 5.0, 15.0],
                angle_v: vec![20.0, 14.0, 1.6],
            },
            steer_angle_max: 390.0,
        }
    }
}

impl Default for AngleTableLimits {
    fn default() -> Self {
        Self::psa()
    }
}

/// Rate- and magnitude-limit an angle request.
///
/// The "up" table applies when the request keeps the sign of the last
/// command and grows its magnitude; every other move uses the "down" table.
/// While inactive the output follows the measured steering angle, so there
/// is no windup when control resumes.
///
/// Non-finite inputs fall back in the order request, last, measured, zero.
pub fn apply_std_steer_angle_limits(
    request: f64,
    last: f64,
    v_ego: f64,
    measured_angle: f64,
    active: bool,
    limits: &AngleTableLimits,
) -> f64 {
    let max = limits.steer_angle_max;
    let measured = finite_or(measured_angle, 0.0);
    if !active {
        return clip(measured, -max, max);
    }

    let last = finite_or(last, measured);
    let request = finite_or(request, last);
    let v_ego = finite_or(v_ego, 0.0).abs();

    let steer_up = last * request >= 0.0 && request.abs() > last.abs();
    let table = if steer_up {
        &limits.rate_up
    } else {
        &limits.rate_down
    };
    let rate = table.at(v_ego).max(0.0);

    let angle = clip(request, last - rate, last + rate);
    clip(finite_or(angle, 0.0), -max, max)
}
