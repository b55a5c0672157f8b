//! Angle-space steering limiter derived from lateral dynamics ceilings.
//!
//! Lateral jerk and acceleration ceilings are converted to curvature at the
//! current speed, then to steering wheel angle through a [`VehicleModel`].
//! At low speed this allows fast, large moves; at highway speed the bounds
//! tighten quadratically with speed.

use serde::{Deserialize, Serialize};

use crate::{clip, finite_or};

/// Standard gravity (m/s²).
pub const ACCELERATION_DUE_TO_GRAVITY: f64 = 9.81;

/// Converts a path curvature into a steering wheel angle.
///
/// Implemented by the vehicle dynamics model. Implementations must be pure:
/// the same inputs always produce the same angle.
pub trait VehicleModel: Send + Sync {
    /// Steering wheel angle (rad) that holds `curvature` (1/m) at `speed`
    /// (m/s) on a road with `roll` (rad) bank.
    fn steer_from_curvature(&self, curvature: f64, speed: f64, roll: f64) -> f64;
}

/// Dynamics limiter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicsLimits {
    /// Baseline lateral acceleration ceiling (m/s²)
    pub iso_lateral_accel: f64,
    /// Baseline lateral jerk ceiling (m/s³)
    pub iso_lateral_jerk: f64,
    /// Road roll tolerance (rad) added to both ceilings as `g * roll`
    pub average_road_roll: f64,
    /// Control loop period (s)
    pub dt: f64,
    /// Control cycles per steering command
    pub steer_step: u32,
    /// Speed floor (m/s) applied before dividing by speed squared
    pub min_speed: f64,
    /// Absolute angle limit (deg)
    pub steer_angle_max: f64,
}

impl DynamicsLimits {
    /// ISO 11270 comfort ceilings at 100 Hz.
    pub fn iso() -> Self {
        Self {
            iso_lateral_accel: 3.0,
            iso_lateral_jerk: 5.0,
            average_road_roll: 0.06,
            dt: 0.01,
            steer_step: 1,
            min_speed: 1.0,
            steer_angle_max: 390.0,
        }
    }

    /// Lateral jerk ceiling including the road roll tolerance.
    pub fn max_lateral_jerk(&self) -> f64 {
        self.iso_lateral_jerk + ACCELERATION_DUE_TO_GRAVITY * self.average_road_roll
    }

    /// Lateral acceleration ceiling including the road roll tolerance.
    pub fn max_lateral_accel(&self) -> f64 {
        self.iso_lateral_accel + ACCELERATION_DUE_TO_GRAVITY * self.average_road_roll
    }

    fn floor_speed(&self, v_ego_raw: f64) -> f64 {
        finite_or(v_ego_raw, 0.0).max(self.min_speed)
    }

    /// Maximum per-command angle change (deg) at `v_ego_raw`.
    pub fn max_angle_delta<M: VehicleModel + ?Sized>(&self, v_ego_raw: f64, model: &M) -> f64 {
        let v = self.floor_speed(v_ego_raw);
        let max_curvature_rate = self.max_lateral_jerk() / (v * v);
        let rate_per_sec = model.steer_from_curvature(max_curvature_rate, v, 0.0).to_degrees();
        rate_per_sec * self.dt * f64::from(self.steer_step)
    }

    /// Maximum absolute angle (deg) at `v_ego_raw`.
    pub fn max_angle<M: VehicleModel + ?Sized>(&self, v_ego_raw: f64, model: &M) -> f64 {
        let v = self.floor_speed(v_ego_raw);
        let max_curvature = self.max_lateral_accel() / (v * v);
        model.steer_from_curvature(max_curvature, v, 0.0).to_degrees()
    }
}

impl Default for DynamicsLimits {
    fn default() -> Self {
        Self::iso()
    }
}

/// Rate- and magnitude-limit an angle request from dynamics ceilings.
///
/// Sequence: rate limit against `last`, clip to the dynamics angle bound,
/// follow the measured angle while inactive, clip to the absolute maximum.
/// A model returning a non-finite or negative bound collapses that bound to
/// zero.
pub fn apply_steer_angle_limits_vm<M: VehicleModel + ?Sized>(
    request: f64,
    last: f64,
    v_ego_raw: f64,
    measured_angle: f64,
    active: bool,
    limits: &DynamicsLimits,
    model: &M,
) -> f64 {
    let max = limits.steer_angle_max;
    let measured = finite_or(measured_angle, 0.0);
    if !active {
        return clip(measured, -max, max);
    }

    let last = finite_or(last, measured);
    let request = finite_or(request, last);

    let max_delta = finite_or(limits.max_angle_delta(v_ego_raw, model), 0.0).max(0.0);
    let mut angle = clip(request, last - max_delta, last + max_delta);

    let max_angle = finite_or(limits.max_angle(v_ego_raw, model), 0.0).max(0.0);
    angle = clip(angle, -max_angle, max_angle);

    clip(finite_or(angle, 0.0), -max, max)
}
