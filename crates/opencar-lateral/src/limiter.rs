//! Limiter selection.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::angle::{AngleTableLimits, apply_std_steer_angle_limits};
use crate::dynamics::{DynamicsLimits, VehicleModel, apply_steer_angle_limits_vm};
use crate::torque::TorqueLimits;

/// Whether the EPS takes torque or angle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteerControlType {
    /// Torque setpoint
    Torque,
    /// Steering wheel angle setpoint
    Angle,
}

/// Vehicle state the limiters read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteerContext {
    /// Filtered speed (m/s)
    pub v_ego: f64,
    /// Unfiltered speed (m/s)
    pub v_ego_raw: f64,
    /// Measured steering wheel angle (deg)
    pub measured_angle: f64,
    /// Driver torque (Nm)
    pub driver_torque: f64,
    /// Lateral control requested
    pub active: bool,
}

/// Steering limiter chosen once per vehicle profile.
#[derive(Clone)]
pub enum SteerLimiter {
    /// Torque rate limiter with driver allowance
    Torque(TorqueLimits),
    /// Angle rate limiter with static speed tables
    AngleTable(AngleTableLimits),
    /// Angle rate limiter with dynamics-derived bounds
    AngleDynamics {
        /// Dynamics ceilings
        limits: DynamicsLimits,
        /// Curvature to steering angle conversion
        model: Arc<dyn VehicleModel>,
    },
}

impl SteerLimiter {
    /// Bound `request` given the previously applied command `last`.
    ///
    /// The output is finite and within the variant's absolute maximum for
    /// every input.
    pub fn limit(&self, request: f64, last: f64, ctx: &SteerContext) -> f64 {
        match self {
            SteerLimiter::Torque(limits) => {
                limits.limit(request, last, ctx.driver_torque, ctx.active)
            }
            SteerLimiter::AngleTable(limits) => apply_std_steer_angle_limits(
                request,
                last,
                ctx.v_ego,
                ctx.measured_angle,
                ctx.active,
                limits,
            ),
            SteerLimiter::AngleDynamics { limits, model } => apply_steer_angle_limits_vm(
                request,
                last,
                ctx.v_ego_raw,
                ctx.measured_angle,
                ctx.active,
                limits,
                model.as_ref(),
            ),
        }
    }

    /// Setpoint type produced by this limiter.
    pub fn control_type(&self) -> SteerControlType {
        match self {
            SteerLimiter::Torque(_) => SteerControlType::Torque,
            SteerLimiter::AngleTable(_) | SteerLimiter::AngleDynamics { .. } => {
                SteerControlType::Angle
            }
        }
    }

    /// Absolute output limit.
    pub fn absolute_max(&self) -> f64 {
        match self {
            SteerLimiter::Torque(limits) => limits.steer_max,
            SteerLimiter::AngleTable(limits) => limits.steer_angle_max,
            SteerLimiter::AngleDynamics { limits, .. } => limits.steer_angle_max,
        }
    }
}

impl fmt::Debug for SteerLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SteerLimiter::Torque(limits) => f.debug_tuple("Torque").field(limits).finish(),
            SteerLimiter::AngleTable(limits) => f.debug_tuple("AngleTable").field(limits).finish(),
            SteerLimiter::AngleDynamics { limits, .. } => f
                .debug_struct("AngleDynamics")
                .field("limits", limits)
                .finish_non_exhaustive(),
        }
    }
}
