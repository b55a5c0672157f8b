//! Torque-space steering limiter.
//!
//! The command is bounded three ways, in order:
//!
//! 1. Magnitude: `|command| <= steer_max`
//! 2. Driver allowance: the bound on the side the driver is pushing against
//!    shrinks as driver torque grows, so the system yields to a driver
//!    override instead of fighting it
//! 3. Rate: `delta_up` while moving away from zero, `delta_down` toward it

use serde::{Deserialize, Serialize};

use crate::{clip, finite_or};

/// Torque limiter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorqueLimits {
    /// Absolute torque command limit
    pub steer_max: f64,
    /// Maximum per-cycle change away from zero
    pub delta_up: f64,
    /// Maximum per-cycle change toward zero
    pub delta_down: f64,
    /// Driver torque (Nm) tolerated before the allowance starts shrinking
    pub driver_allowance: f64,
    /// Scale from driver torque to command units
    pub driver_factor: f64,
    /// Scale of the allowance correction
    pub driver_multiplier: f64,
    /// When inactive, ramp to zero at `delta_down` instead of snapping
    #[serde(default = "default_inactive_decay")]
    pub inactive_decay: bool,
}

fn default_inactive_decay() -> bool {
    true
}

impl TorqueLimits {
    /// Limits for AEE2010 lane keeping torque commands.
    pub fn psa() -> Self {
        Self {
            steer_max: 100.0,
            delta_up: 10.0,
            delta_down: 10.0,
            driver_allowance: 10.0,
            driver_factor: 1.0,
            driver_multiplier: 1.0,
            inactive_decay: true,
        }
    }

    /// Bound `request` given the previously applied command.
    ///
    /// While inactive the request is ignored: the output either ramps toward
    /// zero at `delta_down` (`inactive_decay`) or drops to zero immediately.
    /// Non-finite inputs are treated as zero.
    pub fn limit(&self, request: f64, last: f64, driver_torque: f64, active: bool) -> f64 {
        let last = clip(finite_or(last, 0.0), -self.steer_max, self.steer_max);
        if !active {
            if !self.inactive_decay {
                return 0.0;
            }
            let decayed = if last > 0.0 {
                (last - self.delta_down).max(0.0)
            } else {
                (last + self.delta_down).min(0.0)
            };
            return clip(decayed, -self.steer_max, self.steer_max);
        }
        apply_driver_steer_torque_limits(
            finite_or(request, 0.0),
            last,
            finite_or(driver_torque, 0.0),
            self,
        )
    }
}

impl Default for TorqueLimits {
    fn default() -> Self {
        Self::psa()
    }
}

/// Apply magnitude, driver-allowance and rate limits to a torque request.
///
/// The result is rounded to the nearest integer, ties to even, since EPS
/// torque commands are integral on the wire.
pub fn apply_driver_steer_torque_limits(
    request: f64,
    last: f64,
    driver_torque: f64,
    limits: &TorqueLimits,
) -> f64 {
    let steer_max = limits.steer_max;
    let driver_term = driver_torque * limits.driver_factor;

    // Pushing against the command shrinks the allowed magnitude on that side.
    let driver_max_torque =
        steer_max + (limits.driver_allowance + driver_term) * limits.driver_multiplier;
    let driver_min_torque =
        -steer_max + (-limits.driver_allowance + driver_term) * limits.driver_multiplier;
    let max_allowed = steer_max.min(driver_max_torque).max(0.0);
    let min_allowed = (-steer_max).max(driver_min_torque).min(0.0);
    let mut torque = clip(request, min_allowed, max_allowed);

    if last > 0.0 {
        let lower = (last - limits.delta_down).max(-limits.delta_up);
        torque = clip(torque, lower, last + limits.delta_up);
    } else {
        let upper = (last + limits.delta_down).min(limits.delta_up);
        torque = clip(torque, last - limits.delta_up, upper);
    }

    clip(finite_or(torque.round_ties_even(), 0.0), -steer_max, steer_max)
}
