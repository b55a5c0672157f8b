//! Steering limiters for lateral control
//!
//! Every outgoing steering command passes through one of three limiters,
//! chosen per vehicle profile:
//!
//! - [`torque`]: per-cycle torque rate limit with driver-override allowance
//! - [`angle`]: per-cycle angle rate limit from speed-indexed tables
//! - [`dynamics`]: per-cycle angle rate and magnitude limits derived from
//!   lateral jerk and acceleration ceilings through a [`VehicleModel`]
//!
//! [`SteerLimiter`] wraps the three behind one `limit` call.
//!
//! # RT Safety
//!
//! All limiters are pure functions over `f64`:
//! - No heap allocations
//! - O(n) in the breakpoint table length, O(1) otherwise
//! - Output is always finite and within the profile's absolute maximum
//!
//! # Example
//!
//! ```
//! use opencar_lateral::{SteerContext, SteerLimiter, TorqueLimits};
//!
//! let limiter = SteerLimiter::Torque(TorqueLimits::psa());
//! let ctx = SteerContext { active: true, ..SteerContext::default() };
//!
//! // Rate limited to +10 per cycle
//! let out = limiter.limit(100.0, 0.0, &ctx);
//! assert!((out - 10.0).abs() < 1e-9);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod angle;
pub mod dynamics;
pub mod interp;
pub mod limiter;
pub mod torque;

pub use angle::{AngleRateLimit, AngleTableLimits, apply_std_steer_angle_limits};
pub use dynamics::{
    ACCELERATION_DUE_TO_GRAVITY, DynamicsLimits, VehicleModel, apply_steer_angle_limits_vm,
};
pub use interp::interp;
pub use limiter::{SteerContext, SteerControlType, SteerLimiter};
pub use torque::{TorqueLimits, apply_driver_steer_torque_limits};

/// Clip `value` into `[lo, hi]`, preferring `hi` if the bounds cross.
///
/// Unlike [`f64::clamp`] this never panics on crossed or NaN bounds.
#[inline]
pub(crate) fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Replace a non-finite value with `fallback`.
#[inline]
pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
