//! Speed estimator
//!
//! Steady-state two-state Kalman filter over raw speed samples:
//!
//! ```text
//! x0' = (1 - K0) * x0 + dt * x1 + K0 * z
//! x1' = -K1 * x0 + x1 + K1 * z
//! ```
//!
//! `x0` is the smoothed speed and `x1` the acceleration estimate. When a raw
//! sample differs from the estimate by more than `reset_threshold` the state
//! is re-seeded to `[z, 0]` before the update, so the estimator does not lag
//! behind a wheel-speed glitch recovery or a restart.

use opencar_profile::SpeedFilterConfig;
use tracing::debug;

/// Estimator state.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedFilter {
    config: SpeedFilterConfig,
    speed: f64,
    accel: f64,
}

impl SpeedFilter {
    pub fn new(config: SpeedFilterConfig) -> Self {
        Self {
            config,
            speed: 0.0,
            accel: 0.0,
        }
    }

    /// Feed one raw speed sample (m/s) and return `(speed, accel)`.
    ///
    /// A non-finite sample leaves the state untouched.
    pub fn update(&mut self, raw: f64) -> (f64, f64) {
        if !raw.is_finite() {
            return (self.speed, self.accel);
        }

        if (raw - self.speed).abs() > self.config.reset_threshold {
            debug!(raw, estimate = self.speed, "re-seeding speed estimator");
            self.speed = raw;
            self.accel = 0.0;
        }

        let [k0, k1] = self.config.gains;
        let (x0, x1) = (self.speed, self.accel);
        self.speed = (1.0 - k0) * x0 + self.config.dt * x1 + k0 * raw;
        self.accel = -k1 * x0 + x1 + k1 * raw;
        (self.speed, self.accel)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn accel(&self) -> f64 {
        self.accel
    }

    pub fn reset(&mut self) {
        self.speed = 0.0;
        self.accel = 0.0;
    }
}

impl Default for SpeedFilter {
    fn default() -> Self {
        Self::new(SpeedFilterConfig::default())
    }
}
