//! Per-cycle actuator request from the planner.

/// What the planner wants this cycle.
///
/// Only the setpoint matching the profile's steering control type is read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuatorRequest {
    /// Lateral control engaged
    pub lat_active: bool,
    /// Longitudinal control engaged (owned longitudinal only)
    pub long_active: bool,
    /// Normalized steering torque in `[-1, 1]`, scaled by the limiter maximum
    pub steering_torque: f64,
    /// Steering wheel angle (deg)
    pub steering_angle_deg: f64,
    /// Longitudinal acceleration (m/s²)
    pub accel: f64,
    /// Cancel stock ACC (stock longitudinal only)
    pub cancel: bool,
}

impl ActuatorRequest {
    /// Lateral-only request steering to `angle_deg`.
    pub fn angle(angle_deg: f64) -> Self {
        Self {
            lat_active: true,
            steering_angle_deg: angle_deg,
            ..Self::default()
        }
    }

    /// Lateral-only request with normalized `torque`.
    pub fn torque(torque: f64) -> Self {
        Self {
            lat_active: true,
            steering_torque: torque,
            ..Self::default()
        }
    }

    pub fn with_accel(mut self, accel: f64) -> Self {
        self.long_active = true;
        self.accel = accel;
        self
    }
}

/// Command actually sent after limiting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AppliedCommand {
    /// Applied torque divided by the limiter maximum
    pub torque: f64,
    /// Applied torque in EPS units, as written to the bus
    pub torque_output: f64,
    /// Applied steering angle (deg)
    pub steering_angle_deg: f64,
}
