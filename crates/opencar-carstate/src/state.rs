//! Normalized vehicle state

use opencar_can_common::SignalValues;
use opencar_psa_protocol::EpsLkaState;

/// Wheel speeds (m/s), already scaled by the profile's wheel speed factor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
}

impl WheelSpeeds {
    pub fn mean(&self) -> f64 {
        (self.front_left + self.front_right + self.rear_left + self.rear_right) / 4.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gear {
    #[default]
    Drive,
    Reverse,
}

/// Cruise control status.
///
/// `available`, `standstill` and `non_adaptive` have no signal on the bus
/// and are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CruiseState {
    /// Set speed (m/s); 255 km/h while ACC is off
    pub speed: f64,
    pub enabled: bool,
    pub available: bool,
    pub standstill: bool,
    pub non_adaptive: bool,
}

/// One cycle's decoded vehicle state.
///
/// Produced fresh on every decode. Carry-forward groups are owned copies;
/// the encoder builds its echoes from them without touching decoder state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleState {
    pub wheel_speeds: WheelSpeeds,
    /// Filtered speed (m/s)
    pub v_ego: f64,
    /// Mean wheel speed (m/s)
    pub v_ego_raw: f64,
    /// Estimated longitudinal acceleration (m/s²)
    pub a_ego: f64,
    /// Yaw rate (rad/s)
    pub yaw_rate: f64,
    pub standstill: bool,

    /// Steering wheel angle (deg)
    pub steering_angle_deg: f64,
    /// Signed steering wheel rate (deg/s)
    pub steering_rate_deg: f64,
    /// Driver torque (Nm)
    pub steering_torque: f64,
    /// EPS measured torque
    pub steering_torque_eps: f64,
    /// Debounced driver override
    pub steering_pressed: bool,
    pub eps_lka_state: EpsLkaState,

    pub gas_pressed: bool,
    pub brake_pressed: bool,
    /// Only the "engaged" state counts; a moving actuator does not
    pub parking_brake: bool,

    pub cruise: CruiseState,
    pub acc_faulted: bool,

    pub gear: Gear,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub door_open: bool,
    pub seatbelt_unlatched: bool,

    /// Lead target reported by the radar ECU this cycle
    pub lead_detected: bool,
    /// Last observed `HS2_DAT_MDD_CMD_452` group
    pub cruise_command: SignalValues,
    /// Last observed `HS2_DYN_MDD_ETAT_2F6` group, if the radar has ever sent one
    pub radar_status: Option<SignalValues>,
}

impl VehicleState {
    /// Whether the EPS reports that it accepts lane keeping commands.
    pub fn eps_authorized(&self) -> bool {
        self.eps_lka_state.is_authorized()
    }
}
