//! Bus snapshot to [`VehicleState`].

use opencar_can_common::{BusSnapshot, SignalValues};
use opencar_errors::{DecodeError, DecodeResult};
use opencar_profile::{GasSource, StateConfig, VehicleProfile};
use opencar_psa_protocol::ids::{bus, messages as msg, signals};
use opencar_psa_protocol::EpsLkaState;
use tracing::trace;

use crate::debounce::SteeringPressedDebounce;
use crate::speed::SpeedFilter;
use crate::state::{CruiseState, Gear, VehicleState, WheelSpeeds};

const KPH_TO_MS: f64 = 1.0 / 3.6;

fn raw_eq(value: f64, expected: f64) -> bool {
    (value - expected).abs() < 0.5
}

/// Read-only view over one snapshot that reports absent groups and signals.
struct Groups<'a> {
    snapshot: &'a BusSnapshot,
}

impl<'a> Groups<'a> {
    fn group(&self, bus: u8, message: &str) -> DecodeResult<Group<'a>> {
        self.snapshot
            .group(bus, message)
            .map(|values| Group {
                bus,
                message: message.to_string(),
                values,
            })
            .ok_or_else(|| DecodeError::missing_message(bus, message))
    }
}

struct Group<'a> {
    bus: u8,
    message: String,
    values: &'a SignalValues,
}

impl Group<'_> {
    fn get(&self, signal: &str) -> DecodeResult<f64> {
        self.values
            .get(signal)
            .copied()
            .ok_or_else(|| DecodeError::missing_signal(self.bus, self.message.as_str(), signal))
    }
}

/// Per-vehicle state decoder.
///
/// Owns the steering debounce window, the speed estimator and the
/// carry-forward copy of the radar status group. A failed decode leaves all
/// of them untouched.
#[derive(Debug, Clone)]
pub struct CarStateDecoder {
    config: StateConfig,
    driver_allowance: f64,
    debounce: SteeringPressedDebounce,
    speed: SpeedFilter,
    radar_status: Option<SignalValues>,
}

impl CarStateDecoder {
    pub fn new(profile: &VehicleProfile) -> Self {
        Self {
            config: profile.state,
            driver_allowance: profile.steering.driver_allowance,
            debounce: SteeringPressedDebounce::new(profile.steering.debounce),
            speed: SpeedFilter::new(profile.state.speed_filter),
            radar_status: None,
        }
    }

    /// Decode one cycle.
    ///
    /// Out-of-range values pass through unchanged. `HS2_DYN_MDD_ETAT_2F6`
    /// is optional; when absent the last observed copy is carried forward.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingMessage`] if a mandatory group is
    /// absent, or [`DecodeError::MissingSignal`] if a present group lacks a
    /// signal this decoder reads.
    pub fn update(&mut self, snapshot: &BusSnapshot) -> DecodeResult<VehicleState> {
        let groups = Groups { snapshot };

        let dyn4 = groups.group(bus::MAIN, msg::DYN4_FRE)?;
        let factor = KPH_TO_MS * self.config.wheel_speed_factor;
        let wheel_speeds = WheelSpeeds {
            front_left: dyn4.get(signals::dyn4_fre::WHEEL_FL)? * factor,
            front_right: dyn4.get(signals::dyn4_fre::WHEEL_FR)? * factor,
            rear_left: dyn4.get(signals::dyn4_fre::WHEEL_RL)? * factor,
            rear_right: dyn4.get(signals::dyn4_fre::WHEEL_RR)? * factor,
        };
        let v_ego_raw = wheel_speeds.mean();

        let yaw_rate = groups
            .group(bus::ADAS, msg::HS2_DYN_UCF_MDD_32D)?
            .get(signals::hs2_dyn_ucf_mdd_32d::YAW_RATE)?
            .to_radians();

        let gas = match self.config.gas_source {
            GasSource::DriverPedal => groups
                .group(bus::CAM, msg::DRIVER)?
                .get(signals::driver::GAS_PEDAL)?,
            GasSource::EngineAccelPosition => groups
                .group(bus::MAIN, msg::DYN5_CMM)?
                .get(signals::dyn5_cmm::ACC_PED_POSITION)?,
        };

        let bsi = groups.group(bus::CAM, msg::DAT_BSI)?;
        let brake_pressed = !raw_eq(bsi.get(signals::dat_bsi::MAIN_BRAKE)?, 0.0);
        let reverse = !raw_eq(bsi.get(signals::dat_bsi::REVERSE_GEAR)?, 0.0);
        let door_open = !raw_eq(bsi.get(signals::dat_bsi::DRIVER_DOOR)?, 0.0)
            || !raw_eq(bsi.get(signals::dat_bsi::PASSENGER_DOOR)?, 0.0);

        let parking_brake = raw_eq(
            groups
                .group(bus::MAIN, msg::DYN_EASY_MOVE)?
                .get(signals::dyn_easy_move::PARKING_BRAKE)?,
            1.0,
        );

        let steering_alt = groups.group(self.config.steering_alt_bus, msg::STEERING_ALT)?;
        let steering_angle_deg = steering_alt.get(signals::steering_alt::ANGLE)?;
        let rate_sign = steering_alt.get(signals::steering_alt::RATE_SIGN)?;
        let steering_rate_deg =
            steering_alt.get(signals::steering_alt::RATE)? * (2.0 * rate_sign - 1.0);

        let steering_torque = groups
            .group(bus::MAIN, msg::STEERING)?
            .get(signals::steering::DRIVER_TORQUE)?;
        let dira = groups.group(bus::MAIN, msg::IS_DAT_DIRA)?;
        let steering_torque_eps = dira.get(signals::is_dat_dira::EPS_TORQUE)?;
        let eps_lka_state =
            EpsLkaState::from_signal(dira.get(signals::is_dat_dira::EPS_STATE_LKA)?);

        let cruise_group = groups.group(bus::ADAS, msg::HS2_DAT_MDD_CMD_452)?;
        let cruise = CruiseState {
            speed: cruise_group.get(signals::hs2_dat_mdd_cmd_452::SPEED_SETPOINT)? * KPH_TO_MS,
            enabled: raw_eq(
                cruise_group.get(signals::hs2_dat_mdd_cmd_452::RVV_ACC_ACTIVATION_REQ)?,
                1.0,
            ),
            available: true,
            standstill: false,
            non_adaptive: false,
        };
        let cruise_command = cruise_group.values.clone();

        let blinker = groups
            .group(bus::CAM, msg::HS2_DAT7_BSI_612)?
            .get(signals::hs2_dat7_bsi_612::TURN_INDICATOR)?;
        let seatbelt = groups
            .group(bus::CAM, msg::RESTRAINTS)?
            .get(signals::restraints::DRIVER_SEATBELT)?;

        // The lead flag only comes from a group seen this cycle; the carried
        // copy is an echo source and never reports a target.
        let observed_status = snapshot.group(bus::ADAS, msg::HS2_DYN_MDD_ETAT_2F6);
        let lead_detected = observed_status
            .and_then(|g| g.get(signals::hs2_dyn_mdd_etat_2f6::TARGET_DETECTED))
            .is_some_and(|v| raw_eq(*v, 1.0));
        let radar_status = observed_status
            .cloned()
            .or_else(|| self.radar_status.clone());

        // Every read succeeded; commit the cross-cycle state.
        let steering_pressed = self
            .debounce
            .update(steering_torque.abs() > self.driver_allowance);
        let (v_ego, a_ego) = self.speed.update(v_ego_raw);
        self.radar_status.clone_from(&radar_status);

        trace!(v_ego, v_ego_raw, steering_pressed, "decoded vehicle state");

        Ok(VehicleState {
            wheel_speeds,
            v_ego,
            v_ego_raw,
            a_ego,
            yaw_rate,
            standstill: v_ego_raw < self.config.standstill_threshold,
            steering_angle_deg,
            steering_rate_deg,
            steering_torque,
            steering_torque_eps,
            steering_pressed,
            eps_lka_state,
            gas_pressed: gas > 0.0,
            brake_pressed,
            parking_brake,
            cruise,
            acc_faulted: false,
            gear: if reverse { Gear::Reverse } else { Gear::Drive },
            left_blinker: raw_eq(blinker, 1.0),
            right_blinker: raw_eq(blinker, 2.0),
            door_open,
            seatbelt_unlatched: !raw_eq(seatbelt, 2.0),
            lead_detected,
            cruise_command,
            radar_status,
        })
    }

    /// Debounced steering-pressed flag from the last successful decode.
    pub fn steering_pressed(&self) -> bool {
        self.debounce.pressed()
    }

    /// Forget all cross-cycle state.
    pub fn reset(&mut self) {
        self.debounce.reset();
        self.speed.reset();
        self.radar_status = None;
    }
}
