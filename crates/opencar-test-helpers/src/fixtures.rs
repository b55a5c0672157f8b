//! AEE2010 message layouts and bus snapshot builders.
//!
//! Layouts cover every signal the decoder reads and the encoder writes. Bit
//! positions are fixture values chosen so that every checksum field is a
//! whole nibble; they are not taken from a production database. Messages
//! without a catalogued address use fixture addresses in `0x0A0..0x0FF`.

use opencar_can_common::{BusSnapshot, CanFrame, SignalCodec, SignalValues, signal_values};
use opencar_psa_protocol::ids::{addresses, bus, messages as msg, signals};

use crate::codec::{MessageLayout, SignalLayout, TableCodec};

/// Fixture address of `Dyn4_FRE`.
pub const DYN4_FRE_ADDRESS: u32 = 0x0A0;
/// Fixture address of `Dyn5_CMM`.
pub const DYN5_CMM_ADDRESS: u32 = 0x0A1;
/// Fixture address of `Dyn_EasyMove`.
pub const DYN_EASY_MOVE_ADDRESS: u32 = 0x0A2;
/// Fixture address of `IS_DAT_DIRA`.
pub const IS_DAT_DIRA_ADDRESS: u32 = 0x0A3;
/// Fixture address of `HS2_DAT7_BSI_612`.
pub const HS2_DAT7_BSI_612_ADDRESS: u32 = 0x0A4;
/// Fixture address of `RESTRAINTS`.
pub const RESTRAINTS_ADDRESS: u32 = 0x0A5;

fn layout(name: &'static str, address: u32, signals: Vec<SignalLayout>) -> MessageLayout {
    MessageLayout {
        name,
        address,
        len: 8,
        signals,
    }
}

/// Layouts of every message the adapter reads or writes.
pub fn psa_layouts() -> Vec<MessageLayout> {
    use signals::*;
    use SignalLayout as S;

    vec![
        layout(msg::DYN4_FRE, DYN4_FRE_ADDRESS, vec![
            S::scaled(dyn4_fre::WHEEL_FL, 0, 16, 0.01, 0.0),
            S::scaled(dyn4_fre::WHEEL_FR, 16, 16, 0.01, 0.0),
            S::scaled(dyn4_fre::WHEEL_RL, 32, 16, 0.01, 0.0),
            S::scaled(dyn4_fre::WHEEL_RR, 48, 16, 0.01, 0.0),
        ]),
        layout(msg::DYN5_CMM, DYN5_CMM_ADDRESS, vec![
            S::scaled(dyn5_cmm::ACC_PED_POSITION, 0, 8, 0.5, 0.0),
        ]),
        layout(msg::DYN_EASY_MOVE, DYN_EASY_MOVE_ADDRESS, vec![
            S::unsigned(dyn_easy_move::PARKING_BRAKE, 0, 2),
        ]),
        layout(msg::STEERING, addresses::STEERING, vec![
            S::signed(steering::DRIVER_TORQUE, 0, 16, 0.01),
        ]),
        layout(msg::STEERING_ALT, addresses::STEERING_ALT, vec![
            S::signed(steering_alt::ANGLE, 0, 16, 0.1),
            S::scaled(steering_alt::RATE, 16, 12, 0.5, 0.0),
            S::unsigned(steering_alt::RATE_SIGN, 28, 1),
        ]),
        layout(msg::IS_DAT_DIRA, IS_DAT_DIRA_ADDRESS, vec![
            S::signed(is_dat_dira::EPS_TORQUE, 0, 16, 0.01),
            S::unsigned(is_dat_dira::EPS_STATE_LKA, 16, 3),
        ]),
        layout(msg::HS2_DYN_UCF_MDD_32D, addresses::HS2_DYN_UCF_MDD_32D, vec![
            S::signed(hs2_dyn_ucf_mdd_32d::YAW_RATE, 0, 16, 0.01),
        ]),
        layout(msg::HS2_DAT_MDD_CMD_452, addresses::HS2_DAT_MDD_CMD_452, vec![
            S::unsigned(hs2_dat_mdd_cmd_452::LONGITUDINAL_REGULATION_TYPE, 0, 2),
            S::unsigned(hs2_dat_mdd_cmd_452::TURN_SIGNAL_STATUS, 2, 2),
            S::unsigned(hs2_dat_mdd_cmd_452::FRONT_WIPER_STATUS, 4, 2),
            S::unsigned(hs2_dat_mdd_cmd_452::BRAKE_ONLY_CMD_BSI, 6, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::LVV_ACTIVATION_REQ, 7, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::SPEED_SETPOINT, 8, 8),
            S::unsigned(hs2_dat_mdd_cmd_452::RVV_ACC_ACTIVATION_REQ, 16, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::ARC_HABIT_ACTIVATION_REQ, 17, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::FRONT_WASH_STATUS, 18, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::FORCE_ACTIVATION_HAB_CMD, 19, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::CHECKSUM_CONS_RVV_LVV2, 20, 2),
            S::unsigned(hs2_dat_mdd_cmd_452::ARC_HABIT_SENSITIVITY, 22, 2),
            S::unsigned(hs2_dat_mdd_cmd_452::FRAME_COUNTER_BSI2, 24, 4),
            S::unsigned(hs2_dat_mdd_cmd_452::CHECKSUM_SPEED_SETPOINT, 28, 4),
            S::scaled(hs2_dat_mdd_cmd_452::INTER_VEHICLE_TIME_SETPOINT, 32, 8, 0.1, 0.0),
            S::unsigned(hs2_dat_mdd_cmd_452::COCKPIT_GO_ACC_REQUEST, 40, 1),
            S::unsigned(hs2_dat_mdd_cmd_452::ACC_PROGRAM_MODE, 41, 3),
        ]),
        layout(msg::DRIVER, addresses::DRIVER, vec![
            S::unsigned(driver::GAS_PEDAL, 0, 8),
        ]),
        layout(msg::DAT_BSI, addresses::DAT_BSI, vec![
            S::unsigned(dat_bsi::MAIN_BRAKE, 0, 1),
            S::unsigned(dat_bsi::REVERSE_GEAR, 1, 1),
            S::unsigned(dat_bsi::DRIVER_DOOR, 2, 1),
            S::unsigned(dat_bsi::PASSENGER_DOOR, 3, 1),
        ]),
        layout(msg::HS2_DAT7_BSI_612, HS2_DAT7_BSI_612_ADDRESS, vec![
            S::unsigned(hs2_dat7_bsi_612::TURN_INDICATOR, 0, 2),
        ]),
        layout(msg::RESTRAINTS, RESTRAINTS_ADDRESS, vec![
            S::unsigned(restraints::DRIVER_SEATBELT, 0, 2),
        ]),
        layout(msg::LANE_KEEP_ASSIST, addresses::LANE_KEEP_ASSIST, vec![
            S::unsigned(lane_keep_assist::DRIVE, 0, 1),
            S::unsigned(lane_keep_assist::LXA_ACTIVATION, 1, 1),
            S::unsigned(lane_keep_assist::STATUS, 2, 3),
            S::unsigned(lane_keep_assist::COUNTER, 8, 4),
            S::unsigned(lane_keep_assist::CHECKSUM, 12, 4),
            S::unsigned(lane_keep_assist::TORQUE_FACTOR, 16, 8),
            S::signed(lane_keep_assist::SET_ANGLE, 24, 16, 0.1),
            S::signed(lane_keep_assist::SET_TORQUE, 40, 16, 1.0),
        ]),
        layout(msg::HS2_DYN1_MDD_ETAT_2B6, addresses::HS2_DYN1_MDD_ETAT_2B6, vec![
            S::scaled(hs2_dyn1_mdd_etat_2b6::MDD_DESIRED_DECELERATION, 0, 8, 0.05, 0.0),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::POTENTIAL_WHEEL_TORQUE_REQUEST, 8, 1),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::WHEEL_TORQUE_REQUEST, 9, 1),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::MDD_DECEL_CONTROL_REQ, 10, 1),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::PREFILL_REQUEST, 11, 1),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::GEAR_TYPE, 12, 1),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::MDD_DECEL_TYPE, 13, 2),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::ACC_STATUS, 16, 3),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::AUTO_BRAKING_STATUS, 19, 3),
            S::scaled(hs2_dyn1_mdd_etat_2b6::MIN_TIME_FOR_DESIRED_GEAR, 22, 6, 0.1, 0.0),
            S::scaled(hs2_dyn1_mdd_etat_2b6::GMP_POTENTIAL_WHEEL_TORQUE, 28, 12, 1.0, -2000.0),
            S::scaled(hs2_dyn1_mdd_etat_2b6::GMP_WHEEL_TORQUE, 40, 12, 1.0, -2000.0),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::DYN_ACC_PROCESS_COUNTER, 52, 4),
            S::unsigned(hs2_dyn1_mdd_etat_2b6::DYN_ACC_CHECKSUM, 56, 4),
        ]),
        layout(msg::HS2_DYN_MDD_ETAT_2F6, addresses::HS2_DYN_MDD_ETAT_2F6, vec![
            S::unsigned(hs2_dyn_mdd_etat_2f6::TARGET_DETECTED, 0, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::REQUEST_TAKEOVER, 1, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::BLIND_SENSOR, 2, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::REQ_VISUAL_COLLISION_ALERT, 3, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::REQ_SOUND_COLLISION_ALERT, 4, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::REQ_HAPTIC_COLLISION_ALERT, 5, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::AUTO_BRAKING_IN_PROGRESS, 6, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::AEB_ENABLED, 7, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::VEHICLE_INTER_DISTANCE, 8, 8),
            S::unsigned(hs2_dyn_mdd_etat_2f6::COLLISION_ALERT_STATE, 16, 4),
            S::unsigned(hs2_dyn_mdd_etat_2f6::DRV_AWAY_REQ, 20, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::REQ_UCF_DECEL_CONTROL, 21, 1),
            S::unsigned(hs2_dyn_mdd_etat_2f6::BRAKE_STATE, 22, 2),
            S::scaled(hs2_dyn_mdd_etat_2f6::DISPLAYED_INTER_VEHICLE_TIME, 24, 8, 0.1, 0.0),
            S::unsigned(hs2_dyn_mdd_etat_2f6::TARGET_POSITION, 32, 3),
            S::unsigned(hs2_dyn_mdd_etat_2f6::PROCESS_COUNTER_4B_ACC2, 40, 4),
            S::unsigned(hs2_dyn_mdd_etat_2f6::DYN_ACC2_FRAME_CHECKSUM, 44, 4),
        ]),
        layout(msg::HS2_DAT_ARTIV_V2_4F6, addresses::HS2_DAT_ARTIV_V2_4F6, vec![
            S::scaled(hs2_dat_artiv_v2_4f6::TIME_GAP, 0, 8, 0.1, 0.0),
            S::unsigned(hs2_dat_artiv_v2_4f6::DISTANCE_GAP, 8, 8),
            S::signed(hs2_dat_artiv_v2_4f6::RELATIVE_SPEED, 16, 12, 0.1),
            S::unsigned(hs2_dat_artiv_v2_4f6::ARTIV_SENSOR_STATE, 28, 3),
            S::unsigned(hs2_dat_artiv_v2_4f6::TARGET_DETECTED, 31, 1),
            S::unsigned(hs2_dat_artiv_v2_4f6::ARTIV_TARGET_CHANGE_INFO, 32, 2),
            S::unsigned(hs2_dat_artiv_v2_4f6::TRAFFIC_DIRECTION, 34, 1),
        ]),
        layout(msg::HS2_SUPV_ARTIV_796, addresses::HS2_SUPV_ARTIV_796, vec![
            S::unsigned(hs2_supv_artiv_796::FAULT_CODE, 0, 8),
            S::unsigned(hs2_supv_artiv_796::STATUS_NO_CONFIG, 8, 1),
            S::unsigned(hs2_supv_artiv_796::STATUS_PARTIAL_WAKEUP_GMP, 9, 1),
            S::unsigned(hs2_supv_artiv_796::UCE_ELECTR_STATE, 10, 2),
        ]),
    ]
}

/// Codec over [`psa_layouts`].
pub fn psa_codec() -> TableCodec {
    TableCodec::new(psa_layouts())
}

/// Raw inputs of one cycle, in bus units.
#[derive(Debug, Clone, PartialEq)]
pub struct PsaInputs {
    /// Speed of all four wheels (km/h)
    pub wheel_speed_kph: [f64; 4],
    /// Steering angle (deg)
    pub steering_angle: f64,
    /// Signed steering rate (deg/s), split into magnitude and sign bit
    pub steering_rate: f64,
    /// Driver torque (Nm)
    pub driver_torque: f64,
    /// EPS measured torque
    pub eps_torque: f64,
    /// `EPS_STATE_LKA` raw value
    pub eps_state_lka: f64,
    /// Yaw rate (deg/s)
    pub yaw_rate_deg: f64,
    /// `DRIVER.GAS_PEDAL`
    pub gas_pedal: f64,
    /// `Dyn5_CMM.P334_ACCPed_Position`
    pub accel_pedal_position: f64,
    /// Brake switch
    pub brake: bool,
    /// Parking brake raw state
    pub parking_brake: f64,
    /// Reverse gear
    pub reverse: bool,
    /// Turn indicator raw value
    pub turn_indicator: f64,
    /// Driver door open
    pub driver_door: bool,
    /// Passenger door open
    pub passenger_door: bool,
    /// Driver seatbelt raw value (2 latched)
    pub driver_seatbelt: f64,
    /// Set speed (km/h)
    pub set_speed_kph: f64,
    /// ACC activation request
    pub acc_activation: bool,
    /// Cruise command rolling counter
    pub cruise_counter: f64,
    /// Radar status group: `None` when the radar is silent
    pub lead_detected: Option<bool>,
    /// Radar status rolling counter
    pub acc2_counter: f64,
    /// Bus carrying `STEERING_ALT`
    pub steering_alt_bus: u8,
}

impl Default for PsaInputs {
    fn default() -> Self {
        Self {
            wheel_speed_kph: [0.0; 4],
            steering_angle: 0.0,
            steering_rate: 0.0,
            driver_torque: 0.0,
            eps_torque: 0.0,
            eps_state_lka: 3.0,
            yaw_rate_deg: 0.0,
            gas_pedal: 0.0,
            accel_pedal_position: 0.0,
            brake: false,
            parking_brake: 0.0,
            reverse: false,
            turn_indicator: 0.0,
            driver_door: false,
            passenger_door: false,
            driver_seatbelt: 2.0,
            set_speed_kph: 255.0,
            acc_activation: false,
            cruise_counter: 0.0,
            lead_detected: None,
            acc2_counter: 0.0,
            steering_alt_bus: bus::MAIN,
        }
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

impl PsaInputs {
    /// All four wheels at `kph`.
    pub fn at_speed_kph(kph: f64) -> Self {
        Self {
            wheel_speed_kph: [kph; 4],
            ..Self::default()
        }
    }

    /// All four wheels at `ms` (m/s), before the wheel speed factor.
    pub fn at_speed_ms(ms: f64) -> Self {
        Self::at_speed_kph(ms * 3.6)
    }

    /// Decoded snapshot with every group the decoder reads.
    pub fn snapshot(&self) -> BusSnapshot {
        use signals::*;

        let [fl, fr, rl, rr] = self.wheel_speed_kph;
        let mut snapshot = BusSnapshot::new()
            .with(bus::MAIN, msg::DYN4_FRE, signal_values([
                (dyn4_fre::WHEEL_FL, fl),
                (dyn4_fre::WHEEL_FR, fr),
                (dyn4_fre::WHEEL_RL, rl),
                (dyn4_fre::WHEEL_RR, rr),
            ]))
            .with(bus::MAIN, msg::DYN5_CMM, signal_values([
                (dyn5_cmm::ACC_PED_POSITION, self.accel_pedal_position),
            ]))
            .with(bus::MAIN, msg::DYN_EASY_MOVE, signal_values([
                (dyn_easy_move::PARKING_BRAKE, self.parking_brake),
            ]))
            .with(bus::MAIN, msg::STEERING, signal_values([
                (steering::DRIVER_TORQUE, self.driver_torque),
            ]))
            .with(bus::MAIN, msg::IS_DAT_DIRA, signal_values([
                (is_dat_dira::EPS_TORQUE, self.eps_torque),
                (is_dat_dira::EPS_STATE_LKA, self.eps_state_lka),
            ]))
            .with(self.steering_alt_bus, msg::STEERING_ALT, signal_values([
                (steering_alt::ANGLE, self.steering_angle),
                (steering_alt::RATE, self.steering_rate.abs()),
                (steering_alt::RATE_SIGN, flag(self.steering_rate >= 0.0)),
            ]))
            .with(bus::ADAS, msg::HS2_DYN_UCF_MDD_32D, signal_values([
                (hs2_dyn_ucf_mdd_32d::YAW_RATE, self.yaw_rate_deg),
            ]))
            .with(bus::ADAS, msg::HS2_DAT_MDD_CMD_452, self.cruise_command())
            .with(bus::CAM, msg::DRIVER, signal_values([(driver::GAS_PEDAL, self.gas_pedal)]))
            .with(bus::CAM, msg::DAT_BSI, signal_values([
                (dat_bsi::MAIN_BRAKE, flag(self.brake)),
                (dat_bsi::REVERSE_GEAR, flag(self.reverse)),
                (dat_bsi::DRIVER_DOOR, flag(self.driver_door)),
                (dat_bsi::PASSENGER_DOOR, flag(self.passenger_door)),
            ]))
            .with(bus::CAM, msg::HS2_DAT7_BSI_612, signal_values([
                (hs2_dat7_bsi_612::TURN_INDICATOR, self.turn_indicator),
            ]))
            .with(bus::CAM, msg::RESTRAINTS, signal_values([
                (restraints::DRIVER_SEATBELT, self.driver_seatbelt),
            ]));

        if let Some(detected) = self.lead_detected {
            snapshot.insert(bus::ADAS, msg::HS2_DYN_MDD_ETAT_2F6, self.radar_status(detected));
        }
        snapshot
    }

    /// Encode every group of [`snapshot`](Self::snapshot) into frames.
    ///
    /// # Panics
    ///
    /// Panics if a value does not fit its fixture layout.
    pub fn frames(&self, codec: &TableCodec) -> Vec<CanFrame> {
        self.snapshot()
            .iter()
            .map(|(bus, name, values)| {
                let encoded = codec.encode(name, values).unwrap();
                CanFrame::new(encoded.address, &encoded.payload, bus).unwrap()
            })
            .collect()
    }

    fn cruise_command(&self) -> SignalValues {
        use signals::hs2_dat_mdd_cmd_452::*;

        let mut values: SignalValues = ECHOED.iter().map(|name| (name.to_string(), 0.0)).collect();
        values.insert(SPEED_SETPOINT.to_string(), self.set_speed_kph);
        values.insert(RVV_ACC_ACTIVATION_REQ.to_string(), flag(self.acc_activation));
        values.insert(FRAME_COUNTER_BSI2.to_string(), self.cruise_counter);
        values.insert(INTER_VEHICLE_TIME_SETPOINT.to_string(), 1.5);
        values
    }

    fn radar_status(&self, detected: bool) -> SignalValues {
        use signals::hs2_dyn_mdd_etat_2f6::*;

        let mut values: SignalValues = ECHOED.iter().map(|name| (name.to_string(), 0.0)).collect();
        values.insert(TARGET_DETECTED.to_string(), flag(detected));
        values.insert(VEHICLE_INTER_DISTANCE.to_string(), if detected { 8.0 } else { 0.0 });
        values.insert(DISPLAYED_INTER_VEHICLE_TIME.to_string(), 1.5);
        values.insert(TARGET_POSITION.to_string(), 3.0);
        values.insert(PROCESS_COUNTER_4B_ACC2.to_string(), self.acc2_counter);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_build() {
        let codec = psa_codec();
        assert!(codec.layout(msg::LANE_KEEP_ASSIST).is_some());
        assert!(codec.layout(msg::HS2_SUPV_ARTIV_796).is_some());
    }

    #[test]
    fn test_checksums_are_nibble_aligned() {
        let codec = psa_codec();
        let fields = [
            (msg::LANE_KEEP_ASSIST, signals::lane_keep_assist::CHECKSUM),
            (msg::HS2_DYN1_MDD_ETAT_2B6, signals::hs2_dyn1_mdd_etat_2b6::DYN_ACC_CHECKSUM),
            (msg::HS2_DYN_MDD_ETAT_2F6, signals::hs2_dyn_mdd_etat_2f6::DYN_ACC2_FRAME_CHECKSUM),
        ];
        for (message, signal) in fields {
            let start = codec.signal_start_bit(message, signal).unwrap();
            assert_eq!(start % 4, 0, "{message}.{signal}");
        }
    }

    #[test]
    fn test_frames_decode_back() {
        let codec = psa_codec();
        let inputs = PsaInputs {
            lead_detected: Some(true),
            steering_rate: -12.5,
            ..PsaInputs::at_speed_kph(36.0)
        };
        let frames = inputs.frames(&codec);
        let decoded = BusSnapshot::from_frames(&codec, &frames).unwrap();
        assert_eq!(decoded.len(), inputs.snapshot().len());
        let rate_sign = decoded
            .signal(bus::MAIN, msg::STEERING_ALT, signals::steering_alt::RATE_SIGN)
            .unwrap();
        assert!(rate_sign.abs() < 1e-9);
    }
}
