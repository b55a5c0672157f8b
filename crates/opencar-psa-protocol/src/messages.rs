//! Value sets for every message this adapter transmits.
//!
//! Each builder returns the full signal map for one frame with its checksum
//! field (if any) set to zero. [`pack_with_checksum`](crate::pack_with_checksum)
//! fills it in.

use opencar_can_common::SignalValues;

use crate::ids::signals::{
    hs2_dat_artiv_v2_4f6 as artiv, hs2_dat_mdd_cmd_452 as cmd_452,
    hs2_dyn_mdd_etat_2f6 as etat_2f6, hs2_dyn1_mdd_etat_2b6 as etat_2b6,
    hs2_supv_artiv_796 as supv, lane_keep_assist as lka,
};
use crate::status::EpsStatus;

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

fn insert(values: &mut SignalValues, signal: &str, value: f64) {
    values.insert(signal.to_string(), value);
}

/// Setpoint carried by the lane keep assist frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteerSetpoint {
    /// Steering wheel angle (deg)
    Angle(f64),
    /// Steering torque (EPS units)
    Torque(f64),
}

/// Inputs of one `LANE_KEEP_ASSIST` frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneKeepAssistCommand {
    /// Rolling counter, reduced modulo 16
    pub counter: u8,
    /// EPS status for this cycle
    pub status: EpsStatus,
    /// EPS torque authority (0 when lateral control is inactive)
    pub torque_factor: f64,
    /// Bounded setpoint
    pub setpoint: SteerSetpoint,
}

/// `LANE_KEEP_ASSIST` values.
///
/// Layout notes:
/// - `DRIVE` and `LXA_ACTIVATION` are always 1; the EPS ignores the frame
///   unless both are set.
/// - `STATUS` carries [`EpsStatus::wire_value`].
/// - Exactly one of `SET_ANGLE` or `SET_TORQUE` is written.
pub fn lane_keep_assist(cmd: &LaneKeepAssistCommand) -> SignalValues {
    let mut values = SignalValues::new();
    insert(&mut values, lka::DRIVE, 1.0);
    insert(&mut values, lka::COUNTER, f64::from(cmd.counter % 16));
    insert(&mut values, lka::CHECKSUM, 0.0);
    insert(&mut values, lka::STATUS, f64::from(cmd.status.wire_value()));
    insert(&mut values, lka::LXA_ACTIVATION, 1.0);
    insert(&mut values, lka::TORQUE_FACTOR, cmd.torque_factor);
    match cmd.setpoint {
        SteerSetpoint::Angle(angle) => insert(&mut values, lka::SET_ANGLE, angle),
        SteerSetpoint::Torque(torque) => insert(&mut values, lka::SET_TORQUE, torque),
    }
    values
}

/// Longitudinal command carried by the emulated radar frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowertrainRequest {
    /// Rolling counter, reduced modulo 16
    pub counter: u8,
    /// Gear type toggle bit
    pub gear_type: u8,
    /// Requested wheel torque (Nm)
    pub wheel_torque: f64,
    /// Requested deceleration magnitude (m/s²)
    pub deceleration: f64,
    /// Friction brakes requested instead of engine torque
    pub friction_brake: bool,
    /// Longitudinal control engaged
    pub active: bool,
}

/// `HS2_DYN1_MDD_ETAT_2B6` values (radar primary status, 50 Hz).
pub fn dyn1_mdd_etat_2b6(req: &PowertrainRequest) -> SignalValues {
    let torque_request = req.active && !req.friction_brake;
    let decel_request = req.active && req.friction_brake;
    let wheel_torque = if torque_request { req.wheel_torque } else { 0.0 };
    let deceleration = if decel_request { req.deceleration } else { 0.0 };
    let acc_status = if req.active { 2.0 } else { 1.0 };

    let mut values = SignalValues::new();
    insert(&mut values, etat_2b6::MDD_DESIRED_DECELERATION, deceleration);
    insert(&mut values, etat_2b6::POTENTIAL_WHEEL_TORQUE_REQUEST, flag(torque_request));
    insert(&mut values, etat_2b6::MIN_TIME_FOR_DESIRED_GEAR, 6.2);
    insert(&mut values, etat_2b6::GMP_POTENTIAL_WHEEL_TORQUE, wheel_torque);
    insert(&mut values, etat_2b6::ACC_STATUS, acc_status);
    insert(&mut values, etat_2b6::GMP_WHEEL_TORQUE, wheel_torque);
    insert(&mut values, etat_2b6::WHEEL_TORQUE_REQUEST, flag(torque_request));
    insert(&mut values, etat_2b6::AUTO_BRAKING_STATUS, 6.0);
    insert(&mut values, etat_2b6::MDD_DECEL_TYPE, 0.0);
    insert(&mut values, etat_2b6::MDD_DECEL_CONTROL_REQ, flag(decel_request));
    insert(&mut values, etat_2b6::GEAR_TYPE, f64::from(req.gear_type & 1));
    insert(&mut values, etat_2b6::PREFILL_REQUEST, 0.0);
    insert(&mut values, etat_2b6::DYN_ACC_CHECKSUM, 0.0);
    insert(&mut values, etat_2b6::DYN_ACC_PROCESS_COUNTER, f64::from(req.counter % 16));
    values
}

/// `HS2_DYN_MDD_ETAT_2F6` values (radar target and braking status, 50 Hz).
pub fn dyn_mdd_etat_2f6(req: &PowertrainRequest) -> SignalValues {
    let mut values = SignalValues::new();
    insert(&mut values, etat_2f6::TARGET_DETECTED, 1.0);
    insert(&mut values, etat_2f6::REQUEST_TAKEOVER, 0.0);
    insert(&mut values, etat_2f6::BLIND_SENSOR, 0.0);
    insert(&mut values, etat_2f6::REQ_VISUAL_COLLISION_ALERT, 0.0);
    insert(&mut values, etat_2f6::REQ_SOUND_COLLISION_ALERT, 0.0);
    insert(&mut values, etat_2f6::REQ_HAPTIC_COLLISION_ALERT, 0.0);
    insert(&mut values, etat_2f6::VEHICLE_INTER_DISTANCE, 100.0);
    insert(&mut values, etat_2f6::COLLISION_ALERT_STATE, 12.0);
    insert(&mut values, etat_2f6::AUTO_BRAKING_IN_PROGRESS, 0.0);
    insert(&mut values, etat_2f6::AEB_ENABLED, 0.0);
    insert(&mut values, etat_2f6::DRV_AWAY_REQ, 0.0);
    insert(&mut values, etat_2f6::DISPLAYED_INTER_VEHICLE_TIME, 3.0);
    insert(
        &mut values,
        etat_2f6::REQ_UCF_DECEL_CONTROL,
        flag(req.active && req.friction_brake),
    );
    insert(&mut values, etat_2f6::BRAKE_STATE, 1.0);
    insert(&mut values, etat_2f6::DYN_ACC2_FRAME_CHECKSUM, 0.0);
    insert(&mut values, etat_2f6::PROCESS_COUNTER_4B_ACC2, f64::from(req.counter % 16));
    insert(&mut values, etat_2f6::TARGET_POSITION, 3.0);
    values
}

/// `HS2_DAT_ARTIV_V2_4F6` values (radar target data, 10 Hz). No checksum.
pub fn dat_artiv_v2_4f6() -> SignalValues {
    let mut values = SignalValues::new();
    insert(&mut values, artiv::TIME_GAP, 3.0);
    insert(&mut values, artiv::DISTANCE_GAP, 100.0);
    insert(&mut values, artiv::RELATIVE_SPEED, 0.0);
    insert(&mut values, artiv::ARTIV_SENSOR_STATE, 2.0);
    insert(&mut values, artiv::TARGET_DETECTED, 1.0);
    insert(&mut values, artiv::ARTIV_TARGET_CHANGE_INFO, 1.0);
    insert(&mut values, artiv::TRAFFIC_DIRECTION, 0.0);
    values
}

/// `HS2_SUPV_ARTIV_796` values (radar supervision, 1 Hz). No checksum.
pub fn supv_artiv_796() -> SignalValues {
    let mut values = SignalValues::new();
    insert(&mut values, supv::FAULT_CODE, 0.0);
    insert(&mut values, supv::STATUS_NO_CONFIG, 0.0);
    insert(&mut values, supv::STATUS_PARTIAL_WAKEUP_GMP, 0.0);
    insert(&mut values, supv::UCE_ELECTR_STATE, 0.0);
    values
}

fn echo(observed: &SignalValues, fields: &[&str]) -> SignalValues {
    fields
        .iter()
        .filter_map(|field| observed.get(*field).map(|value| ((*field).to_string(), *value)))
        .collect()
}

/// Echo of an observed `HS2_DYN_MDD_ETAT_2F6` group with the resume bit set.
///
/// Only the echoed fields are copied; `observed` is never modified. The
/// checksum is zeroed and the rolling counter replaced by `counter`.
pub fn resume_acc_echo(observed: &SignalValues, counter: u8, resume: bool) -> SignalValues {
    let mut values = echo(observed, &etat_2f6::ECHOED);
    if resume {
        insert(&mut values, etat_2f6::REQUEST_TAKEOVER, 1.0);
    }
    insert(&mut values, etat_2f6::PROCESS_COUNTER_4B_ACC2, f64::from(counter % 16));
    insert(&mut values, etat_2f6::DYN_ACC2_FRAME_CHECKSUM, 0.0);
    values
}

/// Echo of an observed `HS2_DAT_MDD_CMD_452` group, dropping the ACC
/// activation request when `cancel` is set.
///
/// The frame's checksums only cover the set speed and frame counter, which
/// are copied unchanged, so the echoed checksum fields stay valid.
pub fn cancel_acc_echo(observed: &SignalValues, cancel: bool) -> SignalValues {
    let mut values = echo(observed, &cmd_452::ECHOED);
    if cancel {
        insert(&mut values, cmd_452::RVV_ACC_ACTIVATION_REQ, 0.0);
    }
    values
}
