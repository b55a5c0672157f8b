//! PSA AEE2010 bus indices, message addresses and signal names.
//!
//! Names match the AEE2010_R3 signal database so that any codec built from
//! it resolves them without translation.

/// Bus indices as seen by the adapter harness.
pub mod bus {
    /// Powertrain/chassis bus (wheel speeds, steering, EPS).
    pub const MAIN: u8 = 0;
    /// ADAS bus shared with the radar ECU.
    pub const ADAS: u8 = 1;
    /// Camera-side bus (body, pedals, restraints).
    pub const CAM: u8 = 2;
}

/// Message addresses.
pub mod addresses {
    /// Driver steering torque.
    pub const STEERING: u32 = 0x2F5;
    /// Steering angle and rate reported by the EPS.
    pub const STEERING_ALT: u32 = 0x305;
    /// Radar ECU primary status, 50 Hz.
    pub const HS2_DYN1_MDD_ETAT_2B6: u32 = 0x2B6;
    /// Radar ECU target and braking status, 50 Hz.
    pub const HS2_DYN_MDD_ETAT_2F6: u32 = 0x2F6;
    /// Yaw rate.
    pub const HS2_DYN_UCF_MDD_32D: u32 = 0x32D;
    /// Brake ECU dynamics.
    pub const HS2_DYN_ABR_38D: u32 = 0x38D;
    /// Lane keep assist command to the EPS.
    pub const LANE_KEEP_ASSIST: u32 = 0x3F2;
    /// BSI body status.
    pub const DAT_BSI: u32 = 0x412;
    /// BSI frame carrying a nibble checksum with its own init value.
    pub const HS2_BSI_42D: u32 = 0x42D;
    /// Cruise command state from the BSI.
    pub const HS2_DAT_MDD_CMD_452: u32 = 0x452;
    /// Radar ECU target data, 10 Hz.
    pub const HS2_DAT_ARTIV_V2_4F6: u32 = 0x4F6;
    /// Driver inputs from the BSI.
    pub const DRIVER: u32 = 0x56E;
    /// Radar ECU UDS response.
    pub const ARTIV_DIAG_RESPONSE: u32 = 0x696;
    /// Radar ECU UDS request.
    pub const ARTIV_DIAG_REQUEST: u32 = 0x6B6;
    /// Radar ECU supervision, 1 Hz.
    pub const HS2_SUPV_ARTIV_796: u32 = 0x796;
}

/// Message names.
pub mod messages {
    /// Wheel speeds.
    pub const DYN4_FRE: &str = "Dyn4_FRE";
    /// Engine ECU accelerator position.
    pub const DYN5_CMM: &str = "Dyn5_CMM";
    /// Electric parking brake.
    pub const DYN_EASY_MOVE: &str = "Dyn_EasyMove";
    /// Driver steering torque.
    pub const STEERING: &str = "STEERING";
    /// EPS steering angle and rate.
    pub const STEERING_ALT: &str = "STEERING_ALT";
    /// EPS status and measured torque.
    pub const IS_DAT_DIRA: &str = "IS_DAT_DIRA";
    /// Yaw rate.
    pub const HS2_DYN_UCF_MDD_32D: &str = "HS2_DYN_UCF_MDD_32D";
    /// Cruise command state.
    pub const HS2_DAT_MDD_CMD_452: &str = "HS2_DAT_MDD_CMD_452";
    /// Gas pedal.
    pub const DRIVER: &str = "DRIVER";
    /// Brake, reverse gear and doors.
    pub const DAT_BSI: &str = "Dat_BSI";
    /// Turn indicator stalk.
    pub const HS2_DAT7_BSI_612: &str = "HS2_DAT7_BSI_612";
    /// Seatbelts.
    pub const RESTRAINTS: &str = "RESTRAINTS";
    /// Lane keep assist command.
    pub const LANE_KEEP_ASSIST: &str = "LANE_KEEP_ASSIST";
    /// Radar primary status.
    pub const HS2_DYN1_MDD_ETAT_2B6: &str = "HS2_DYN1_MDD_ETAT_2B6";
    /// Radar target and braking status.
    pub const HS2_DYN_MDD_ETAT_2F6: &str = "HS2_DYN_MDD_ETAT_2F6";
    /// Radar target data.
    pub const HS2_DAT_ARTIV_V2_4F6: &str = "HS2_DAT_ARTIV_V2_4F6";
    /// Radar supervision.
    pub const HS2_SUPV_ARTIV_796: &str = "HS2_SUPV_ARTIV_796";
}

/// Signal names, grouped by message.
pub mod signals {
    /// `Dyn4_FRE` signals (km/h).
    pub mod dyn4_fre {
        /// Front left wheel speed.
        pub const WHEEL_FL: &str = "P263_VehV_VPsvValWhlFrtL";
        /// Front right wheel speed.
        pub const WHEEL_FR: &str = "P264_VehV_VPsvValWhlFrtR";
        /// Rear left wheel speed.
        pub const WHEEL_RL: &str = "P265_VehV_VPsvValWhlBckL";
        /// Rear right wheel speed.
        pub const WHEEL_RR: &str = "P266_VehV_VPsvValWhlBckR";
    }

    /// `Dyn5_CMM` signals.
    pub mod dyn5_cmm {
        /// Accelerator pedal position.
        pub const ACC_PED_POSITION: &str = "P334_ACCPed_Position";
    }

    /// `Dyn_EasyMove` signals.
    pub mod dyn_easy_move {
        /// Parking brake state: 0 disengaged, 1 engaged, 3 actuator moving.
        pub const PARKING_BRAKE: &str = "P337_Com_stPrkBrk";
    }

    /// `STEERING` signals.
    pub mod steering {
        /// Driver torque (Nm).
        pub const DRIVER_TORQUE: &str = "DRIVER_TORQUE";
    }

    /// `STEERING_ALT` signals.
    pub mod steering_alt {
        /// Steering angle (deg).
        pub const ANGLE: &str = "ANGLE";
        /// Steering rate magnitude (deg/s).
        pub const RATE: &str = "RATE";
        /// Steering rate sign bit: 1 positive, 0 negative.
        pub const RATE_SIGN: &str = "RATE_SIGN";
    }

    /// `IS_DAT_DIRA` signals.
    pub mod is_dat_dira {
        /// EPS measured torque.
        pub const EPS_TORQUE: &str = "EPS_TORQUE";
        /// EPS lane keeping state.
        pub const EPS_STATE_LKA: &str = "EPS_STATE_LKA";
    }

    /// `HS2_DYN_UCF_MDD_32D` signals.
    pub mod hs2_dyn_ucf_mdd_32d {
        /// Raw yaw rate (deg/s).
        pub const YAW_RATE: &str = "VITESSE_LACET_BRUTE";
    }

    /// `HS2_DAT_MDD_CMD_452` signals.
    pub mod hs2_dat_mdd_cmd_452 {
        /// Longitudinal regulation type.
        pub const LONGITUDINAL_REGULATION_TYPE: &str = "LONGITUDINAL_REGULATION_TYPE";
        /// Turn signal status.
        pub const TURN_SIGNAL_STATUS: &str = "TURN_SIGNAL_STATUS";
        /// Front wiper status.
        pub const FRONT_WIPER_STATUS: &str = "FRONT_WIPER_STATUS";
        /// Set speed (km/h, 255 when ACC is off).
        pub const SPEED_SETPOINT: &str = "SPEED_SETPOINT";
        /// Checksum over the speed setpoint bits.
        pub const CHECKSUM_CONS_RVV_LVV2: &str = "CHECKSUM_CONS_RVV_LVV2";
        /// Brake-only command.
        pub const BRAKE_ONLY_CMD_BSI: &str = "BRAKE_ONLY_CMD_BSI";
        /// Speed limiter activation request.
        pub const LVV_ACTIVATION_REQ: &str = "LVV_ACTIVATION_REQ";
        /// ACC activation request.
        pub const RVV_ACC_ACTIVATION_REQ: &str = "RVV_ACC_ACTIVATION_REQ";
        /// ACC habit sensitivity.
        pub const ARC_HABIT_SENSITIVITY: &str = "ARC_HABIT_SENSITIVITY";
        /// ACC habit activation request.
        pub const ARC_HABIT_ACTIVATION_REQ: &str = "ARC_HABIT_ACTIVATION_REQ";
        /// Rolling frame counter.
        pub const FRAME_COUNTER_BSI2: &str = "FRAME_COUNTER_BSI2";
        /// Front wash status.
        pub const FRONT_WASH_STATUS: &str = "FRONT_WASH_STATUS";
        /// Forced habit activation.
        pub const FORCE_ACTIVATION_HAB_CMD: &str = "FORCE_ACTIVATION_HAB_CMD";
        /// Time gap setpoint.
        pub const INTER_VEHICLE_TIME_SETPOINT: &str = "INTER_VEHICLE_TIME_SETPOINT";
        /// Checksum over the setpoint.
        pub const CHECKSUM_SPEED_SETPOINT: &str = "CHECKSUM_SPEED_SETPOINT";
        /// Go request from the cockpit.
        pub const COCKPIT_GO_ACC_REQUEST: &str = "COCKPIT_GO_ACC_REQUEST";
        /// ACC program mode.
        pub const ACC_PROGRAM_MODE: &str = "ACC_PROGRAM_MODE";

        /// Fields copied when the group is echoed back on the ADAS bus.
        pub const ECHOED: [&str; 17] = [
            LONGITUDINAL_REGULATION_TYPE,
            TURN_SIGNAL_STATUS,
            FRONT_WIPER_STATUS,
            SPEED_SETPOINT,
            CHECKSUM_CONS_RVV_LVV2,
            BRAKE_ONLY_CMD_BSI,
            LVV_ACTIVATION_REQ,
            RVV_ACC_ACTIVATION_REQ,
            ARC_HABIT_SENSITIVITY,
            ARC_HABIT_ACTIVATION_REQ,
            FRAME_COUNTER_BSI2,
            FRONT_WASH_STATUS,
            FORCE_ACTIVATION_HAB_CMD,
            INTER_VEHICLE_TIME_SETPOINT,
            CHECKSUM_SPEED_SETPOINT,
            COCKPIT_GO_ACC_REQUEST,
            ACC_PROGRAM_MODE,
        ];
    }

    /// `DRIVER` signals.
    pub mod driver {
        /// Gas pedal position.
        pub const GAS_PEDAL: &str = "GAS_PEDAL";
    }

    /// `Dat_BSI` signals.
    pub mod dat_bsi {
        /// Main brake switch.
        pub const MAIN_BRAKE: &str = "P013_MainBrake";
        /// Reverse gear engaged.
        pub const REVERSE_GEAR: &str = "P103_Com_bRevGear";
        /// Driver door open.
        pub const DRIVER_DOOR: &str = "DRIVER_DOOR";
        /// Passenger door open.
        pub const PASSENGER_DOOR: &str = "PASSENGER_DOOR";
    }

    /// `HS2_DAT7_BSI_612` signals.
    pub mod hs2_dat7_bsi_612 {
        /// Turn indicator: 0 none, 1 left, 2 right.
        pub const TURN_INDICATOR: &str = "CDE_CLG_ET_HDC";
    }

    /// `RESTRAINTS` signals.
    pub mod restraints {
        /// Driver seatbelt: 2 latched.
        pub const DRIVER_SEATBELT: &str = "DRIVER_SEATBELT";
    }

    /// `LANE_KEEP_ASSIST` signals.
    pub mod lane_keep_assist {
        /// Drive flag.
        pub const DRIVE: &str = "DRIVE";
        /// Rolling counter.
        pub const COUNTER: &str = "COUNTER";
        /// Frame checksum.
        pub const CHECKSUM: &str = "CHECKSUM";
        /// EPS status.
        pub const STATUS: &str = "STATUS";
        /// Lane centering activation.
        pub const LXA_ACTIVATION: &str = "LXA_ACTIVATION";
        /// EPS torque authority (0..100).
        pub const TORQUE_FACTOR: &str = "TORQUE_FACTOR";
        /// Angle setpoint (deg).
        pub const SET_ANGLE: &str = "SET_ANGLE";
        /// Torque setpoint.
        pub const SET_TORQUE: &str = "SET_TORQUE";
    }

    /// `HS2_DYN1_MDD_ETAT_2B6` signals.
    pub mod hs2_dyn1_mdd_etat_2b6 {
        /// Desired deceleration (m/s²).
        pub const MDD_DESIRED_DECELERATION: &str = "MDD_DESIRED_DECELERATION";
        /// Potential wheel torque request flag.
        pub const POTENTIAL_WHEEL_TORQUE_REQUEST: &str = "POTENTIAL_WHEEL_TORQUE_REQUEST";
        /// Minimum time for the desired gear.
        pub const MIN_TIME_FOR_DESIRED_GEAR: &str = "MIN_TIME_FOR_DESIRED_GEAR";
        /// Potential wheel torque.
        pub const GMP_POTENTIAL_WHEEL_TORQUE: &str = "GMP_POTENTIAL_WHEEL_TORQUE";
        /// ACC status.
        pub const ACC_STATUS: &str = "ACC_STATUS";
        /// Wheel torque.
        pub const GMP_WHEEL_TORQUE: &str = "GMP_WHEEL_TORQUE";
        /// Wheel torque request flag.
        pub const WHEEL_TORQUE_REQUEST: &str = "WHEEL_TORQUE_REQUEST";
        /// Automatic braking status.
        pub const AUTO_BRAKING_STATUS: &str = "AUTO_BRAKING_STATUS";
        /// Deceleration type.
        pub const MDD_DECEL_TYPE: &str = "MDD_DECEL_TYPE";
        /// Deceleration control request.
        pub const MDD_DECEL_CONTROL_REQ: &str = "MDD_DECEL_CONTROL_REQ";
        /// Gear type toggle.
        pub const GEAR_TYPE: &str = "GEAR_TYPE";
        /// Brake prefill request.
        pub const PREFILL_REQUEST: &str = "PREFILL_REQUEST";
        /// Frame checksum.
        pub const DYN_ACC_CHECKSUM: &str = "DYN_ACC_CHECKSUM";
        /// Rolling counter.
        pub const DYN_ACC_PROCESS_COUNTER: &str = "DYN_ACC_PROCESS_COUNTER";
    }

    /// `HS2_DYN_MDD_ETAT_2F6` signals.
    pub mod hs2_dyn_mdd_etat_2f6 {
        /// Lead target detected.
        pub const TARGET_DETECTED: &str = "TARGET_DETECTED";
        /// Takeover request, used as resume.
        pub const REQUEST_TAKEOVER: &str = "REQUEST_TAKEOVER";
        /// Blind sensor.
        pub const BLIND_SENSOR: &str = "BLIND_SENSOR";
        /// Visual collision alert request.
        pub const REQ_VISUAL_COLLISION_ALERT: &str = "REQ_VISUAL_COLLISION_ALERT";
        /// Sound collision alert request.
        pub const REQ_SOUND_COLLISION_ALERT: &str = "REQ_SOUND_COLLISION_ALERT";
        /// Haptic collision alert request.
        pub const REQ_HAPTIC_COLLISION_ALERT: &str = "REQ_HAPTIC_COLLISION_ALERT";
        /// Distance to the lead vehicle.
        pub const VEHICLE_INTER_DISTANCE: &str = "VEHICLE_INTER_DISTANCE";
        /// Collision alert state.
        pub const COLLISION_ALERT_STATE: &str = "COLLISION_ALERT_STATE";
        /// Automatic braking in progress.
        pub const AUTO_BRAKING_IN_PROGRESS: &str = "AUTO_BRAKING_IN_PROGRESS";
        /// AEB enabled.
        pub const AEB_ENABLED: &str = "AEB_ENABLED";
        /// Drive-away request.
        pub const DRV_AWAY_REQ: &str = "DRV_AWAY_REQ";
        /// Displayed time gap.
        pub const DISPLAYED_INTER_VEHICLE_TIME: &str = "DISPLAYED_INTER_VEHICLE_TIME";
        /// Deceleration control request.
        pub const REQ_UCF_DECEL_CONTROL: &str = "REQ_UCF_DECEL_CONTROL";
        /// Brake state.
        pub const BRAKE_STATE: &str = "BRAKE_STATE";
        /// Frame checksum.
        pub const DYN_ACC2_FRAME_CHECKSUM: &str = "DYN_ACC2_FRAME_CHECKSUM";
        /// Rolling counter.
        pub const PROCESS_COUNTER_4B_ACC2: &str = "PROCESS_COUNTER_4B_ACC2";
        /// Lead target position.
        pub const TARGET_POSITION: &str = "TARGET_POSITION";

        /// Fields copied when the group is echoed back on the ADAS bus.
        pub const ECHOED: [&str; 17] = [
            TARGET_DETECTED,
            REQUEST_TAKEOVER,
            BLIND_SENSOR,
            REQ_VISUAL_COLLISION_ALERT,
            REQ_SOUND_COLLISION_ALERT,
            REQ_HAPTIC_COLLISION_ALERT,
            VEHICLE_INTER_DISTANCE,
            COLLISION_ALERT_STATE,
            AUTO_BRAKING_IN_PROGRESS,
            AEB_ENABLED,
            DRV_AWAY_REQ,
            DISPLAYED_INTER_VEHICLE_TIME,
            REQ_UCF_DECEL_CONTROL,
            BRAKE_STATE,
            DYN_ACC2_FRAME_CHECKSUM,
            PROCESS_COUNTER_4B_ACC2,
            TARGET_POSITION,
        ];
    }

    /// `HS2_DAT_ARTIV_V2_4F6` signals.
    pub mod hs2_dat_artiv_v2_4f6 {
        /// Time gap (s).
        pub const TIME_GAP: &str = "TIME_GAP";
        /// Distance gap (m).
        pub const DISTANCE_GAP: &str = "DISTANCE_GAP";
        /// Relative speed (m/s).
        pub const RELATIVE_SPEED: &str = "RELATIVE_SPEED";
        /// Radar sensor state.
        pub const ARTIV_SENSOR_STATE: &str = "ARTIV_SENSOR_STATE";
        /// Lead target detected.
        pub const TARGET_DETECTED: &str = "TARGET_DETECTED";
        /// Target change information.
        pub const ARTIV_TARGET_CHANGE_INFO: &str = "ARTIV_TARGET_CHANGE_INFO";
        /// Traffic direction: 0 right-hand.
        pub const TRAFFIC_DIRECTION: &str = "TRAFFIC_DIRECTION";
    }

    /// `HS2_SUPV_ARTIV_796` signals.
    pub mod hs2_supv_artiv_796 {
        /// Fault code.
        pub const FAULT_CODE: &str = "FAULT_CODE";
        /// Not configured.
        pub const STATUS_NO_CONFIG: &str = "STATUS_NO_CONFIG";
        /// Partial wakeup.
        pub const STATUS_PARTIAL_WAKEUP_GMP: &str = "STATUS_PARTIAL_WAKEUP_GMP";
        /// Electrical state.
        pub const UCE_ELECTR_STATE: &str = "UCE_ELECTR_STATE";
    }
}
