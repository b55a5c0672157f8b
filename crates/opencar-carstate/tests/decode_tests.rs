//! Decoder behavior over fixture snapshots.

use approx::assert_relative_eq;
use opencar_can_common::BusSnapshot;
use opencar_carstate::{CarStateDecoder, Gear};
use opencar_errors::DecodeError;
use opencar_profile::{DebouncePolicy, GasSource, VehicleProfile};
use opencar_psa_protocol::{EpsLkaState, bus, message_names as msg};
use opencar_test_helpers::prelude::*;

fn decoder() -> CarStateDecoder {
    CarStateDecoder::new(&VehicleProfile::psa())
}

#[test]
fn maps_every_field() -> TestResult {
    let inputs = PsaInputs {
        steering_angle: -12.5,
        steering_rate: -30.0,
        driver_torque: 2.0,
        eps_torque: 1.5,
        eps_state_lka: 1.0,
        yaw_rate_deg: 10.0,
        gas_pedal: 12.0,
        brake: true,
        parking_brake: 1.0,
        reverse: true,
        turn_indicator: 2.0,
        passenger_door: true,
        driver_seatbelt: 0.0,
        set_speed_kph: 90.0,
        acc_activation: true,
        lead_detected: Some(true),
        ..PsaInputs::at_speed_kph(36.0)
    };
    let state = decoder().update(&inputs.snapshot())?;

    assert_relative_eq!(state.v_ego_raw, 10.4, epsilon = 1e-9);
    assert_relative_eq!(state.wheel_speeds.rear_right, 10.4, epsilon = 1e-9);
    assert_relative_eq!(state.yaw_rate, 10.0f64.to_radians(), epsilon = 1e-12);
    assert!(!state.standstill);
    assert_relative_eq!(state.steering_angle_deg, -12.5);
    assert_relative_eq!(state.steering_rate_deg, -30.0);
    assert_relative_eq!(state.steering_torque, 2.0);
    assert_relative_eq!(state.steering_torque_eps, 1.5);
    assert_eq!(state.eps_lka_state, EpsLkaState::Authorized);
    assert!(state.eps_authorized());
    assert!(state.gas_pressed);
    assert!(state.brake_pressed);
    assert!(state.parking_brake);
    assert_eq!(state.gear, Gear::Reverse);
    assert!(!state.left_blinker);
    assert!(state.right_blinker);
    assert!(state.door_open);
    assert!(state.seatbelt_unlatched);
    assert_relative_eq!(state.cruise.speed, 25.0, epsilon = 1e-9);
    assert!(state.cruise.enabled);
    assert!(state.cruise.available);
    assert!(!state.cruise.non_adaptive);
    assert!(state.lead_detected);
    assert!(state.radar_status.is_some());
    Ok(())
}

#[test]
fn quiet_inputs_decode_to_defaults() -> TestResult {
    let state = decoder().update(&PsaInputs::default().snapshot())?;
    assert!(state.standstill);
    assert!(!state.gas_pressed);
    assert!(!state.brake_pressed);
    assert!(!state.parking_brake);
    assert!(!state.door_open);
    assert!(!state.seatbelt_unlatched);
    assert_eq!(state.gear, Gear::Drive);
    assert!(!state.cruise.enabled);
    assert!(!state.lead_detected);
    assert!(state.radar_status.is_none());
    Ok(())
}

#[test]
fn parking_brake_actuator_moving_is_not_engaged() -> TestResult {
    let inputs = PsaInputs {
        parking_brake: 3.0,
        ..PsaInputs::default()
    };
    assert!(!decoder().update(&inputs.snapshot())?.parking_brake);
    Ok(())
}

#[test]
fn positive_rate_sign() -> TestResult {
    let inputs = PsaInputs {
        steering_rate: 45.0,
        ..PsaInputs::default()
    };
    assert_relative_eq!(decoder().update(&inputs.snapshot())?.steering_rate_deg, 45.0);
    Ok(())
}

/// Driver torque above the allowance for 5 cycles asserts on the 5th, and
/// the first quiet cycle clears it.
#[test]
fn steering_pressed_debounce_immediate_clear() -> TestResult {
    let mut decoder = decoder();
    let pressing = PsaInputs {
        driver_torque: 15.0,
        ..PsaInputs::default()
    }
    .snapshot();
    let quiet = PsaInputs::default().snapshot();

    let mut flags = Vec::new();
    for _ in 0..5 {
        flags.push(decoder.update(&pressing)?.steering_pressed);
    }
    assert_eq!(flags, vec![false, false, false, false, true]);
    assert!(decoder.update(&pressing)?.steering_pressed);
    assert!(!decoder.update(&quiet)?.steering_pressed);
    Ok(())
}

#[test]
fn steering_pressed_debounce_symmetric_profile() -> TestResult {
    let mut profile = VehicleProfile::psa();
    profile.steering.debounce.policy = DebouncePolicy::Symmetric;
    let mut decoder = CarStateDecoder::new(&profile);
    let pressing = PsaInputs {
        driver_torque: -15.0,
        ..PsaInputs::default()
    }
    .snapshot();
    let quiet = PsaInputs::default().snapshot();

    for _ in 0..5 {
        decoder.update(&pressing)?;
    }
    let mut flags = Vec::new();
    for _ in 0..5 {
        flags.push(decoder.update(&quiet)?.steering_pressed);
    }
    assert_eq!(flags, vec![true, true, true, true, false]);
    Ok(())
}

#[test]
fn torque_at_allowance_is_not_pressing() -> TestResult {
    let mut decoder = decoder();
    let at_limit = PsaInputs {
        driver_torque: 10.0,
        ..PsaInputs::default()
    }
    .snapshot();
    for _ in 0..10 {
        assert!(!decoder.update(&at_limit)?.steering_pressed);
    }
    Ok(())
}

#[test]
fn failed_decode_does_not_advance_state() -> TestResult {
    let mut decoder = decoder();
    let pressing = PsaInputs {
        driver_torque: 15.0,
        ..PsaInputs::default()
    };
    let mut broken = pressing.snapshot();
    broken.remove(bus::CAM, msg::RESTRAINTS);

    for _ in 0..4 {
        decoder.update(&pressing.snapshot())?;
    }
    for _ in 0..3 {
        let err = decoder.update(&broken).err();
        assert_eq!(err, Some(DecodeError::missing_message(bus::CAM, msg::RESTRAINTS)));
    }
    assert!(!decoder.steering_pressed());
    assert!(decoder.update(&pressing.snapshot())?.steering_pressed);
    Ok(())
}

#[test]
fn speed_filter_settles_on_wheel_speed() -> TestResult {
    let mut decoder = decoder();
    let inputs = PsaInputs::at_speed_ms(1.0);
    let mut state = decoder.update(&inputs.snapshot())?;
    for _ in 0..1000 {
        state = decoder.update(&inputs.snapshot())?;
    }
    assert_relative_eq!(state.v_ego, state.v_ego_raw, epsilon = 1e-6);
    assert!(state.a_ego.abs() < 1e-6);
    assert_eq!(state.standstill, state.v_ego < 0.1);
    Ok(())
}

#[test]
fn speed_filter_reseeds_on_jump() -> TestResult {
    let mut decoder = decoder();
    decoder.update(&PsaInputs::default().snapshot())?;
    let state = decoder.update(&PsaInputs::at_speed_kph(50.0).snapshot())?;
    assert_relative_eq!(state.v_ego, state.v_ego_raw, epsilon = 1e-9);
    assert_relative_eq!(state.a_ego, 0.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn gas_source_engine_position() -> TestResult {
    let mut profile = VehicleProfile::psa();
    profile.state.gas_source = GasSource::EngineAccelPosition;
    let mut decoder = CarStateDecoder::new(&profile);

    let inputs = PsaInputs {
        gas_pedal: 0.0,
        accel_pedal_position: 4.5,
        ..PsaInputs::default()
    };
    assert!(decoder.update(&inputs.snapshot())?.gas_pressed);

    let mut snapshot = inputs.snapshot();
    snapshot.remove(bus::CAM, msg::DRIVER);
    assert!(decoder.update(&snapshot).is_ok(), "DRIVER is not read for this source");
    Ok(())
}

#[test]
fn steering_angle_from_camera_bus() -> TestResult {
    let mut profile = VehicleProfile::psa();
    profile.state.steering_alt_bus = bus::CAM;
    let mut decoder = CarStateDecoder::new(&profile);

    let on_main = PsaInputs {
        steering_angle: 5.0,
        ..PsaInputs::default()
    };
    assert_eq!(
        decoder.update(&on_main.snapshot()).err(),
        Some(DecodeError::missing_message(bus::CAM, msg::STEERING_ALT))
    );

    let on_cam = PsaInputs {
        steering_alt_bus: bus::CAM,
        ..on_main
    };
    assert_relative_eq!(decoder.update(&on_cam.snapshot())?.steering_angle_deg, 5.0);
    Ok(())
}

#[test]
fn radar_status_carries_forward() -> TestResult {
    let mut decoder = decoder();
    let with_radar = PsaInputs {
        lead_detected: Some(true),
        acc2_counter: 7.0,
        ..PsaInputs::default()
    };
    let first = decoder.update(&with_radar.snapshot())?;
    let second = decoder.update(&PsaInputs::default().snapshot())?;
    assert!(first.lead_detected);
    assert_eq!(second.radar_status, first.radar_status);
    Ok(())
}

#[test]
fn silent_radar_reports_no_lead() -> TestResult {
    let mut decoder = decoder();
    let with_lead = PsaInputs {
        lead_detected: Some(true),
        ..PsaInputs::default()
    };
    assert!(decoder.update(&with_lead.snapshot())?.lead_detected);

    for _ in 0..50 {
        let state = decoder.update(&PsaInputs::default().snapshot())?;
        assert!(!state.lead_detected);
        assert!(state.radar_status.is_some());
    }
    Ok(())
}

#[test]
fn carried_groups_are_owned_copies() -> TestResult {
    let mut decoder = decoder();
    let snapshot = PsaInputs {
        lead_detected: Some(false),
        ..PsaInputs::default()
    }
    .snapshot();
    let mut state = decoder.update(&snapshot)?;
    if let Some(group) = state.radar_status.as_mut() {
        group.insert("REQUEST_TAKEOVER".to_string(), 1.0);
    }
    let next = decoder.update(&BusSnapshot::new().with(bus::MAIN, msg::DYN4_FRE, Default::default()));
    assert!(next.is_err());
    let again = decoder.update(&PsaInputs::default().snapshot())?;
    let takeover = again
        .radar_status
        .as_ref()
        .and_then(|g| g.get("REQUEST_TAKEOVER").copied());
    assert_eq!(takeover, Some(0.0));
    Ok(())
}

#[test]
fn decodes_from_raw_frames() -> TestResult {
    let codec = psa_codec();
    let inputs = PsaInputs {
        steering_angle: 42.3,
        steering_rate: -8.5,
        driver_torque: -3.25,
        lead_detected: Some(true),
        ..PsaInputs::at_speed_kph(72.0)
    };
    let snapshot = BusSnapshot::from_frames(&codec, &inputs.frames(&codec))?;
    let state = decoder().update(&snapshot)?;
    assert_relative_eq!(state.steering_angle_deg, 42.3, epsilon = 1e-6);
    assert_relative_eq!(state.steering_rate_deg, -8.5, epsilon = 1e-6);
    assert_relative_eq!(state.steering_torque, -3.25, epsilon = 1e-6);
    assert_relative_eq!(state.v_ego_raw, 20.8, epsilon = 1e-6);
    assert!(state.lead_detected);
    Ok(())
}
