//! Per-cycle control frame encoder.

use std::sync::Arc;

use opencar_can_common::{CanFrame, SignalCodec, SignalValues};
use opencar_carstate::VehicleState;
use opencar_lateral::{SteerContext, SteerControlType, SteerLimiter, VehicleModel};
use opencar_profile::{LongitudinalMode, VehicleProfile, validate_profile};
use opencar_psa_protocol::ids::{messages as msg, signals};
use opencar_psa_protocol::{
    LaneKeepAssistCommand, PROGRAMMING_SESSION_REQUEST, PowertrainRequest, SteerSetpoint,
    TESTER_PRESENT_REQUEST, cancel_acc_echo, dat_artiv_v2_4f6, dyn_mdd_etat_2f6,
    dyn1_mdd_etat_2b6, lane_keep_assist, pack_with_checksum, resume_acc_echo, supv_artiv_796,
};
use tracing::{debug, info, trace};

use crate::engagement::{EngagementState, next_eps_status, next_resume_counter};
use crate::error::ControlResult;
use crate::longitudinal::{accel_to_deceleration, accel_to_wheel_torque, friction_brake_mode};
use crate::request::{ActuatorRequest, AppliedCommand};

/// Whether a cadence of `step` cycles fires on `frame`.
fn every(frame: u32, step: u32) -> bool {
    frame % step.max(1) == 0
}

fn counter(n: u32) -> u8 {
    u8::try_from(n % 16).unwrap_or_default()
}

/// Control encoder for one vehicle.
///
/// Holds only constants: the profile, the limiter it selects and the codec.
/// All cross-cycle state lives in the caller's [`EngagementState`].
pub struct CarController<C> {
    profile: VehicleProfile,
    limiter: SteerLimiter,
    codec: C,
}

impl<C: SignalCodec> CarController<C> {
    /// Build an encoder for `profile`.
    ///
    /// `model` is only read by the dynamics angle limiter.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Profile`](crate::ControlError::Profile) if the
    /// profile fails validation or selects the dynamics limiter without a
    /// vehicle model.
    pub fn new(
        profile: VehicleProfile,
        codec: C,
        model: Option<Arc<dyn VehicleModel>>,
    ) -> ControlResult<Self> {
        validate_profile(&profile)?;
        let limiter = profile.steer_limiter(model)?;
        debug!(
            profile = %profile.name,
            control_type = ?limiter.control_type(),
            longitudinal = ?profile.longitudinal.mode,
            "control encoder ready"
        );
        Ok(Self {
            profile,
            limiter,
            codec,
        })
    }

    pub fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    pub fn limiter(&self) -> &SteerLimiter {
        &self.limiter
    }

    /// Encode one control cycle.
    ///
    /// Frames come out in a fixed order: lane keep assist first, then either
    /// the radar session and emulation frames (owned longitudinal) or the
    /// stock cruise echoes. `state` is only updated when every frame of the
    /// cycle was built.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Codec`](crate::ControlError::Codec) if the
    /// codec rejects a message. `state` is left untouched.
    pub fn encode(
        &self,
        state: &mut EngagementState,
        vehicle: &VehicleState,
        request: &ActuatorRequest,
    ) -> ControlResult<Vec<CanFrame>> {
        let mut next = *state;
        let mut frames = Vec::with_capacity(8);

        self.encode_lateral(&mut next, vehicle, request, &mut frames)?;
        match self.profile.longitudinal.mode {
            LongitudinalMode::Owned => {
                self.encode_radar_session(&mut next, &mut frames)?;
                self.encode_owned_longitudinal(&mut next, vehicle, request, &mut frames)?;
            }
            LongitudinalMode::Stock => {
                self.encode_stock_cruise(&mut next, vehicle, request, &mut frames)?;
            }
        }

        if next.eps_status != state.eps_status {
            debug!(from = ?state.eps_status, to = ?next.eps_status, "EPS status transition");
        }
        if next.radar_disabled && !state.radar_disabled {
            let diagnostics = &self.profile.diagnostics;
            info!(
                address = diagnostics.radar_request_address,
                bus = diagnostics.bus,
                "requested radar programming session"
            );
        }
        trace!(frame = next.frame, count = frames.len(), "encoded control cycle");

        next.frame = next.frame.wrapping_add(1);
        *state = next;
        Ok(frames)
    }

    /// The command sent in the last encoded cycle.
    pub fn applied(&self, state: &EngagementState) -> AppliedCommand {
        let torque = match self.limiter.control_type() {
            SteerControlType::Torque => state.last_applied_torque / self.limiter.absolute_max(),
            SteerControlType::Angle => 0.0,
        };
        AppliedCommand {
            torque,
            torque_output: state.last_applied_torque,
            steering_angle_deg: state.last_applied_angle,
        }
    }

    fn encode_lateral(
        &self,
        next: &mut EngagementState,
        vehicle: &VehicleState,
        request: &ActuatorRequest,
        frames: &mut Vec<CanFrame>,
    ) -> ControlResult<()> {
        let steering = &self.profile.steering;
        if !every(next.frame, self.profile.timing.steer_step) {
            return Ok(());
        }

        let ctx = SteerContext {
            v_ego: vehicle.v_ego,
            v_ego_raw: vehicle.v_ego_raw,
            measured_angle: vehicle.steering_angle_deg,
            driver_torque: vehicle.steering_torque,
            active: request.lat_active,
        };
        let setpoint = match self.limiter.control_type() {
            SteerControlType::Torque => {
                let requested = (request.steering_torque * self.limiter.absolute_max()).round();
                let applied = self.limiter.limit(requested, next.last_applied_torque, &ctx);
                next.last_applied_torque = applied;
                SteerSetpoint::Torque(applied)
            }
            SteerControlType::Angle => {
                let applied =
                    self.limiter
                        .limit(request.steering_angle_deg, next.last_applied_angle, &ctx);
                next.last_applied_angle = applied;
                SteerSetpoint::Angle(applied)
            }
        };

        let status = next_eps_status(
            next.eps_status,
            request.lat_active,
            vehicle.eps_authorized(),
            vehicle.steering_pressed,
        );
        next.eps_status = status;

        let values = lane_keep_assist(&LaneKeepAssistCommand {
            counter: counter(next.frame / self.profile.timing.steer_step.max(1)),
            status,
            torque_factor: if request.lat_active {
                steering.eps_torque_factor
            } else {
                0.0
            },
            setpoint,
        });
        frames.push(self.pack_checked(
            msg::LANE_KEEP_ASSIST,
            values,
            signals::lane_keep_assist::CHECKSUM,
            steering.bus,
        )?);
        Ok(())
    }

    fn encode_radar_session(
        &self,
        next: &mut EngagementState,
        frames: &mut Vec<CanFrame>,
    ) -> ControlResult<()> {
        let diagnostics = &self.profile.diagnostics;
        if !next.radar_disabled {
            frames.push(CanFrame::new(
                diagnostics.radar_request_address,
                &PROGRAMMING_SESSION_REQUEST,
                diagnostics.bus,
            )?);
            next.radar_disabled = true;
        } else if next.frame != 0 && every(next.frame, diagnostics.tester_present_period) {
            frames.push(CanFrame::new(
                diagnostics.radar_request_address,
                &TESTER_PRESENT_REQUEST,
                diagnostics.bus,
            )?);
        }
        Ok(())
    }

    fn encode_owned_longitudinal(
        &self,
        next: &mut EngagementState,
        vehicle: &VehicleState,
        request: &ActuatorRequest,
        frames: &mut Vec<CanFrame>,
    ) -> ControlResult<()> {
        let config = &self.profile.longitudinal;
        let active = request.long_active;
        next.friction_braking = active
            && friction_brake_mode(
                next.friction_braking,
                request.accel,
                vehicle.gas_pressed,
                &config.brake,
            );

        if every(next.frame, config.status_step) {
            let step = next.frame / config.status_step.max(1);
            let powertrain = PowertrainRequest {
                counter: counter(step),
                gear_type: u8::from(step % 2 == 1),
                wheel_torque: accel_to_wheel_torque(request.accel, config),
                deceleration: accel_to_deceleration(request.accel, &config.brake),
                friction_brake: next.friction_braking,
                active,
            };
            frames.push(self.pack_checked(
                msg::HS2_DYN1_MDD_ETAT_2B6,
                dyn1_mdd_etat_2b6(&powertrain),
                signals::hs2_dyn1_mdd_etat_2b6::DYN_ACC_CHECKSUM,
                config.bus,
            )?);
            frames.push(self.pack_checked(
                msg::HS2_DYN_MDD_ETAT_2F6,
                dyn_mdd_etat_2f6(&powertrain),
                signals::hs2_dyn_mdd_etat_2f6::DYN_ACC2_FRAME_CHECKSUM,
                config.bus,
            )?);
        }
        if every(next.frame, config.target_step) {
            frames.push(self.pack(msg::HS2_DAT_ARTIV_V2_4F6, &dat_artiv_v2_4f6(), config.bus)?);
        }
        if every(next.frame, config.supervision_step) {
            frames.push(self.pack(msg::HS2_SUPV_ARTIV_796, &supv_artiv_796(), config.bus)?);
        }
        Ok(())
    }

    fn encode_stock_cruise(
        &self,
        next: &mut EngagementState,
        vehicle: &VehicleState,
        request: &ActuatorRequest,
        frames: &mut Vec<CanFrame>,
    ) -> ControlResult<()> {
        let resume = &self.profile.resume;
        if request.cancel {
            frames.push(self.pack(
                msg::HS2_DAT_MDD_CMD_452,
                &cancel_acc_echo(&vehicle.cruise_command, true),
                resume.bus,
            )?);
        }

        let wants_resume = request.lat_active && vehicle.standstill && vehicle.lead_detected;
        let observed = match (&vehicle.radar_status, wants_resume) {
            (Some(observed), true) => observed,
            _ => {
                next.resume_pulses_remaining = 0;
                next.resume_counter = None;
                return Ok(());
            }
        };

        if every(next.frame, resume.period) {
            next.resume_pulses_remaining = resume.pulse_cycles;
        }
        if next.resume_pulses_remaining == 0 {
            return Ok(());
        }

        let observed_counter = observed
            .get(signals::hs2_dyn_mdd_etat_2f6::PROCESS_COUNTER_4B_ACC2)
            .copied()
            .unwrap_or_default();
        let resume_counter = next_resume_counter(next.resume_counter, observed_counter);
        frames.push(self.pack_checked(
            msg::HS2_DYN_MDD_ETAT_2F6,
            resume_acc_echo(observed, resume_counter, true),
            signals::hs2_dyn_mdd_etat_2f6::DYN_ACC2_FRAME_CHECKSUM,
            resume.bus,
        )?);
        next.resume_counter = Some(resume_counter);
        next.resume_pulses_remaining = next.resume_pulses_remaining.saturating_sub(1);
        Ok(())
    }

    fn pack(&self, message: &str, values: &SignalValues, bus: u8) -> ControlResult<CanFrame> {
        let encoded = self.codec.encode(message, values)?;
        Ok(CanFrame::new(encoded.address, &encoded.payload, bus)?)
    }

    fn pack_checked(
        &self,
        message: &str,
        values: SignalValues,
        checksum_signal: &str,
        bus: u8,
    ) -> ControlResult<CanFrame> {
        let encoded = pack_with_checksum(
            &self.codec,
            message,
            values,
            checksum_signal,
            &self.profile.checksum,
        )?;
        Ok(CanFrame::new(encoded.address, &encoded.payload, bus)?)
    }
}

impl<C> std::fmt::Debug for CarController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarController")
            .field("profile", &self.profile.name)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every() {
        assert!(every(0, 2));
        assert!(!every(1, 2));
        assert!(every(300, 300));
        // zero cadence fires every cycle
        assert!(every(7, 0));
    }

    #[test]
    fn test_counter_wraps() {
        assert_eq!(counter(0), 0);
        assert_eq!(counter(15), 15);
        assert_eq!(counter(16), 0);
        assert_eq!(counter(u32::MAX), 15);
    }
}
