//! Cross-cycle engagement state.
//!
//! Everything the encoder remembers between cycles lives in
//! [`EngagementState`]. The step functions here are pure; the encoder
//! threads the state through them and commits the result only when the
//! whole cycle succeeded.

use opencar_psa_protocol::EpsStatus;

/// Encoder state carried from one control cycle to the next.
///
/// Owned by the caller and passed to every
/// [`CarController::encode`](crate::CarController::encode) call. One value
/// per vehicle session; never share it between concurrent cycles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngagementState {
    /// Status sent in the last lane keep assist frame
    pub eps_status: EpsStatus,
    /// Radar programming session requested. Never cleared within a session.
    pub radar_disabled: bool,
    /// Resume frames left in the current pulse
    pub resume_pulses_remaining: u32,
    /// Rolling counter of the last resume frame sent, if a pulse train is running
    pub resume_counter: Option<u8>,
    /// Friction brakes currently selected over engine torque
    pub friction_braking: bool,
    /// Last applied steering torque (EPS units)
    pub last_applied_torque: f64,
    /// Last applied steering angle (deg)
    pub last_applied_angle: f64,
    /// Cycles encoded so far
    pub frame: u32,
}

impl EngagementState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One step of the EPS authorization sequence.
///
/// Inactive lateral control always returns `Ready`. While active, the
/// status advances one step per cycle as long as the EPS reports it accepts
/// lane keeping and the driver is not overriding; anything else restarts
/// the sequence so the EPS re-runs its own authorization check.
pub fn next_eps_status(
    current: EpsStatus,
    lat_active: bool,
    eps_authorized: bool,
    steering_pressed: bool,
) -> EpsStatus {
    if lat_active && eps_authorized && !steering_pressed {
        current.advanced()
    } else {
        EpsStatus::Ready
    }
}

/// Rolling counter for the next resume frame.
///
/// The first frame of a pulse train continues from the counter the radar
/// last sent; later frames continue from the one this adapter sent.
pub fn next_resume_counter(previous: Option<u8>, observed: f64) -> u8 {
    let base = previous.unwrap_or_else(|| nibble(observed));
    base.wrapping_add(1) % 16
}

fn nibble(value: f64) -> u8 {
    let reduced = value.round().rem_euclid(16.0);
    if !reduced.is_finite() {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "reduced is a whole number in 0..16"
    )]
    let whole = reduced as i64;
    u8::try_from(whole).map_or(0, |n| n % 16)
}
