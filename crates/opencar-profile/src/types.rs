//! Profile type definitions

use std::sync::Arc;

use opencar_errors::{ProfileError, ProfileResult};
use opencar_lateral::{
    AngleTableLimits, DynamicsLimits, SteerControlType, SteerLimiter, TorqueLimits, VehicleModel,
};
use opencar_psa_protocol::{ChecksumTable, addresses, bus};
use serde::{Deserialize, Serialize};

/// Complete constant set for one vehicle.
///
/// All behavior in the decoder and encoder is parameterised by this value;
/// swapping profiles never touches the algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Schema format version for migration tracking.
    /// Old profiles without this field deserialize as 0.
    #[serde(default)]
    pub schema_version: u32,
    /// Human-readable vehicle name
    pub name: String,
    #[serde(default)]
    pub timing: TimingConfig,
    pub steering: SteeringConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub longitudinal: LongitudinalConfig,
    #[serde(default)]
    pub resume: ResumeConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub checksum: ChecksumTable,
}

impl VehicleProfile {
    /// Built-in profile for AEE2010 vehicles with torque-controlled EPS.
    pub fn psa() -> Self {
        Self {
            schema_version: crate::CURRENT_SCHEMA_VERSION,
            name: "PSA AEE2010".to_string(),
            timing: TimingConfig::default(),
            steering: SteeringConfig::default(),
            state: StateConfig::default(),
            longitudinal: LongitudinalConfig::default(),
            resume: ResumeConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            checksum: ChecksumTable::psa(),
        }
    }

    pub fn with_limiter(mut self, limiter: LimiterConfig) -> Self {
        self.steering.limiter = limiter;
        self
    }

    pub fn with_longitudinal(mut self, mode: LongitudinalMode) -> Self {
        self.longitudinal.mode = mode;
        self
    }

    /// Build the steering limiter this profile selects.
    ///
    /// The dynamics variant takes its period and step from [`TimingConfig`]
    /// so the rate bound matches the actual command cadence.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidField`] if the dynamics variant is
    /// selected and no vehicle model is supplied.
    pub fn steer_limiter(&self, model: Option<Arc<dyn VehicleModel>>) -> ProfileResult<SteerLimiter> {
        match &self.steering.limiter {
            LimiterConfig::Torque(limits) => Ok(SteerLimiter::Torque(*limits)),
            LimiterConfig::AngleTable(limits) => Ok(SteerLimiter::AngleTable(limits.clone())),
            LimiterConfig::AngleDynamics(limits) => {
                let model = model.ok_or_else(|| {
                    ProfileError::invalid(
                        "steering.limiter",
                        "angle_dynamics requires a vehicle model",
                    )
                })?;
                let limits = DynamicsLimits {
                    dt: self.timing.dt,
                    steer_step: self.timing.steer_step,
                    ..*limits
                };
                Ok(SteerLimiter::AngleDynamics { limits, model })
            }
        }
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self::psa()
    }
}

/// Control loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Control period (s)
    pub dt: f64,
    /// Cycles between steering commands
    pub steer_step: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            steer_step: 1,
        }
    }
}

/// Steering limiter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LimiterConfig {
    Torque(TorqueLimits),
    AngleTable(AngleTableLimits),
    AngleDynamics(DynamicsLimits),
}

impl LimiterConfig {
    pub fn control_type(&self) -> SteerControlType {
        match self {
            LimiterConfig::Torque(_) => SteerControlType::Torque,
            LimiterConfig::AngleTable(_) | LimiterConfig::AngleDynamics(_) => {
                SteerControlType::Angle
            }
        }
    }
}

impl Default for LimiterConfig {
    fn default() -> Self {
        LimiterConfig::Torque(TorqueLimits::psa())
    }
}

/// How the debounced "steering pressed" flag clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebouncePolicy {
    /// Asserts after N consecutive raw-true cycles, clears on the first raw-false cycle
    #[default]
    Immediate,
    /// Asserts after N consecutive raw-true cycles, clears after N consecutive raw-false cycles
    Symmetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    pub policy: DebouncePolicy,
    /// Consecutive cycles required to change state
    pub cycles: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            policy: DebouncePolicy::Immediate,
            cycles: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringConfig {
    pub limiter: LimiterConfig,
    /// Driver torque (Nm) above which the driver counts as pressing
    pub driver_allowance: f64,
    #[serde(default)]
    pub debounce: DebounceConfig,
    /// EPS torque authority sent while lateral control is active
    pub eps_torque_factor: f64,
    /// Bus the lane keep assist frame goes out on
    #[serde(default = "default_steering_bus")]
    pub bus: u8,
}

fn default_steering_bus() -> u8 {
    bus::MAIN
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            limiter: LimiterConfig::default(),
            driver_allowance: 10.0,
            debounce: DebounceConfig::default(),
            eps_torque_factor: 100.0,
            bus: bus::MAIN,
        }
    }
}

/// Signal carrying the accelerator position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasSource {
    /// `DRIVER.GAS_PEDAL` on the camera bus
    #[default]
    DriverPedal,
    /// `Dyn5_CMM.P334_ACCPed_Position` on the main bus
    EngineAccelPosition,
}

/// Two-state speed estimator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedFilterConfig {
    /// Steady-state Kalman gains for speed and acceleration
    pub gains: [f64; 2],
    /// Sample period (s)
    pub dt: f64,
    /// Raw speed jump (m/s) that re-seeds the estimator
    pub reset_threshold: f64,
}

impl Default for SpeedFilterConfig {
    fn default() -> Self {
        Self {
            gains: [0.174_060_39, 1.659_256_47],
            dt: 0.01,
            reset_threshold: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    pub gas_source: GasSource,
    /// Bus carrying `STEERING_ALT`
    pub steering_alt_bus: u8,
    /// Scale applied to each wheel speed after km/h to m/s
    pub wheel_speed_factor: f64,
    /// Raw speed (m/s) below which the vehicle is at standstill
    pub standstill_threshold: f64,
    #[serde(default)]
    pub speed_filter: SpeedFilterConfig,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            gas_source: GasSource::DriverPedal,
            steering_alt_bus: bus::MAIN,
            wheel_speed_factor: 1.04,
            standstill_threshold: 0.1,
            speed_filter: SpeedFilterConfig::default(),
        }
    }
}

/// Who drives the powertrain and brakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudinalMode {
    /// Stock radar/cruise ECU stays in charge
    #[default]
    Stock,
    /// This system replaces the radar ECU
    Owned,
}

/// Engine-brake vs friction-brake decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakeModeConfig {
    /// Enter friction braking below this acceleration (m/s²)
    pub engage_below: f64,
    /// Leave friction braking above this acceleration (m/s²)
    pub release_above: f64,
    /// Gas pedal forces engine torque mode
    pub gas_overrides: bool,
    /// Largest deceleration request (m/s²)
    pub max_deceleration: f64,
}

impl Default for BrakeModeConfig {
    fn default() -> Self {
        Self {
            engage_below: -0.5,
            release_above: -0.3,
            gas_overrides: true,
            max_deceleration: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalConfig {
    pub mode: LongitudinalMode,
    /// Acceleration breakpoints (m/s²), ascending
    pub accel_bp: Vec<f64>,
    /// Wheel torque (Nm) at each breakpoint
    pub torque_v: Vec<f64>,
    pub torque_min: f64,
    pub torque_max: f64,
    #[serde(default)]
    pub brake: BrakeModeConfig,
    /// Bus the emulated radar frames go out on
    pub bus: u8,
    /// Cycles between `2B6`/`2F6` frames
    pub status_step: u32,
    /// Cycles between `4F6` frames
    pub target_step: u32,
    /// Cycles between `796` frames
    pub supervision_step: u32,
}

impl Default for LongitudinalConfig {
    fn default() -> Self {
        Self {
            mode: LongitudinalMode::Stock,
            accel_bp: vec![-1.0, 0.0, 1.0, 2.0],
            torque_v: vec![-450.0, 0.0, 450.0, 900.0],
            torque_min: -500.0,
            torque_max: 1000.0,
            brake: BrakeModeConfig::default(),
            bus: bus::ADAS,
            status_step: 2,
            target_step: 10,
            supervision_step: 100,
        }
    }
}

/// Stock ACC resume and cancel echoes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResumeConfig {
    /// Cycles per resume period
    pub period: u32,
    /// Cycles at the start of each period that carry the resume bit
    pub pulse_cycles: u32,
    /// Bus the echoed frames go out on
    pub bus: u8,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            period: 300,
            pulse_cycles: 5,
            bus: bus::ADAS,
        }
    }
}

/// Radar ECU diagnostic session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// UDS request address of the radar ECU
    pub radar_request_address: u32,
    pub bus: u8,
    /// Cycles between tester-present frames
    pub tester_present_period: u32,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            radar_request_address: addresses::ARTIV_DIAG_REQUEST,
            bus: bus::ADAS,
            tester_present_period: 100,
        }
    }
}
