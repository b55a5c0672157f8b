//! Engagement sequencing and control frame encoding
//!
//! One [`CarController`] per vehicle turns a decoded
//! [`VehicleState`](opencar_carstate::VehicleState) and an
//! [`ActuatorRequest`] into the ordered frame list for one control cycle.
//!
//! - [`engagement`]: cross-cycle [`EngagementState`] and the EPS
//!   authorization sequence
//! - [`longitudinal`]: acceleration to wheel torque and brake mode
//! - [`controller`]: the encoder itself
//!
//! # Example
//!
//! ```ignore
//! let controller = CarController::new(VehicleProfile::psa(), codec, None)?;
//! let mut state = EngagementState::new();
//! loop {
//!     let vehicle = decoder.update(&snapshot)?;
//!     let frames = controller.encode(&mut state, &vehicle, &request)?;
//!     send(frames);
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]

pub mod controller;
pub mod engagement;
pub mod error;
pub mod longitudinal;
pub mod request;

pub use controller::CarController;
pub use engagement::{EngagementState, next_eps_status, next_resume_counter};
pub use error::{ControlError, ControlResult};
pub use longitudinal::{accel_to_deceleration, accel_to_wheel_torque, friction_brake_mode};
pub use request::{ActuatorRequest, AppliedCommand};
