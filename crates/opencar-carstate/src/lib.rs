//! Vehicle state decoding
//!
//! [`CarStateDecoder`] turns one cycle's [`BusSnapshot`](opencar_can_common::BusSnapshot)
//! into a [`VehicleState`]. Two pieces of state persist across cycles:
//!
//! - [`SteeringPressedDebounce`]: driver override must hold for N cycles
//! - [`SpeedFilter`]: smoothed speed and acceleration from raw wheel speeds
//!
//! # Example
//!
//! ```
//! use opencar_can_common::BusSnapshot;
//! use opencar_carstate::CarStateDecoder;
//! use opencar_profile::VehicleProfile;
//!
//! let mut decoder = CarStateDecoder::new(&VehicleProfile::psa());
//! // Nothing observed yet: controls unavailable for this cycle
//! assert!(decoder.update(&BusSnapshot::new()).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]

pub mod debounce;
pub mod decoder;
pub mod speed;
pub mod state;

pub use debounce::SteeringPressedDebounce;
pub use decoder::CarStateDecoder;
pub use speed::SpeedFilter;
pub use state::{CruiseState, Gear, VehicleState, WheelSpeeds};
