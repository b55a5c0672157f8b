//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use opencar_test_helpers::prelude::*;
//! ```

pub use crate::codec::{MessageLayout, SignalLayout, TableCodec};
pub use crate::fixtures::{PsaInputs, psa_codec, psa_layouts};
pub use crate::model::BicycleModel;
pub use crate::must::{must, must_some, must_with};
pub use crate::{assert_approx_eq, assert_within};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
