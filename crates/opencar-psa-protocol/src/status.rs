//! EPS status values.

use serde::{Deserialize, Serialize};

/// Lane keeping status driven into every `LANE_KEEP_ASSIST` frame.
///
/// The EPS only accepts commands after observing `Ready -> Authorized ->
/// Active` in consecutive frames. `Unavailable` and `Unselected` exist on
/// the wire but are never driven during normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum EpsStatus {
    /// Lane keeping unavailable
    Unavailable = 0,
    /// Lane keeping not selected
    Unselected = 1,
    /// Ready to be authorized
    #[default]
    Ready = 2,
    /// Authorization in progress
    Authorized = 3,
    /// Commands accepted
    Active = 4,
}

impl EpsStatus {
    /// Wire value.
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    /// Parse a wire value.
    pub const fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unavailable),
            1 => Some(Self::Unselected),
            2 => Some(Self::Ready),
            3 => Some(Self::Authorized),
            4 => Some(Self::Active),
            _ => None,
        }
    }

    /// Next step of the authorization sequence, saturating at `Active`.
    ///
    /// `Unavailable` and `Unselected` are outside the sequence and restart it.
    pub const fn advanced(self) -> Self {
        match self {
            Self::Ready => Self::Authorized,
            Self::Authorized | Self::Active => Self::Active,
            Self::Unavailable | Self::Unselected => Self::Ready,
        }
    }
}

/// Lane keeping state reported by the EPS in `IS_DAT_DIRA.EPS_STATE_LKA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum EpsLkaState {
    /// Not authorized
    #[default]
    Unauthorized = 0,
    /// Authorized
    Authorized = 1,
    /// Available
    Available = 2,
    /// Active
    Active = 3,
    /// Defect
    Defect = 4,
}

impl EpsLkaState {
    /// Parse the raw signal value. Unknown values map to `Defect`.
    pub fn from_signal(value: f64) -> Self {
        match value.round() {
            v if v.abs() < f64::EPSILON => Self::Unauthorized,
            v if (v - 1.0).abs() < f64::EPSILON => Self::Authorized,
            v if (v - 2.0).abs() < f64::EPSILON => Self::Available,
            v if (v - 3.0).abs() < f64::EPSILON => Self::Active,
            _ => Self::Defect,
        }
    }

    /// Whether the EPS has reported that it accepts lane keeping commands.
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized | Self::Active)
    }
}
