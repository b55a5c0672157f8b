//! Vehicle profile types and serialization
//!
//! A profile is the per-vehicle constant set: steering limits, debounce
//! policy, signal sources, cadences, buses, diagnostic addresses and the
//! checksum init table. Profiles are data; the decoder and encoder read
//! them and never branch on vehicle identity.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::*;

pub use opencar_errors::{ProfileError, ProfileResult};
use tracing::debug;

/// Current profile schema version.
/// Increment this when the `VehicleProfile` structure changes incompatibly.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Migrate a profile to the current schema version.
///
/// Returns `Ok(true)` if migration was performed, `Ok(false)` if the profile
/// was already at the current version.
///
/// # Errors
///
/// Returns [`ProfileError::UnsupportedVersion`] if `profile.schema_version`
/// is greater than [`CURRENT_SCHEMA_VERSION`].
pub fn migrate_profile(profile: &mut VehicleProfile) -> ProfileResult<bool> {
    if profile.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(ProfileError::UnsupportedVersion {
            found: profile.schema_version,
            max: CURRENT_SCHEMA_VERSION,
        });
    }
    if profile.schema_version == CURRENT_SCHEMA_VERSION {
        return Ok(false);
    }

    // v0 -> v1: no structural changes
    debug!(
        from = profile.schema_version,
        to = CURRENT_SCHEMA_VERSION,
        name = %profile.name,
        "migrating vehicle profile"
    );
    profile.schema_version = CURRENT_SCHEMA_VERSION;
    Ok(true)
}

impl VehicleProfile {
    /// Parse, migrate and validate a JSON profile.
    ///
    /// Sections other than `steering` may be omitted and take the built-in
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] for malformed JSON, and any error
    /// from [`migrate_profile`] or [`validate_profile`].
    pub fn from_json_str(json: &str) -> ProfileResult<Self> {
        let mut profile: VehicleProfile =
            serde_json::from_str(json).map_err(|e| ProfileError::Parse(e.to_string()))?;
        migrate_profile(&mut profile)?;
        validate_profile(&profile)?;
        Ok(profile)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> ProfileResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ProfileError::Parse(e.to_string()))
    }
}
