//! Steering-pressed debounce
//!
//! The raw condition is `|driver torque| > allowance`. The debounced flag
//! asserts once the raw condition has held for `cycles` consecutive calls.
//! How it clears depends on [`DebouncePolicy`].

use opencar_profile::{DebounceConfig, DebouncePolicy};

/// Debounce window state.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteeringPressedDebounce {
    policy: DebouncePolicy,
    cycles: u32,
    raw_true: u32,
    raw_false: u32,
    pressed: bool,
}

impl SteeringPressedDebounce {
    /// Create a released debounce window. A zero window is treated as one.
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            policy: config.policy,
            cycles: config.cycles.max(1),
            raw_true: 0,
            raw_false: 0,
            pressed: false,
        }
    }

    /// Feed one cycle's raw condition and return the debounced flag.
    pub fn update(&mut self, raw: bool) -> bool {
        if raw {
            self.raw_true = self.raw_true.saturating_add(1);
            self.raw_false = 0;
            if self.raw_true >= self.cycles {
                self.pressed = true;
            }
        } else {
            self.raw_false = self.raw_false.saturating_add(1);
            self.raw_true = 0;
            match self.policy {
                DebouncePolicy::Immediate => self.pressed = false,
                DebouncePolicy::Symmetric => {
                    if self.raw_false >= self.cycles {
                        self.pressed = false;
                    }
                }
            }
        }
        self.pressed
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn reset(&mut self) {
        self.raw_true = 0;
        self.raw_false = 0;
        self.pressed = false;
    }
}

impl Default for SteeringPressedDebounce {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
