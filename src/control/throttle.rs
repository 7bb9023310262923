use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{SimulationError, SimulationResult};

/// What the driver does with out-of-range commands before they reach the
/// lander. The physics itself accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputValidation {
    #[default]
    Permissive,
    Strict,
}

impl InputValidation {
    pub fn check(self, throttle: f64, delta_time: f64) -> SimulationResult<()> {
        if self == InputValidation::Permissive {
            return Ok(());
        }
        if !(delta_time.is_finite() && delta_time > 0.0) {
            return Err(SimulationError::InvalidTimeStep(delta_time));
        }
        if !(0.0..=1.0).contains(&throttle) {
            return Err(SimulationError::InvalidThrottle(throttle));
        }
        Ok(())
    }
}

/// Turns a line typed by the player into a throttle setting.
///
/// Anything that isn't a finite number means zero throttle; numbers are
/// clamped into [0, 1].
pub fn parse_throttle(input: &str) -> f64 {
    let input = input.trim();
    // A bare enter just advances the clock
    if input.is_empty() {
        return 0.0;
    }
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => value.clamp(0.0, 1.0),
        _ => {
            warn!("Unreadable throttle {:?}, using 0", input);
            0.0
        }
    }
}
