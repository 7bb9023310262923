use serde::{Deserialize, Serialize};

/// Vertical kinematic state of the lander. Velocity and acceleration are
/// signed, negative meaning downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateVector {
    pub position: f64,     // m
    pub velocity: f64,     // m/s
    pub acceleration: f64, // m/s²
}

/// How the position term is advanced each step.
///
/// `Literal` adds the new velocity to the position without scaling it by the
/// time step, which is how the classic game plays. `Scaled` multiplies by
/// the time step. Both agree when the step is one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionIntegration {
    #[default]
    Literal,
    Scaled,
}

impl StateVector {
    pub fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        StateVector {
            position,
            velocity,
            acceleration,
        }
    }

    // Starting state at rest at the given altitude
    pub fn at_rest(position: f64) -> Self {
        StateVector::new(position, 0.0, 0.0)
    }

    /// Semi-implicit Euler step: velocity first, then position from the new
    /// velocity. Acceleration must already be set for this step.
    pub fn integrate(&self, delta_time: f64, mode: PositionIntegration) -> Self {
        let velocity = self.velocity + self.acceleration * delta_time;
        let position = match mode {
            PositionIntegration::Literal => self.position + velocity,
            PositionIntegration::Scaled => self.position + velocity * delta_time,
        };

        StateVector {
            position,
            velocity,
            acceleration: self.acceleration,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.position > 0.0
    }

    pub fn speed(&self) -> f64 {
        self.velocity.abs()
    }
}
