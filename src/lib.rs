pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::engine::Engine;
pub use control::fuel_tank::FuelTank;
pub use control::lander::Lander;
pub use control::mission::{EngineSpec, FuelTankSpec, LanderSpec, SimulationConfig};
pub use control::throttle::{parse_throttle, InputValidation};
pub use errors::{SimulationError, SimulationResult};
pub use simulation::{step, Outcome, RunSummary, ScriptedThrottle, Simulation, ThrottleSource};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::state_vector::{PositionIntegration, StateVector};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{StatusReport, Telemetry};
