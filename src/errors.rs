use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Input error: throttle {0} is outside [0, 1]")]
    InvalidThrottle(f64),

    #[error("Input error: time step {0} must be positive")]
    InvalidTimeStep(f64),

    #[error("Simulation error: still airborne after {0} ticks")]
    Timeout(u64),

    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
