// Physical Constants
pub const LUNAR_GRAVITY: f64 = 1.62; // m/s²

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0; // s
pub const MAX_TOUCHDOWN_SPEED: f64 = 2.0; // m/s
pub const MAX_TICKS: u64 = 86_400; // per run

// Stock lander
pub const LANDER_DRY_MASS: f64 = 30_000.0; // kg
pub const INITIAL_ALTITUDE: f64 = 1_000.0; // m

// Stock fuel tanks (max fuel, dry mass)
pub const MAIN_TANK: (f64, f64) = (10_000.0, 3_000.0); // kg
pub const AUX_TANK: (f64, f64) = (5_000.0, 2_000.0); // kg

// Stock descent engine
pub const ENGINE_MAX_MASS_FLOW: f64 = 30.0; // kg/s
pub const ENGINE_MIN_MASS_FLOW: f64 = 0.0; // kg/s
pub const ENGINE_EXHAUST_VELOCITY: f64 = 8_000.0; // m/s
pub const ENGINE_DRY_MASS: f64 = 8_000.0; // kg
pub const ENGINE_COUNT: usize = 2;
