//! Scenario configuration and construction of a fresh lander.
//!
//! Every field defaults to the stock lunar descent, so a TOML
//! file only needs to list what it changes:
//!
//! ```toml
//! gravity = 3.71
//! position_integration = "scaled"
//!
//! [lander]
//! initial_position = 2500.0
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::{engine::Engine, fuel_tank::FuelTank, lander::Lander, throttle::InputValidation};
use crate::constants::*;
use crate::errors::SimulationResult;
use crate::trajectory_system::state_vector::{PositionIntegration, StateVector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub delta_time: f64,          // s
    pub gravity: f64,             // m/s², magnitude
    pub max_touchdown_speed: f64, // m/s
    pub max_ticks: u64,
    pub position_integration: PositionIntegration,
    pub input_validation: InputValidation,
    pub lander: LanderSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderSpec {
    pub dry_mass: f64,
    pub initial_position: f64,
    pub initial_velocity: f64,
    pub fuel_tanks: Vec<FuelTankSpec>,
    pub engines: Vec<EngineSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTankSpec {
    pub max_fuel: f64,
    pub dry_mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub max_mass_flow: f64,
    #[serde(default)]
    pub min_mass_flow: f64,
    pub exhaust_velocity: f64,
    pub dry_mass: f64,
    /// Tank indices in drain order. Omitted means every tank, in lander order.
    #[serde(default)]
    pub feed_tanks: Option<Vec<usize>>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            delta_time: TIME_STEP,
            gravity: LUNAR_GRAVITY,
            max_touchdown_speed: MAX_TOUCHDOWN_SPEED,
            max_ticks: MAX_TICKS,
            position_integration: PositionIntegration::default(),
            input_validation: InputValidation::default(),
            lander: LanderSpec::default(),
        }
    }
}

impl Default for LanderSpec {
    fn default() -> Self {
        let engine = EngineSpec {
            max_mass_flow: ENGINE_MAX_MASS_FLOW,
            min_mass_flow: ENGINE_MIN_MASS_FLOW,
            exhaust_velocity: ENGINE_EXHAUST_VELOCITY,
            dry_mass: ENGINE_DRY_MASS,
            feed_tanks: None,
        };

        LanderSpec {
            dry_mass: LANDER_DRY_MASS,
            initial_position: INITIAL_ALTITUDE,
            initial_velocity: 0.0,
            fuel_tanks: vec![
                FuelTankSpec::new(MAIN_TANK.0, MAIN_TANK.1),
                FuelTankSpec::new(AUX_TANK.0, AUX_TANK.1),
            ],
            engines: vec![engine; ENGINE_COUNT],
        }
    }
}

impl FuelTankSpec {
    pub fn new(max_fuel: f64, dry_mass: f64) -> Self {
        FuelTankSpec { max_fuel, dry_mass }
    }

    pub fn build(&self) -> FuelTank {
        FuelTank::new(self.max_fuel, self.dry_mass)
    }
}

impl EngineSpec {
    pub fn build(&self, tank_count: usize) -> SimulationResult<Engine> {
        let feed_tanks = self
            .feed_tanks
            .clone()
            .unwrap_or_else(|| (0..tank_count).collect());
        Engine::new(
            self.max_mass_flow,
            self.min_mass_flow,
            self.exhaust_velocity,
            self.dry_mass,
            feed_tanks,
        )
    }
}

impl LanderSpec {
    /// Builds a brand new lander with full tanks. Nothing is shared with any
    /// previously built lander.
    pub fn build(&self) -> SimulationResult<Lander> {
        let fuel_tanks: Vec<FuelTank> = self.fuel_tanks.iter().map(FuelTankSpec::build).collect();
        let engines = self
            .engines
            .iter()
            .map(|spec| spec.build(fuel_tanks.len()))
            .collect::<SimulationResult<Vec<_>>>()?;
        let initial_state = StateVector::new(self.initial_position, self.initial_velocity, 0.0);

        Lander::new(self.dry_mass, engines, fuel_tanks, initial_state)
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded scenario from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> SimulationResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn build_lander(&self) -> SimulationResult<Lander> {
        self.lander.build()
    }
}
