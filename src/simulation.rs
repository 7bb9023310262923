use std::fmt;

use log::{info, warn};

use crate::control::lander::Lander;
use crate::control::mission::SimulationConfig;
use crate::errors::{SimulationError, SimulationResult};
use crate::telemetry_system::telemetry::{StatusReport, Telemetry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Landed,
    Crashed,
}

impl Outcome {
    // Touching down at exactly the limit still counts as a landing
    pub fn classify(touchdown_velocity: f64, max_touchdown_speed: f64) -> Self {
        if touchdown_velocity.abs() > max_touchdown_speed {
            Outcome::Crashed
        } else {
            Outcome::Landed
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Landed => write!(f, "You landed safely!"),
            Outcome::Crashed => write!(f, "Sorry... You crashed!"),
        }
    }
}

/// Supplies a throttle command for every tick.
pub trait ThrottleSource {
    fn next_throttle(&mut self, status: &StatusReport) -> f64;
}

/// Replays a fixed list of throttle settings, then coasts at zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedThrottle {
    commands: Vec<f64>,
    cursor: usize,
}

impl ScriptedThrottle {
    pub fn new(commands: Vec<f64>) -> Self {
        ScriptedThrottle {
            commands,
            cursor: 0,
        }
    }
}

impl ThrottleSource for ScriptedThrottle {
    fn next_throttle(&mut self, _status: &StatusReport) -> f64 {
        let throttle = self.commands.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        throttle
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub ticks: u64,
    pub touchdown: StatusReport,
}

/// Advances `lander` by one tick under `config`.
///
/// Gravity is handed to the lander as the external acceleration, so the
/// result depends only on the arguments. Returns the thrust produced.
pub fn step(config: &SimulationConfig, lander: &mut Lander, throttle: f64) -> SimulationResult<f64> {
    config
        .input_validation
        .check(throttle, config.delta_time)?;

    Ok(lander.burn(
        throttle,
        config.delta_time,
        -config.gravity,
        config.position_integration,
    ))
}

/// One playthrough: a config and the lander currently flying under it.
pub struct Simulation {
    config: SimulationConfig,
    lander: Lander,
    tick: u64,
    last_thrust: f64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        let lander = config.build_lander()?;
        info!(
            "Starting descent from {:.2} m with {:.2} kg total mass",
            lander.state.position,
            lander.total_mass()
        );

        Ok(Simulation {
            config,
            lander,
            tick: 0,
            last_thrust: 0.0,
        })
    }

    /// Throws the current lander away and starts over with a fresh one.
    ///
    /// The old lander is only replaced once the new one has been built, so a
    /// failed restart leaves the previous run untouched.
    pub fn start(&mut self) -> SimulationResult<()> {
        let lander = self.config.build_lander()?;
        self.lander = lander;
        self.tick = 0;
        self.last_thrust = 0.0;
        info!("Simulation restarted");
        Ok(())
    }

    pub fn advance(&mut self, throttle: f64) -> SimulationResult<StatusReport> {
        self.last_thrust = step(&self.config, &mut self.lander, throttle)?;
        self.tick += 1;
        Ok(self.status())
    }

    pub fn status(&self) -> StatusReport {
        StatusReport::capture(&self.lander, self.tick, self.last_thrust)
    }

    pub fn is_airborne(&self) -> bool {
        self.lander.is_airborne()
    }

    // None while still in the air
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_airborne() {
            None
        } else {
            Some(Outcome::classify(
                self.lander.state.speed(),
                self.config.max_touchdown_speed,
            ))
        }
    }

    /// Flies until the lander reaches the ground, pulling one throttle
    /// command per tick from `source`.
    ///
    /// Gives up with `SimulationError::Timeout` once `max_ticks` have been
    /// flown in this run without touching down.
    pub fn run<S: ThrottleSource + ?Sized>(
        &mut self,
        source: &mut S,
        telemetry: &mut Telemetry,
    ) -> SimulationResult<RunSummary> {
        let mut status = self.status();
        while self.is_airborne() {
            if self.tick >= self.config.max_ticks {
                warn!("No touchdown after {} ticks, giving up", self.tick);
                return Err(SimulationError::Timeout(self.tick));
            }
            let throttle = source.next_throttle(&status);
            status = self.advance(throttle)?;
            telemetry.collect_data(&status);
        }

        let outcome = Outcome::classify(self.lander.state.speed(), self.config.max_touchdown_speed);
        info!(
            "Touchdown after {} ticks at {:.2} m/s: {:?}",
            self.tick, status.velocity, outcome
        );

        Ok(RunSummary {
            outcome,
            ticks: self.tick,
            touchdown: status,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn lander(&self) -> &Lander {
        &self.lander
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
