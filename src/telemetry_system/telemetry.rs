use std::fmt;

use crate::control::lander::Lander;

/// Snapshot of the lander after a tick, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub tick: u64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub total_mass: f64,
    pub fuel_mass: f64,
    pub thrust: f64,
}

impl StatusReport {
    pub fn capture(lander: &Lander, tick: u64, thrust: f64) -> Self {
        StatusReport {
            tick,
            position: lander.state.position,
            velocity: lander.state.velocity,
            acceleration: lander.state.acceleration,
            total_mass: lander.total_mass(),
            fuel_mass: lander.fuel_mass(),
            thrust,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Height: {:.2} m", self.position)?;
        writeln!(f, "Velocity: {:.2} m/s", self.velocity)?;
        writeln!(f, "Acceleration: {:.2} m/s²", self.acceleration)?;
        writeln!(f, "Total mass: {:.2} kg", self.total_mass)?;
        write!(f, "Fuel mass: {:.2} kg", self.fuel_mass)
    }
}

pub struct Telemetry {
    pub log: Vec<StatusReport>,
    max_descent_speed: f64,
    max_acceleration: f64,
    min_fuel: f64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            max_descent_speed: 0.0,
            max_acceleration: 0.0,
            min_fuel: f64::MAX,
        }
    }

    pub fn collect_data(&mut self, report: &StatusReport) {
        let descent_speed = (-report.velocity).max(0.0);
        if descent_speed > self.max_descent_speed {
            self.max_descent_speed = descent_speed;
        }
        if report.acceleration.abs() > self.max_acceleration {
            self.max_acceleration = report.acceleration.abs();
        }
        if report.fuel_mass < self.min_fuel {
            self.min_fuel = report.fuel_mass;
        }
        self.log.push(*report);
    }

    pub fn max_descent_speed(&self) -> f64 {
        self.max_descent_speed
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn min_fuel(&self) -> Option<f64> {
        if self.log.is_empty() {
            None
        } else {
            Some(self.min_fuel)
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn summary(&self, delta_time: f64) -> String {
        let ticks = self.log.len();
        let mut summary = String::from("--- Descent Summary ---\n");
        summary.push_str(&format!(
            "Flight time: {} ({} ticks)\n",
            Self::format_time(ticks as f64 * delta_time),
            ticks
        ));
        summary.push_str(&format!(
            "Max descent speed: {:.2} m/s\n",
            self.max_descent_speed
        ));
        summary.push_str(&format!(
            "Max acceleration: {:.2} m/s²\n",
            self.max_acceleration
        ));
        match self.min_fuel() {
            Some(fuel) => summary.push_str(&format!("Min fuel mass: {:.2} kg", fuel)),
            None => summary.push_str("Min fuel mass: n/a"),
        }
        summary
    }
}
