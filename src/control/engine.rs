use log::{debug, warn};

use super::fuel_tank::FuelTank;
use crate::errors::{SimulationError, SimulationResult};

/// A throttleable engine fed from lander-owned tanks.
///
/// The engine never owns propellant. `feed_tanks` holds indices into the
/// lander's tank list, in the order the tanks are drained. Several engines
/// may list the same tanks.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    max_mass_flow: f64,
    min_mass_flow: f64,
    exhaust_velocity: f64,
    dry_mass: f64,
    feed_tanks: Vec<usize>,
}

impl Engine {
    pub fn new(
        max_mass_flow: f64,
        min_mass_flow: f64,
        exhaust_velocity: f64,
        dry_mass: f64,
        feed_tanks: Vec<usize>,
    ) -> SimulationResult<Self> {
        if !(min_mass_flow >= 0.0 && max_mass_flow >= min_mass_flow) {
            return Err(SimulationError::InitializationError(format!(
                "engine mass flow range [{}, {}] is invalid",
                min_mass_flow, max_mass_flow
            )));
        }
        if !(exhaust_velocity > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "engine exhaust velocity must be positive, got {}",
                exhaust_velocity
            )));
        }
        if !(dry_mass >= 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "engine dry mass must not be negative, got {}",
                dry_mass
            )));
        }

        Ok(Engine {
            max_mass_flow,
            min_mass_flow,
            exhaust_velocity,
            dry_mass,
            feed_tanks,
        })
    }

    // Propellant requested for one step, before looking at the tanks
    pub fn desired_mass_flow(&self, throttle: f64, delta_time: f64) -> f64 {
        (self.min_mass_flow + (self.max_mass_flow - self.min_mass_flow) * throttle) * delta_time
    }

    /// Burns for one step and returns the thrust produced.
    ///
    /// Tanks are drained in feed order. After each tank the outstanding demand
    /// is recomputed as the full demand minus everything drained so far,
    /// and the loop stops as soon as nothing is outstanding.
    pub fn fire(&self, throttle: f64, delta_time: f64, tanks: &mut [FuelTank]) -> f64 {
        let desired_mass_flow = self.desired_mass_flow(throttle, delta_time);
        debug!("Desired mass flow: {:.3} kg", desired_mass_flow);

        let mut actual_mass_flow = 0.0;
        let mut remaining = desired_mass_flow;
        for &index in &self.feed_tanks {
            if let Some(tank) = tanks.get_mut(index) {
                actual_mass_flow += tank.drain(remaining);
                remaining = desired_mass_flow - actual_mass_flow;
                if remaining <= 0.0 {
                    break;
                }
            }
        }

        if remaining > 0.0 && desired_mass_flow > 0.0 {
            warn!(
                "Engine starved: got {:.3} kg of {:.3} kg requested",
                actual_mass_flow, desired_mass_flow
            );
        }

        actual_mass_flow * self.exhaust_velocity
    }

    pub fn max_mass_flow(&self) -> f64 {
        self.max_mass_flow
    }

    pub fn min_mass_flow(&self) -> f64 {
        self.min_mass_flow
    }

    pub fn exhaust_velocity(&self) -> f64 {
        self.exhaust_velocity
    }

    pub fn dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn feed_tanks(&self) -> &[usize] {
        &self.feed_tanks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn create_test_engine(feed_tanks: Vec<usize>) -> Engine {
        Engine::new(30.0, 0.0, 8_000.0, 8_000.0, feed_tanks).unwrap()
    }

    #[test]
    fn test_desired_mass_flow_interpolates_throttle() {
        let engine = Engine::new(30.0, 10.0, 1_000.0, 0.0, vec![]).unwrap();
        assert_abs_diff_eq!(engine.desired_mass_flow(0.0, 1.0), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(engine.desired_mass_flow(0.5, 1.0), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(engine.desired_mass_flow(1.0, 2.0), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fire_with_ample_fuel() {
        let engine = create_test_engine(vec![0]);
        let mut tanks = vec![FuelTank::new(1_000.0, 100.0)];

        let thrust = engine.fire(0.5, 1.0, &mut tanks);

        assert_abs_diff_eq!(thrust, 15.0 * 8_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tanks[0].current_fuel(), 985.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fire_drains_tanks_in_feed_order() {
        let engine = Engine::new(15.0, 0.0, 100.0, 0.0, vec![0, 1]).unwrap();
        let mut tanks = vec![FuelTank::new(10.0, 1.0), FuelTank::new(10.0, 1.0)];

        let thrust = engine.fire(1.0, 1.0, &mut tanks);

        assert_abs_diff_eq!(tanks[0].current_fuel(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tanks[1].current_fuel(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(thrust, 1_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fire_respects_custom_feed_order() {
        let engine = Engine::new(15.0, 0.0, 100.0, 0.0, vec![1, 0]).unwrap();
        let mut tanks = vec![FuelTank::new(10.0, 1.0), FuelTank::new(10.0, 1.0)];

        engine.fire(1.0, 1.0, &mut tanks);

        assert_abs_diff_eq!(tanks[0].current_fuel(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tanks[1].current_fuel(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fire_chains_three_tanks_against_full_demand() {
        let engine = Engine::new(10.0, 0.0, 1.0, 0.0, vec![0, 1, 2]).unwrap();
        let mut tanks = vec![
            FuelTank::new(3.0, 0.0),
            FuelTank::new(3.0, 0.0),
            FuelTank::new(10.0, 0.0),
        ];

        let thrust = engine.fire(1.0, 1.0, &mut tanks);

        // 3 + 3 from the first two, the last one covers the outstanding 4
        assert_abs_diff_eq!(thrust, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tanks[2].current_fuel(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fire_stops_once_demand_is_met() {
        let engine = Engine::new(5.0, 0.0, 1.0, 0.0, vec![0, 1]).unwrap();
        let mut tanks = vec![FuelTank::new(10.0, 0.0), FuelTank::new(10.0, 0.0)];

        engine.fire(1.0, 1.0, &mut tanks);

        assert_abs_diff_eq!(tanks[0].current_fuel(), 5.0, epsilon = 1e-9);
        assert_eq!(tanks[1].current_fuel(), 10.0);
    }

    #[test]
    fn test_fire_out_of_fuel() {
        let engine = create_test_engine(vec![0, 1]);
        let mut tanks = vec![FuelTank::new(4.0, 1.0), FuelTank::new(6.0, 1.0)];

        let thrust = engine.fire(1.0, 1.0, &mut tanks);

        assert_abs_diff_eq!(thrust, 10.0 * 8_000.0, epsilon = 1e-6);
        assert!(tanks.iter().all(FuelTank::is_empty));
        assert_eq!(engine.fire(1.0, 1.0, &mut tanks), 0.0);
    }

    #[test]
    fn test_zero_throttle_produces_no_thrust() {
        let engine = create_test_engine(vec![0]);
        let mut tanks = vec![FuelTank::new(100.0, 1.0)];

        assert_eq!(engine.fire(0.0, 1.0, &mut tanks), 0.0);
        assert_eq!(tanks[0].current_fuel(), 100.0);
    }

    #[test]
    fn test_negative_throttle_is_not_rejected() {
        let engine = create_test_engine(vec![0]);
        let mut tanks = vec![FuelTank::new(100.0, 1.0)];

        assert_abs_diff_eq!(engine.desired_mass_flow(-0.5, 1.0), -15.0, epsilon = 1e-9);
        assert_eq!(engine.fire(-0.5, 1.0, &mut tanks), 0.0);
        assert_eq!(tanks[0].current_fuel(), 100.0);
    }

    #[test]
    fn test_invalid_engine_parameters() {
        assert!(Engine::new(5.0, 10.0, 1.0, 0.0, vec![]).is_err());
        assert!(Engine::new(5.0, -1.0, 1.0, 0.0, vec![]).is_err());
        assert!(Engine::new(5.0, 0.0, 0.0, 0.0, vec![]).is_err());
        assert!(Engine::new(5.0, 0.0, 1.0, -1.0, vec![]).is_err());
    }
}
