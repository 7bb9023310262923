use log::debug;

use super::{engine::Engine, fuel_tank::FuelTank};
use crate::errors::{SimulationError, SimulationResult};
use crate::trajectory_system::state_vector::{PositionIntegration, StateVector};

/// Descent vehicle: a cluster of engines sharing a set of fuel tanks.
///
/// The lander owns both lists. Engines refer to tanks by index, so the
/// draining order is fixed by `engine_cluster` order first and each engine's
/// feed order second.
#[derive(Debug, Clone)]
pub struct Lander {
    pub dry_mass: f64,
    pub state: StateVector,
    engine_cluster: Vec<Engine>,
    fuel_tanks: Vec<FuelTank>,
}

impl Lander {
    pub fn new(
        dry_mass: f64,
        engine_cluster: Vec<Engine>,
        fuel_tanks: Vec<FuelTank>,
        initial_state: StateVector,
    ) -> SimulationResult<Self> {
        for (engine_index, engine) in engine_cluster.iter().enumerate() {
            if let Some(&tank) = engine
                .feed_tanks()
                .iter()
                .find(|&&tank| tank >= fuel_tanks.len())
            {
                return Err(SimulationError::InitializationError(format!(
                    "engine {} is fed from tank {} but the lander has {} tanks",
                    engine_index,
                    tank,
                    fuel_tanks.len()
                )));
            }
        }

        let lander = Lander {
            dry_mass,
            state: initial_state,
            engine_cluster,
            fuel_tanks,
        };

        if !(lander.total_mass() > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "total mass must be positive, got {}",
                lander.total_mass()
            )));
        }

        Ok(lander)
    }

    /// Fires every engine for one step and integrates the state.
    ///
    /// `external_acceleration` seeds the acceleration (gravity, typically
    /// negative). Thrust divided by the post-burn mass is added on top.
    /// Returns the combined thrust of the cluster.
    pub fn burn(
        &mut self,
        throttle: f64,
        delta_time: f64,
        external_acceleration: f64,
        integration: PositionIntegration,
    ) -> f64 {
        let mut total_thrust = 0.0;
        for engine in &self.engine_cluster {
            total_thrust += engine.fire(throttle, delta_time, &mut self.fuel_tanks);
        }

        let total_mass = self.total_mass();
        self.state.acceleration = external_acceleration + total_thrust / total_mass;
        self.state = self.state.integrate(delta_time, integration);

        debug!(
            "Burn: throttle {:.3}, thrust {:.1} N, mass {:.1} kg, state {:?}",
            throttle, total_thrust, total_mass, self.state
        );

        total_thrust
    }

    pub fn total_mass(&self) -> f64 {
        let engines_mass: f64 = self.engine_cluster.iter().map(Engine::dry_mass).sum();
        self.dry_mass + engines_mass + self.fuel_mass()
    }

    // Includes the tanks' own dry mass
    pub fn fuel_mass(&self) -> f64 {
        self.fuel_tanks.iter().map(FuelTank::mass).sum()
    }

    pub fn is_airborne(&self) -> bool {
        self.state.is_airborne()
    }

    pub fn engine_cluster(&self) -> &[Engine] {
        &self.engine_cluster
    }

    pub fn fuel_tanks(&self) -> &[FuelTank] {
        &self.fuel_tanks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn create_test_lander() -> Lander {
        let tanks = vec![FuelTank::new(10_000.0, 3_000.0), FuelTank::new(5_000.0, 2_000.0)];
        let engines = vec![
            Engine::new(30.0, 0.0, 8_000.0, 8_000.0, vec![0, 1]).unwrap(),
            Engine::new(30.0, 0.0, 8_000.0, 8_000.0, vec![0, 1]).unwrap(),
        ];
        Lander::new(30_000.0, engines, tanks, StateVector::at_rest(1_000.0)).unwrap()
    }

    #[test]
    fn test_mass_aggregation() {
        let lander = create_test_lander();

        assert_abs_diff_eq!(lander.fuel_mass(), 20_000.0, epsilon = 1e-9); // 13000 + 7000
        assert_abs_diff_eq!(lander.total_mass(), 66_000.0, epsilon = 1e-9); // 30000 + 2 * 8000 + 20000
    }

    #[test]
    fn test_burn_without_thrust_is_free_fall() {
        // 1000 kg lander with an engine that can't produce anything
        let engine = Engine::new(0.0, 0.0, 1.0, 0.0, vec![0]).unwrap();
        let mut lander = Lander::new(
            1_000.0,
            vec![engine],
            vec![FuelTank::new(0.0, 0.0)],
            StateVector::at_rest(1_000.0),
        )
        .unwrap();
        assert_eq!(lander.total_mass(), 1_000.0);

        let thrust = lander.burn(0.0, 1.0, -1.62, PositionIntegration::Literal);

        assert_eq!(thrust, 0.0);
        assert_abs_diff_eq!(lander.state.acceleration, -1.62, epsilon = 1e-12);
        assert_abs_diff_eq!(lander.state.velocity, -1.62, epsilon = 1e-12);
        assert_abs_diff_eq!(lander.state.position, 998.38, epsilon = 1e-9);
    }

    #[test]
    fn test_burn_full_throttle() {
        let mut lander = create_test_lander();

        let thrust = lander.burn(1.0, 1.0, -1.62, PositionIntegration::Literal);

        // Both engines pull 30 kg from the main tank
        assert_abs_diff_eq!(thrust, 60.0 * 8_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lander.fuel_tanks()[0].current_fuel(), 9_940.0, epsilon = 1e-9);
        assert_eq!(lander.fuel_tanks()[1].current_fuel(), 5_000.0);

        let expected_acceleration = -1.62 + 480_000.0 / 65_940.0;
        assert_abs_diff_eq!(lander.state.acceleration, expected_acceleration, epsilon = 1e-9);
        assert_abs_diff_eq!(lander.state.velocity, expected_acceleration, epsilon = 1e-9);
        assert_abs_diff_eq!(
            lander.state.position,
            1_000.0 + expected_acceleration,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_engines_fire_in_cluster_order() {
        let tanks = vec![FuelTank::new(10.0, 0.0), FuelTank::new(10.0, 0.0)];
        let engines = vec![
            Engine::new(15.0, 0.0, 1.0, 0.0, vec![0, 1]).unwrap(),
            Engine::new(15.0, 0.0, 1.0, 0.0, vec![0, 1]).unwrap(),
        ];
        let mut lander = Lander::new(100.0, engines, tanks, StateVector::at_rest(10.0)).unwrap();

        let thrust = lander.burn(1.0, 1.0, 0.0, PositionIntegration::Literal);

        // First engine gets 15, second one only the 5 left over
        assert_abs_diff_eq!(thrust, 20.0, epsilon = 1e-9);
        assert!(lander.fuel_tanks().iter().all(FuelTank::is_empty));
    }

    #[test]
    fn test_mass_drops_as_fuel_burns() {
        let mut lander = create_test_lander();
        let before = lander.total_mass();

        lander.burn(0.5, 1.0, -1.62, PositionIntegration::Literal);

        assert_abs_diff_eq!(before - lander.total_mass(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_unknown_feed_tank() {
        let engine = Engine::new(1.0, 0.0, 1.0, 0.0, vec![0, 2]).unwrap();
        let result = Lander::new(
            100.0,
            vec![engine],
            vec![FuelTank::new(1.0, 1.0)],
            StateVector::at_rest(10.0),
        );
        assert!(matches!(result, Err(SimulationError::InitializationError(_))));
    }

    #[test]
    fn test_rejects_massless_lander() {
        let result = Lander::new(0.0, vec![], vec![], StateVector::at_rest(10.0));
        assert!(result.is_err());
    }
}
