use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct FuelTank {
    max_fuel: f64,
    dry_mass: f64,
    current_fuel: f64,
}

impl FuelTank {
    // Tanks are always loaded full
    pub fn new(max_fuel: f64, dry_mass: f64) -> Self {
        FuelTank {
            max_fuel,
            dry_mass,
            current_fuel: max_fuel,
        }
    }

    /// Removes up to `amount` of propellant and returns what was actually drained.
    ///
    /// Running dry is not an error: the tank hands over whatever it still holds.
    /// A negative demand drains nothing.
    pub fn drain(&mut self, amount: f64) -> f64 {
        let drained = amount.min(self.current_fuel).max(0.0);
        self.current_fuel -= drained;
        debug!(
            "Tank drained {:.3} kg of {:.3} kg requested, {:.3} kg left",
            drained, amount, self.current_fuel
        );
        drained
    }

    pub fn is_empty(&self) -> bool {
        self.current_fuel <= 0.0
    }

    pub fn mass(&self) -> f64 {
        self.dry_mass + self.current_fuel
    }

    pub fn max_fuel(&self) -> f64 {
        self.max_fuel
    }

    pub fn dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn current_fuel(&self) -> f64 {
        self.current_fuel
    }
}
