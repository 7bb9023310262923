pub mod engine;
pub mod fuel_tank;
pub mod lander;
pub mod mission;
pub mod throttle;
