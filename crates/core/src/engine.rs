//! Engine model.

use serde::{Deserialize, Serialize};

/// An engine that can be installed in a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    /// Unique name
    pub name: String,

    /// Displacement in liters
    pub capacity: f64,

    /// Power output
    pub horse_power: u32,

    /// Fuel type (Gasoline, Diesel, Electric, Hybrid)
    pub fuel_type: String,

    /// Price
    pub price: f64,

    /// CO2 emissions in g/km
    pub co2_emissions: u32,

    /// Fuel consumption in l/100km
    pub fuel_consumption: f64,
}

impl Engine {
    /// Create a new engine.
    pub fn new(
        name: impl Into<String>,
        capacity: f64,
        horse_power: u32,
        fuel_type: impl Into<String>,
        price: f64,
        co2_emissions: u32,
        fuel_consumption: f64,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            horse_power,
            fuel_type: fuel_type.into(),
            price,
            co2_emissions,
            fuel_consumption,
        }
    }
}
