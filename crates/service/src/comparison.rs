//! Side-by-side comparison of two configurations.

use serde::Serialize;
use vconf_core::{Catalog, Vehicle};

/// The compared facts of one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSide {
    /// "Brand Model"
    pub vehicle: String,
    /// Paint color
    pub color: String,
    /// Catalog base price
    pub base_price: f64,
    /// Whether an engine is installed
    pub has_engine: bool,
    /// Discounted total
    pub total_price: f64,
}

impl ComparisonSide {
    /// Capture the compared facts of a vehicle.
    pub fn of(vehicle: &Vehicle, catalog: &Catalog) -> Self {
        Self {
            vehicle: vehicle.label(),
            color: vehicle.color.clone(),
            base_price: vehicle.base_price,
            has_engine: vehicle.engine.is_some(),
            total_price: vehicle.total_price(catalog),
        }
    }
}

/// Current configuration versus the saved comparison snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Live configuration
    pub current: ComparisonSide,
    /// Comparison snapshot
    pub saved: ComparisonSide,
}

impl Comparison {
    /// Compare two vehicles.
    pub fn new(current: &Vehicle, saved: &Vehicle, catalog: &Catalog) -> Self {
        Self {
            current: ComparisonSide::of(current, catalog),
            saved: ComparisonSide::of(saved, catalog),
        }
    }

    /// Current total minus saved total. Positive when the current configuration is dearer.
    pub fn price_delta(&self) -> f64 {
        self.current.total_price - self.saved.total_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_sign() {
        let catalog = Catalog::standard();
        let golf = catalog.vehicles()[0].clone();
        let mut x5 = catalog.vehicles()[2].clone();
        x5.set_engine(catalog.find_engine("3.0 V6").unwrap().0);

        let cmp = Comparison::new(&golf, &x5, &catalog);
        assert_eq!(cmp.current.vehicle, "Volkswagen Golf");
        assert!(!cmp.current.has_engine);
        assert!(cmp.saved.has_engine);
        assert_eq!(cmp.price_delta(), 80000.0 - 285000.0);

        let cmp = Comparison::new(&x5, &golf, &catalog);
        assert_eq!(cmp.price_delta(), 205000.0);
    }

    #[test]
    fn test_engine_flag_ignores_equipment() {
        let catalog = Catalog::standard();
        let mut golf = catalog.vehicles()[0].clone();
        golf.add_equipment(catalog.equipment()[0].clone());
        let side = ComparisonSide::of(&golf, &catalog);
        assert!(!side.has_engine);
        assert_eq!(side.total_price, 85000.0);
    }
}
