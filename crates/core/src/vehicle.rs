//! Vehicle model - a catalog template plus the customizations applied to it.

use serde::{Deserialize, Serialize};
use crate::catalog::Catalog;
use crate::equipment::{Equipment, EquipmentChange};
use crate::id::EngineId;
use crate::snapshot::VehicleSnapshot;

/// Color every vehicle starts with.
pub const DEFAULT_COLOR: &str = "White";

/// A vehicle and its current configuration.
///
/// Catalog templates and live configurations share this type: selecting a
/// vehicle clones the template, and all customization happens on the clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Manufacturer
    pub brand: String,

    /// Model name
    pub model: String,

    /// Model year
    pub year: String,

    /// Price without engine, equipment and discount
    pub base_price: f64,

    /// Paint color
    pub color: String,

    /// Discount percentage, applied to the grand total
    pub discount: f64,

    /// Installed engine
    pub engine: Option<EngineId>,

    /// Selected equipment in insertion order, unique by name
    equipment: Vec<Equipment>,

    /// Variant-specific attributes
    pub kind: VehicleKind,
}

/// The closed set of vehicle variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VehicleKind {
    /// Passenger car
    Car {
        /// Number of doors
        doors: u8,
        /// Sedan, Hatchback, SUV, ...
        body_type: String,
        /// Trunk capacity in liters, 0 if unknown
        trunk_capacity: u32,
    },
    /// Motorcycle
    Motorcycle {
        /// Naked, Sport, Cruiser, ...
        style: String,
        /// Engine displacement in cc, 0 if unknown
        displacement: u32,
    },
    /// Battery electric vehicle
    Electric {
        /// kWh
        battery_capacity: u32,
        /// km
        range: u32,
        /// Fast charging time in minutes
        charging_time: u32,
    },
}

impl VehicleKind {
    /// Group label used when listing the catalog.
    pub fn group_label(&self) -> &'static str {
        match self {
            VehicleKind::Car { .. } => "Cars",
            VehicleKind::Motorcycle { .. } => "Motorcycles",
            VehicleKind::Electric { .. } => "Electric Vehicles",
        }
    }
}

impl Vehicle {
    /// Create a vehicle with default color, no engine, no equipment and no discount.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        base_price: f64,
        year: impl Into<String>,
        kind: VehicleKind,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            year: year.into(),
            base_price,
            color: DEFAULT_COLOR.to_string(),
            discount: 0.0,
            engine: None,
            equipment: Vec::new(),
            kind,
        }
    }

    /// Create a car.
    pub fn car(
        brand: impl Into<String>,
        model: impl Into<String>,
        base_price: f64,
        doors: u8,
        body_type: impl Into<String>,
        trunk_capacity: u32,
    ) -> Self {
        Self::new(brand, model, base_price, "2023", VehicleKind::Car {
            doors,
            body_type: body_type.into(),
            trunk_capacity,
        })
    }

    /// Create a motorcycle.
    pub fn motorcycle(
        brand: impl Into<String>,
        model: impl Into<String>,
        base_price: f64,
        style: impl Into<String>,
        displacement: u32,
    ) -> Self {
        Self::new(brand, model, base_price, "2023", VehicleKind::Motorcycle {
            style: style.into(),
            displacement,
        })
    }

    /// Create an electric vehicle.
    pub fn electric(
        brand: impl Into<String>,
        model: impl Into<String>,
        base_price: f64,
        battery_capacity: u32,
        range: u32,
        charging_time: u32,
    ) -> Self {
        Self::new(brand, model, base_price, "2023", VehicleKind::Electric {
            battery_capacity,
            range,
            charging_time,
        })
    }

    /// "Brand Model" label.
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Whether this vehicle is the catalog entry `brand` + `model`.
    pub fn is(&self, brand: &str, model: &str) -> bool {
        self.brand == brand && self.model == model
    }

    /// Selected equipment in insertion order.
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// Whether an item with this name is selected.
    pub fn has_equipment(&self, name: &str) -> bool {
        self.equipment.iter().any(|e| e.name == name)
    }

    /// Add an equipment item unless one with the same name is already present.
    pub fn add_equipment(&mut self, item: Equipment) -> EquipmentChange {
        if self.has_equipment(&item.name) {
            return EquipmentChange::AlreadyPresent;
        }
        self.equipment.push(item);
        EquipmentChange::Added
    }

    /// Remove an equipment item by name.
    pub fn remove_equipment(&mut self, name: &str) -> EquipmentChange {
        match self.equipment.iter().position(|e| e.name == name) {
            Some(pos) => {
                self.equipment.remove(pos);
                EquipmentChange::Removed
            }
            None => EquipmentChange::NotFound,
        }
    }

    /// Install an engine, replacing any previous one.
    pub fn set_engine(&mut self, engine: EngineId) {
        self.engine = Some(engine);
    }

    /// Repaint.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Set the discount percentage. Range policy is enforced by callers.
    pub fn set_discount(&mut self, percent: f64) {
        self.discount = percent;
    }

    /// Price of the installed engine, or 0.
    pub fn engine_price(&self, catalog: &Catalog) -> f64 {
        self.engine
            .and_then(|id| catalog.engine(id))
            .map(|e| e.price)
            .unwrap_or(0.0)
    }

    /// Sum of all selected equipment prices.
    pub fn equipment_price(&self) -> f64 {
        self.equipment.iter().map(|e| e.price).sum()
    }

    /// Base price plus engine plus equipment, before discount.
    pub fn subtotal(&self, catalog: &Catalog) -> f64 {
        self.base_price + self.engine_price(catalog) + self.equipment_price()
    }

    /// Amount taken off the subtotal by the discount.
    pub fn discount_amount(&self, catalog: &Catalog) -> f64 {
        if self.discount > 0.0 {
            self.subtotal(catalog) * (self.discount / 100.0)
        } else {
            0.0
        }
    }

    /// Total price. Always recomputed.
    pub fn total_price(&self, catalog: &Catalog) -> f64 {
        let subtotal = self.subtotal(catalog);
        if self.discount > 0.0 {
            subtotal * (1.0 - self.discount / 100.0)
        } else {
            subtotal
        }
    }

    /// Read-only snapshot of every field plus computed prices.
    pub fn describe(&self, catalog: &Catalog) -> VehicleSnapshot {
        VehicleSnapshot::of(self, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::EquipmentCategory;

    fn item(name: &str, price: f64) -> Equipment {
        Equipment::new(name, "test item", price, EquipmentCategory::Comfort)
    }

    #[test]
    fn test_new_vehicle_defaults() {
        let v = Vehicle::car("Audi", "A4", 150000.0, 4, "Sedan", 480);
        assert_eq!(v.color, "White");
        assert_eq!(v.discount, 0.0);
        assert!(v.engine.is_none());
        assert!(v.equipment().is_empty());
        assert_eq!(v.label(), "Audi A4");
    }

    #[test]
    fn test_add_equipment_is_idempotent() {
        let mut v = Vehicle::car("Audi", "A4", 150000.0, 4, "Sedan", 480);
        assert_eq!(v.add_equipment(item("Heated seats", 2000.0)), EquipmentChange::Added);
        assert_eq!(v.add_equipment(item("Heated seats", 2000.0)), EquipmentChange::AlreadyPresent);
        assert_eq!(v.equipment().len(), 1);
    }

    #[test]
    fn test_duplicate_is_detected_by_name_only() {
        let mut v = Vehicle::car("Audi", "A4", 150000.0, 4, "Sedan", 480);
        v.add_equipment(item("Heated seats", 2000.0));
        assert_eq!(v.add_equipment(item("Heated seats", 9999.0)), EquipmentChange::AlreadyPresent);
        assert_eq!(v.equipment_price(), 2000.0);
    }

    #[test]
    fn test_remove_missing_equipment_is_noop() {
        let mut v = Vehicle::car("Audi", "A4", 150000.0, 4, "Sedan", 480);
        v.add_equipment(item("Heated seats", 2000.0));
        assert_eq!(v.remove_equipment("Sunroof"), EquipmentChange::NotFound);
        assert_eq!(v.equipment().len(), 1);
        assert_eq!(v.remove_equipment("Heated seats"), EquipmentChange::Removed);
        assert!(v.equipment().is_empty());
    }

    #[test]
    fn test_equipment_keeps_insertion_order() {
        let mut v = Vehicle::motorcycle("Yamaha", "MT-07", 35000.0, "Naked", 689);
        v.add_equipment(item("B", 1.0));
        v.add_equipment(item("A", 1.0));
        v.add_equipment(item("C", 1.0));
        v.remove_equipment("A");
        let names: Vec<_> = v.equipment().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_total_price_without_engine() {
        let catalog = Catalog::standard();
        let mut v = Vehicle::electric("Tesla", "Model 3", 180000.0, 75, 560, 30);
        v.add_equipment(item("X", 1000.0));
        v.add_equipment(item("Y", 500.0));
        assert_eq!(v.total_price(&catalog), 181500.0);
    }

    #[test]
    fn test_discount_applies_to_grand_total() {
        let catalog = Catalog::standard();
        let mut v = Vehicle::car("Volkswagen", "Golf", 80000.0, 5, "Hatchback", 380);
        let (engine_id, engine) = catalog.find_engine("1.4 TSI").unwrap();
        assert_eq!(engine.price, 12000.0);
        v.set_engine(engine_id);
        v.add_equipment(item("Leather upholstery", 5000.0));
        v.set_discount(10.0);

        assert_eq!(v.subtotal(&catalog), 97000.0);
        assert!((v.total_price(&catalog) - 87300.0).abs() < 1e-6);
        assert!((v.discount_amount(&catalog) - 9700.0).abs() < 1e-6);
        // Component prices are untouched by the discount
        assert_eq!(v.base_price, 80000.0);
        assert_eq!(v.equipment()[0].price, 5000.0);
    }

    #[test]
    fn test_zero_discount_leaves_total_unchanged() {
        let catalog = Catalog::standard();
        let v = Vehicle::car("Ford", "Mustang", 220000.0, 2, "Coupe", 408);
        assert_eq!(v.total_price(&catalog), 220000.0);
        assert_eq!(v.discount_amount(&catalog), 0.0);
    }

    #[test]
    fn test_group_labels() {
        assert_eq!(Vehicle::car("a", "b", 0.0, 4, "Sedan", 0).kind.group_label(), "Cars");
        assert_eq!(Vehicle::motorcycle("a", "b", 0.0, "Sport", 0).kind.group_label(), "Motorcycles");
        assert_eq!(Vehicle::electric("a", "b", 0.0, 1, 1, 1).kind.group_label(), "Electric Vehicles");
    }
}
