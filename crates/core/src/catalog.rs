//! Catalog - the fixed inventory of vehicles, engines, equipment and colors.
//!
//! Built once and never mutated. Lookups are linear scans; the tables are tiny.

use std::collections::BTreeMap;
use crate::engine::Engine;
use crate::equipment::{Equipment, EquipmentCategory};
use crate::id::{EngineId, EquipmentId, VehicleId};
use crate::vehicle::Vehicle;

/// A named group of catalog entries, each paired with its identifier.
#[derive(Debug, Clone)]
pub struct Group<'a, Id, T> {
    /// Group heading
    pub label: String,
    /// Entries in catalog order
    pub entries: Vec<(Id, &'a T)>,
}

/// Immutable inventory.
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
    engines: Vec<Engine>,
    equipment: Vec<Equipment>,
    colors: Vec<String>,
}

impl Catalog {
    /// Build a catalog from explicit tables.
    pub fn new(
        vehicles: Vec<Vehicle>,
        engines: Vec<Engine>,
        equipment: Vec<Equipment>,
        colors: Vec<String>,
    ) -> Self {
        Self { vehicles, engines, equipment, colors }
    }

    /// The standard showroom inventory.
    pub fn standard() -> Self {
        use EquipmentCategory::*;

        let colors = [
            "White", "Black", "Red", "Blue", "Silver",
            "Green", "Yellow", "Orange", "Purple", "Brown",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let engines = vec![
            Engine::new("1.4 TSI", 1.4, 150, "Gasoline", 12000.0, 130, 6.5),
            Engine::new("1.6 TDI", 1.6, 115, "Diesel", 15000.0, 110, 4.8),
            Engine::new("2.0 TDI", 2.0, 190, "Diesel", 20000.0, 135, 5.2),
            Engine::new("2.0 TSI", 2.0, 220, "Gasoline", 22000.0, 155, 7.1),
            Engine::new("Electric Motor", 0.0, 204, "Electric", 30000.0, 0, 0.0),
            Engine::new("Hybrid 1.8", 1.8, 180, "Hybrid", 25000.0, 95, 4.2),
            Engine::new("3.0 V6", 3.0, 340, "Gasoline", 35000.0, 190, 9.8),
            Engine::new("650cc Twin", 0.65, 75, "Gasoline", 8000.0, 90, 3.8),
        ];

        let equipment = vec![
            Equipment::new("Leather upholstery", "High-quality leather upholstery", 5000.0, Comfort),
            Equipment::new("Navigation system", "Advanced GPS navigation system", 3000.0, Multimedia),
            Equipment::new("Panoramic roof", "Glass panoramic roof", 7000.0, Exterior),
            Equipment::new("Heated seats", "Heated front seats", 2000.0, Comfort),
            Equipment::new("Premium audio system", "Audio system with 12 speakers", 4500.0, Multimedia),
            Equipment::new("Parking assistant", "Automatic parking assistant", 3500.0, Safety),
            Equipment::new("Adaptive cruise control", "Cruise control with adaptive function", 4000.0, Safety),
            Equipment::new("Backup camera", "HD camera with 360-degree view", 2500.0, Safety),
            Equipment::new("Sport suspension", "Lowered sport suspension", 3800.0, Performance),
            Equipment::new("Alloy wheels 19\"", "19-inch alloy wheels", 4200.0, Exterior),
            Equipment::new("LED headlights", "Full LED headlights with dynamic turn signals", 3200.0, Exterior),
            Equipment::new("Sport exhaust", "Sport exhaust system with enhanced sound", 5500.0, Performance),
            Equipment::new("Wireless charging", "Wireless phone charging pad", 800.0, Multimedia),
            Equipment::new("Head-up display", "Information projected onto windshield", 2800.0, Multimedia),
            Equipment::new("Keyless entry", "Keyless entry and start system", 1500.0, Comfort),
        ];

        let vehicles = vec![
            Vehicle::car("Volkswagen", "Golf", 80000.0, 5, "Hatchback", 380),
            Vehicle::car("Audi", "A4", 150000.0, 4, "Sedan", 480),
            Vehicle::car("BMW", "X5", 250000.0, 5, "SUV", 650),
            Vehicle::car("Toyota", "Corolla", 90000.0, 4, "Sedan", 470),
            Vehicle::car("Mercedes-Benz", "C-Class", 170000.0, 4, "Sedan", 455),
            Vehicle::car("Ford", "Mustang", 220000.0, 2, "Coupe", 408),
            Vehicle::motorcycle("Yamaha", "MT-07", 35000.0, "Naked", 689),
            Vehicle::motorcycle("Honda", "CBR650R", 42000.0, "Sport", 649),
            Vehicle::motorcycle("Harley-Davidson", "Fat Boy", 85000.0, "Cruiser", 1868),
            Vehicle::electric("Tesla", "Model 3", 180000.0, 75, 560, 30),
            Vehicle::electric("Nissan", "Leaf", 120000.0, 62, 385, 40),
        ];

        Self::new(vehicles, engines, equipment, colors)
    }

    // === Tables ===

    /// All vehicle templates in catalog order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// All engines in catalog order.
    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    /// All equipment options in catalog order.
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// All paint colors.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    // === Lookup by identifier ===

    /// Vehicle template by id.
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    /// Engine by id.
    pub fn engine(&self, id: EngineId) -> Option<&Engine> {
        self.engines.get(id.index())
    }

    /// Equipment item by id.
    pub fn equipment_item(&self, id: EquipmentId) -> Option<&Equipment> {
        self.equipment.get(id.index())
    }

    /// Color by 1-based menu choice.
    pub fn color_by_choice(&self, choice: usize) -> Option<&str> {
        choice
            .checked_sub(1)
            .and_then(|i| self.colors.get(i))
            .map(String::as_str)
    }

    // === Lookup by name ===

    /// Find a vehicle template by brand and model.
    pub fn find_vehicle(&self, brand: &str, model: &str) -> Option<(VehicleId, &Vehicle)> {
        self.vehicles
            .iter()
            .position(|v| v.is(brand, model))
            .map(|i| (VehicleId::from_index(i), &self.vehicles[i]))
    }

    /// Find an engine by name.
    pub fn find_engine(&self, name: &str) -> Option<(EngineId, &Engine)> {
        self.engines
            .iter()
            .position(|e| e.name == name)
            .map(|i| (EngineId::from_index(i), &self.engines[i]))
    }

    /// Find an equipment option by name.
    pub fn find_equipment(&self, name: &str) -> Option<(EquipmentId, &Equipment)> {
        self.equipment
            .iter()
            .position(|e| e.name == name)
            .map(|i| (EquipmentId::from_index(i), &self.equipment[i]))
    }

    // === Grouped views ===

    /// Vehicles grouped by variant, groups in order of first appearance.
    pub fn vehicles_by_kind(&self) -> Vec<Group<'_, VehicleId, Vehicle>> {
        let mut groups: Vec<Group<'_, VehicleId, Vehicle>> = Vec::new();
        for (i, vehicle) in self.vehicles.iter().enumerate() {
            let label = vehicle.kind.group_label();
            let entry = (VehicleId::from_index(i), vehicle);
            match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => group.entries.push(entry),
                None => groups.push(Group { label: label.to_string(), entries: vec![entry] }),
            }
        }
        groups
    }

    /// Engines grouped by fuel type, groups sorted by name.
    pub fn engines_by_fuel(&self) -> Vec<Group<'_, EngineId, Engine>> {
        let mut map: BTreeMap<&str, Vec<(EngineId, &Engine)>> = BTreeMap::new();
        for (i, engine) in self.engines.iter().enumerate() {
            map.entry(engine.fuel_type.as_str())
                .or_default()
                .push((EngineId::from_index(i), engine));
        }
        map.into_iter()
            .map(|(label, entries)| Group { label: label.to_string(), entries })
            .collect()
    }

    /// Equipment grouped by category, in category order. Empty categories are skipped.
    pub fn equipment_by_category(&self) -> Vec<Group<'_, EquipmentId, Equipment>> {
        EquipmentCategory::ALL
            .iter()
            .filter_map(|category| {
                let entries: Vec<_> = self
                    .equipment
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.category == *category)
                    .map(|(i, e)| (EquipmentId::from_index(i), e))
                    .collect();
                (!entries.is_empty()).then(|| Group { label: category.label().to_string(), entries })
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
