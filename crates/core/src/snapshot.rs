//! Read-only snapshot of a configured vehicle.
//!
//! The snapshot resolves catalog references and precomputes every derived
//! price, so renderers and exporters never need the catalog themselves.

use serde::{Deserialize, Serialize};
use crate::catalog::Catalog;
use crate::engine::Engine;
use crate::equipment::{Equipment, EquipmentCategory};
use crate::vehicle::{Vehicle, VehicleKind};

/// Everything known about a configured vehicle at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: String,
    /// Paint color
    pub color: String,
    /// Variant-specific attributes
    pub kind: VehicleKind,
    /// Price without engine or equipment
    pub base_price: f64,

    /// Resolved engine, if installed
    pub engine: Option<Engine>,

    /// Selected equipment in insertion order
    pub equipment: Vec<Equipment>,

    /// Selected equipment grouped by category
    pub equipment_by_category: Vec<CategoryTotal>,

    /// Sum of equipment prices
    pub equipment_price: f64,

    /// Price before discount
    pub subtotal: f64,

    /// Discount percentage
    pub discount: f64,

    /// Discount in currency
    pub discount_amount: f64,

    /// Final price
    pub total_price: f64,
}

/// Equipment of one category with its subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Shared category of the items
    pub category: EquipmentCategory,
    /// Items in insertion order
    pub items: Vec<Equipment>,
    /// Sum of item prices
    pub total: f64,
    /// Share of the total equipment cost, in percent
    pub share: f64,
}

impl VehicleSnapshot {
    pub(crate) fn of(vehicle: &Vehicle, catalog: &Catalog) -> Self {
        let equipment = vehicle.equipment().to_vec();
        let equipment_price = vehicle.equipment_price();

        Self {
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
            color: vehicle.color.clone(),
            kind: vehicle.kind.clone(),
            base_price: vehicle.base_price,
            engine: vehicle.engine.and_then(|id| catalog.engine(id)).cloned(),
            equipment_by_category: group_by_category(&equipment, equipment_price),
            equipment,
            equipment_price,
            subtotal: vehicle.subtotal(catalog),
            discount: vehicle.discount,
            discount_amount: vehicle.discount_amount(catalog),
            total_price: vehicle.total_price(catalog),
        }
    }

    /// "Brand Model" label.
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

fn group_by_category(equipment: &[Equipment], equipment_price: f64) -> Vec<CategoryTotal> {
    EquipmentCategory::ALL
        .iter()
        .filter_map(|category| {
            let items: Vec<Equipment> = equipment
                .iter()
                .filter(|e| e.category == *category)
                .cloned()
                .collect();
            if items.is_empty() {
                return None;
            }
            let total: f64 = items.iter().map(|e| e.price).sum();
            let share = if equipment_price > 0.0 { total / equipment_price * 100.0 } else { 0.0 };
            Some(CategoryTotal { category: *category, items, total, share })
        })
        .collect()
}
