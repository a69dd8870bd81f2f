//! Vehicle configurator core data models.
//!
//! This crate defines the catalog, the vehicle variants and the pricing
//! rules. It performs no I/O.

#![warn(missing_docs)]

// Catalog identities
mod id;

// Value types
mod engine;
mod equipment;

// Vehicles and pricing
mod vehicle;
mod snapshot;

// Inventory
mod catalog;

// Re-exports
pub use id::{VehicleId, EngineId, EquipmentId};

pub use engine::Engine;
pub use equipment::{Equipment, EquipmentCategory, EquipmentChange};
pub use vehicle::{Vehicle, VehicleKind, DEFAULT_COLOR};
pub use snapshot::{VehicleSnapshot, CategoryTotal};
pub use catalog::{Catalog, Group};
