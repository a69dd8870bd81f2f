//! Exportable configuration report.

use serde::Serialize;
use vconf_core::{Vehicle, VehicleSnapshot};

/// Report document written by `generate_report`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Heading, e.g. "Volkswagen Golf (2023)"
    pub title: String,
    /// Local timestamp
    pub generated_at: String,
    /// Full configuration
    pub configuration: VehicleSnapshot,
}

/// File stem for a vehicle's report: `Brand_Model_report`.
pub fn report_stem(vehicle: &Vehicle) -> String {
    let raw = format!("{}_{}_report", vehicle.brand, vehicle.model);
    raw.chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect()
}
