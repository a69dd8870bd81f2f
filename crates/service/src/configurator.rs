//! The configuration session.
//!
//! A [`Configurator`] owns the catalog, the live configuration, the
//! comparison snapshot and a storage backend. Every operation either
//! succeeds or leaves the session untouched.
//!
//! ```text
//! NoVehicle ──select_vehicle / load──▶ VehicleSelected ◀─┐
//!                                          │  engine, equipment,
//!                                          └──color, discount ─┘
//! ```

use std::path::PathBuf;
use chrono::Local;
use tracing::{debug, info, warn};
use vconf_core::{
    Catalog, CategoryTotal, Engine, EngineId, Equipment, EquipmentChange, EquipmentId,
    Vehicle, VehicleId, VehicleSnapshot,
};
use vconf_storage::{ConfigRecord, ConfigStore, DATE_FORMAT};
use crate::comparison::Comparison;
use crate::error::{ConfigError, Precondition, Result};
use crate::report::{report_stem, Report};

/// Configuration for the configurator.
#[derive(Debug, Clone)]
pub struct ConfiguratorConfig {
    /// Highest discount percentage the session accepts
    pub max_discount: f64,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self { max_discount: 30.0 }
    }
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing to customize yet
    NoVehicle,
    /// A live configuration exists
    VehicleSelected,
}

/// Catalog entry named by a saved file but absent from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// Engine name
    Engine(String),
    /// Equipment name
    Equipment(String),
    /// Equipment listed more than once in the file
    DuplicateEquipment(String),
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skipped::Engine(name) => write!(f, "No matching engine found: {name}"),
            Skipped::Equipment(name) => write!(f, "No matching equipment found: {name}"),
            Skipped::DuplicateEquipment(name) => write!(f, "Duplicate equipment ignored: {name}"),
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// File that was read
    pub path: PathBuf,
    /// Loaded vehicle label
    pub vehicle: String,
    /// Entries that could not be restored
    pub skipped: Vec<Skipped>,
}

/// An interactive configuration session.
pub struct Configurator<S: ConfigStore> {
    catalog: Catalog,
    storage: S,
    config: ConfiguratorConfig,
    current: Option<Vehicle>,
    comparison: Option<Vehicle>,
}

impl<S: ConfigStore> Configurator<S> {
    /// Create a session with nothing selected.
    pub fn new(catalog: Catalog, storage: S) -> Self {
        Self {
            catalog,
            storage,
            config: ConfiguratorConfig::default(),
            current: None,
            comparison: None,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ConfiguratorConfig) -> Self {
        self.config = config;
        self
    }

    // === Accessors ===

    /// The inventory this session selects from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Active configuration.
    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    /// The live configuration.
    pub fn current(&self) -> Option<&Vehicle> {
        self.current.as_ref()
    }

    /// The comparison snapshot.
    pub fn comparison(&self) -> Option<&Vehicle> {
        self.comparison.as_ref()
    }

    /// Whether a vehicle is selected.
    pub fn has_selected_vehicle(&self) -> bool {
        self.current.is_some()
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::VehicleSelected
        } else {
            SessionState::NoVehicle
        }
    }

    fn vehicle(&self) -> Result<&Vehicle> {
        self.current
            .as_ref()
            .ok_or(ConfigError::PreconditionUnmet(Precondition::NoVehicle))
    }

    fn vehicle_mut(&mut self) -> Result<&mut Vehicle> {
        self.current
            .as_mut()
            .ok_or(ConfigError::PreconditionUnmet(Precondition::NoVehicle))
    }

    // === Selection ===

    /// Select a catalog vehicle by 1-based choice, discarding the current configuration.
    pub fn select_vehicle(&mut self, choice: usize) -> Result<&Vehicle> {
        let max = self.catalog.vehicles().len();
        let template = VehicleId::from_choice(choice)
            .and_then(|id| self.catalog.vehicle(id))
            .ok_or(ConfigError::InvalidSelection { what: "vehicle", index: choice, max })?;

        debug!(vehicle = %template.label(), "Selected vehicle");
        Ok(self.current.insert(template.clone()))
    }

    /// Install a catalog engine by 1-based choice.
    pub fn select_engine(&mut self, choice: usize) -> Result<&Engine> {
        self.vehicle()?;
        let max = self.catalog.engines().len();
        let id = EngineId::from_choice(choice)
            .filter(|id| id.index() < max)
            .ok_or(ConfigError::InvalidSelection { what: "engine", index: choice, max })?;

        self.vehicle_mut()?.set_engine(id);
        let engine = &self.catalog.engines()[id.index()];
        debug!(engine = %engine.name, "Installed engine");
        Ok(engine)
    }

    /// Add catalog equipment by 1-based choice. Duplicates are reported, not rejected.
    pub fn add_equipment(&mut self, choice: usize) -> Result<(EquipmentChange, Equipment)> {
        self.vehicle()?;
        let max = self.catalog.equipment().len();
        let item = EquipmentId::from_choice(choice)
            .and_then(|id| self.catalog.equipment_item(id))
            .cloned()
            .ok_or(ConfigError::InvalidSelection { what: "equipment", index: choice, max })?;

        let change = self.vehicle_mut()?.add_equipment(item.clone());
        debug!(equipment = %item.name, ?change, "Add equipment");
        Ok((change, item))
    }

    /// Remove equipment by 1-based position in the current equipment list.
    pub fn remove_equipment_by_choice(&mut self, choice: usize) -> Result<(EquipmentChange, Equipment)> {
        let selected = self.vehicle()?.equipment();
        if selected.is_empty() {
            return Err(ConfigError::PreconditionUnmet(Precondition::NoEquipment));
        }
        let max = selected.len();
        let item = choice
            .checked_sub(1)
            .and_then(|i| selected.get(i))
            .cloned()
            .ok_or(ConfigError::InvalidSelection { what: "equipment", index: choice, max })?;

        let change = self.vehicle_mut()?.remove_equipment(&item.name);
        debug!(equipment = %item.name, ?change, "Remove equipment");
        Ok((change, item))
    }

    /// Remove equipment by name. Absence is reported, not rejected.
    pub fn remove_equipment(&mut self, name: &str) -> Result<EquipmentChange> {
        Ok(self.vehicle_mut()?.remove_equipment(name))
    }

    /// Paint with a catalog color by 1-based choice.
    pub fn select_color(&mut self, choice: usize) -> Result<&str> {
        self.vehicle()?;
        let max = self.catalog.colors().len();
        let color = self
            .catalog
            .color_by_choice(choice)
            .ok_or(ConfigError::InvalidSelection { what: "color", index: choice, max })?
            .to_string();

        self.vehicle_mut()?.set_color(color);
        Ok(self.vehicle()?.color.as_str())
    }

    /// Apply a discount within `0..=max_discount`.
    pub fn apply_discount(&mut self, percent: f64) -> Result<()> {
        self.vehicle()?;
        let max = self.config.max_discount;
        if !percent.is_finite() || !(0.0..=max).contains(&percent) {
            return Err(ConfigError::DiscountOutOfRange { percent, max });
        }
        self.vehicle_mut()?.set_discount(percent);
        debug!(percent, "Applied discount");
        Ok(())
    }

    // === Views ===

    /// Total price of the live configuration.
    pub fn total_price(&self) -> Option<f64> {
        self.current.as_ref().map(|v| v.total_price(&self.catalog))
    }

    /// Snapshot of the live configuration.
    pub fn describe(&self) -> Result<VehicleSnapshot> {
        Ok(self.vehicle()?.describe(&self.catalog))
    }

    /// Selected equipment grouped by category, with totals.
    pub fn equipment_by_category(&self) -> Result<Vec<CategoryTotal>> {
        Ok(self.describe()?.equipment_by_category)
    }

    // === Comparison ===

    /// Keep an independent copy of the live configuration for comparison.
    pub fn save_for_comparison(&mut self) -> Result<&Vehicle> {
        let snapshot = self.vehicle()?.clone();
        info!(vehicle = %snapshot.label(), "Saved configuration for comparison");
        Ok(self.comparison.insert(snapshot))
    }

    /// Compare the live configuration with the comparison snapshot.
    pub fn compare_configurations(&self) -> Result<Comparison> {
        let current = self.vehicle()?;
        let saved = self
            .comparison
            .as_ref()
            .ok_or(ConfigError::PreconditionUnmet(Precondition::NoComparison))?;
        Ok(Comparison::new(current, saved, &self.catalog))
    }

    // === Persistence ===

    /// Save the live configuration under `name`.
    pub async fn save_configuration(&mut self, name: &str) -> Result<PathBuf> {
        let vehicle = self.vehicle()?;
        let record = ConfigRecord::from_vehicle(vehicle, &self.catalog, Local::now().naive_local());
        Ok(self.storage.save(name, &record).await?)
    }

    /// Names of saved configurations.
    pub async fn list_saved(&self) -> Result<Vec<String>> {
        Ok(self.storage.list().await?)
    }

    /// Load a saved configuration, replacing the live one.
    ///
    /// The vehicle must exist in the catalog or nothing changes. Unknown
    /// engines and equipment are skipped and reported.
    pub async fn load_configuration(&mut self, name: &str) -> Result<LoadReport> {
        let path = self.storage.resolve(name)?;
        let record = self.storage.load(name).await?;

        let section = &record.vehicle;
        let (_, template) = self
            .catalog
            .find_vehicle(&section.brand, &section.model)
            .ok_or_else(|| ConfigError::CatalogMismatch {
                brand: section.brand.clone(),
                model: section.model.clone(),
            })?;

        let mut vehicle = template.clone();
        vehicle.set_color(section.color.clone());
        vehicle.set_discount(section.discount);

        let mut skipped = Vec::new();
        if let Some(engine) = &record.engine {
            match self.catalog.find_engine(&engine.name) {
                Some((id, _)) => vehicle.set_engine(id),
                None => skipped.push(Skipped::Engine(engine.name.clone())),
            }
        }
        for item in &record.equipment {
            match self.catalog.find_equipment(&item.name) {
                Some((_, known)) => {
                    if !vehicle.add_equipment(known.clone()).is_change() {
                        skipped.push(Skipped::DuplicateEquipment(item.name.clone()));
                    }
                }
                None => skipped.push(Skipped::Equipment(item.name.clone())),
            }
        }

        for entry in &skipped {
            warn!(path = %path.display(), "{entry}");
        }
        info!(path = %path.display(), vehicle = %vehicle.label(), "Loaded configuration");

        let report = LoadReport { path, vehicle: vehicle.label(), skipped };
        self.current = Some(vehicle);
        Ok(report)
    }

    /// Write a JSON report of the live configuration.
    pub async fn generate_report(&mut self) -> Result<PathBuf> {
        let vehicle = self.vehicle()?;
        let stem = report_stem(vehicle);
        let report = Report {
            title: format!("{} ({})", vehicle.label(), vehicle.year),
            generated_at: Local::now().format(DATE_FORMAT).to_string(),
            configuration: vehicle.describe(&self.catalog),
        };
        let value = serde_json::to_value(&report).map_err(|e| ConfigError::Report(e.to_string()))?;
        Ok(self.storage.save_report(&stem, &value).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vconf_storage::FileStorage;
    use tempfile::TempDir;

    fn session(tmp: &TempDir) -> Configurator<FileStorage> {
        let storage = FileStorage::new(tmp.path().join("configs"), tmp.path().join("reports"));
        Configurator::new(Catalog::standard(), storage)
    }

    fn choice_of_equipment(c: &Configurator<FileStorage>, name: &str) -> usize {
        c.catalog().find_equipment(name).unwrap().0.choice()
    }

    fn choice_of_engine(c: &Configurator<FileStorage>, name: &str) -> usize {
        c.catalog().find_engine(name).unwrap().0.choice()
    }

    #[test]
    fn test_starts_without_vehicle() {
        let tmp = tempfile::tempdir().unwrap();
        let c = session(&tmp);
        assert_eq!(c.state(), SessionState::NoVehicle);
        assert!(c.total_price().is_none());
    }

    #[test]
    fn test_select_vehicle_bounds() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        assert!(matches!(
            c.select_vehicle(0),
            Err(ConfigError::InvalidSelection { what: "vehicle", index: 0, max: 11 })
        ));
        assert!(matches!(c.select_vehicle(12), Err(ConfigError::InvalidSelection { .. })));
        assert_eq!(c.state(), SessionState::NoVehicle);

        assert_eq!(c.select_vehicle(11).unwrap().label(), "Nissan Leaf");
        assert_eq!(c.state(), SessionState::VehicleSelected);
    }

    #[test]
    fn test_operations_require_vehicle() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        let no_vehicle = |r: Result<()>| {
            matches!(r, Err(ConfigError::PreconditionUnmet(Precondition::NoVehicle)))
        };
        assert!(no_vehicle(c.select_engine(1).map(|_| ())));
        assert!(no_vehicle(c.add_equipment(1).map(|_| ())));
        assert!(no_vehicle(c.remove_equipment_by_choice(1).map(|_| ())));
        assert!(no_vehicle(c.select_color(1).map(|_| ())));
        assert!(no_vehicle(c.apply_discount(10.0)));
        assert!(no_vehicle(c.save_for_comparison().map(|_| ())));
        assert!(no_vehicle(c.compare_configurations().map(|_| ())));
        assert!(no_vehicle(c.describe().map(|_| ())));
    }

    #[test]
    fn test_no_vehicle_wins_over_bad_index() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        assert!(matches!(
            c.select_engine(99),
            Err(ConfigError::PreconditionUnmet(Precondition::NoVehicle))
        ));
    }

    #[test]
    fn test_select_engine_bounds() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        assert!(matches!(c.select_engine(0), Err(ConfigError::InvalidSelection { what: "engine", .. })));
        assert!(matches!(c.select_engine(9), Err(ConfigError::InvalidSelection { max: 8, .. })));
        assert!(c.current().unwrap().engine.is_none());

        assert_eq!(c.select_engine(8).unwrap().name, "650cc Twin");
        assert_eq!(c.current().unwrap().engine.map(|id| id.choice()), Some(8));
    }

    #[test]
    fn test_price_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        let engine = choice_of_engine(&c, "1.4 TSI");
        c.select_engine(engine).unwrap();
        let leather = choice_of_equipment(&c, "Leather upholstery");
        c.add_equipment(leather).unwrap();
        c.apply_discount(10.0).unwrap();

        assert!((c.total_price().unwrap() - 87300.0).abs() < 1e-6);
    }

    #[test]
    fn test_add_equipment_twice_reports_duplicate() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(2).unwrap();

        let (change, item) = c.add_equipment(4).unwrap();
        assert_eq!(change, EquipmentChange::Added);
        assert_eq!(item.name, "Heated seats");
        let (change, _) = c.add_equipment(4).unwrap();
        assert_eq!(change, EquipmentChange::AlreadyPresent);
        assert_eq!(c.current().unwrap().equipment().len(), 1);

        assert!(matches!(c.add_equipment(16), Err(ConfigError::InvalidSelection { max: 15, .. })));
    }

    #[test]
    fn test_remove_equipment() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(2).unwrap();
        assert!(matches!(
            c.remove_equipment_by_choice(1),
            Err(ConfigError::PreconditionUnmet(Precondition::NoEquipment))
        ));

        c.add_equipment(1).unwrap();
        c.add_equipment(2).unwrap();
        assert!(matches!(c.remove_equipment_by_choice(3), Err(ConfigError::InvalidSelection { max: 2, .. })));

        let (change, item) = c.remove_equipment_by_choice(2).unwrap();
        assert_eq!(change, EquipmentChange::Removed);
        assert_eq!(item.name, "Navigation system");

        assert_eq!(c.remove_equipment("Navigation system").unwrap(), EquipmentChange::NotFound);
        assert_eq!(c.current().unwrap().equipment().len(), 1);
    }

    #[test]
    fn test_select_color() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(3).unwrap();
        assert_eq!(c.select_color(3).unwrap(), "Red");
        assert!(matches!(c.select_color(11), Err(ConfigError::InvalidSelection { what: "color", .. })));
        assert_eq!(c.current().unwrap().color, "Red");
    }

    #[test]
    fn test_discount_policy_bounds() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();

        assert!(c.apply_discount(0.0).is_ok());
        assert!(c.apply_discount(30.0).is_ok());
        assert_eq!(c.current().unwrap().discount, 30.0);

        for bad in [31.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(c.apply_discount(bad), Err(ConfigError::DiscountOutOfRange { .. })));
        }
        assert_eq!(c.current().unwrap().discount, 30.0);
    }

    #[test]
    fn test_custom_discount_ceiling() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp).with_config(ConfiguratorConfig { max_discount: 50.0 });
        c.select_vehicle(1).unwrap();
        assert!(c.apply_discount(45.0).is_ok());
    }

    #[test]
    fn test_reselect_discards_customization() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        c.select_engine(1).unwrap();
        c.add_equipment(1).unwrap();
        c.select_color(2).unwrap();

        let fresh = c.select_vehicle(1).unwrap();
        assert!(fresh.engine.is_none());
        assert!(fresh.equipment().is_empty());
        assert_eq!(fresh.color, "White");
        assert_eq!(c.catalog().vehicles()[0].color, "White");
    }

    #[test]
    fn test_comparison_snapshot_is_independent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        c.save_for_comparison().unwrap();

        c.select_engine(1).unwrap();
        c.select_color(3).unwrap();

        let cmp = c.compare_configurations().unwrap();
        assert_eq!(cmp.saved.color, "White");
        assert!(!cmp.saved.has_engine);
        assert_eq!(cmp.current.color, "Red");
        assert!(cmp.current.has_engine);
        assert_eq!(cmp.price_delta(), 12000.0);
    }

    #[test]
    fn test_compare_without_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        assert!(matches!(
            c.compare_configurations(),
            Err(ConfigError::PreconditionUnmet(Precondition::NoComparison))
        ));
    }

    #[tokio::test]
    async fn test_save_and_reload_in_fresh_session() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        c.select_engine(2).unwrap();
        c.add_equipment(1).unwrap();
        c.add_equipment(6).unwrap();
        c.select_color(4).unwrap();
        c.apply_discount(15.0).unwrap();

        let path = c.save_configuration("myconfig").await.unwrap();
        assert_eq!(path, tmp.path().join("configs").join("myconfig.txt"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("COUNT=2"));
        assert!(text.contains("[EQUIPMENT_ITEM_1]"));
        assert!(text.contains("[EQUIPMENT_ITEM_2]"));
        assert!(!text.contains("[EQUIPMENT_ITEM_3]"));

        let mut fresh = session(&tmp);
        let report = fresh.load_configuration("myconfig").await.unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.vehicle, "Volkswagen Golf");

        let original = c.current().unwrap();
        let loaded = fresh.current().unwrap();
        assert_eq!(loaded, original);
        assert_eq!(fresh.total_price(), c.total_price());
    }

    #[tokio::test]
    async fn test_save_requires_vehicle() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        assert!(matches!(
            c.save_configuration("x").await,
            Err(ConfigError::PreconditionUnmet(Precondition::NoVehicle))
        ));
        assert!(!tmp.path().join("configs").exists());
    }

    async fn write_config(tmp: &TempDir, name: &str, text: &str) {
        let dir = tmp.path().join("configs");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join(format!("{name}.txt")), text).await.unwrap();
    }

    fn saved_text(brand: &str, model: &str, engine: &str, equipment: &str) -> String {
        format!(
            "VEHICLE_CONFIGURATION\nVERSION 2.0\nDATE 2024-05-01 10:00:00\n\n\
             [VEHICLE]\nBRAND={brand}\nMODEL={model}\nYEAR=2023\nBASE_PRICE=1\nCOLOR=Purple\nDISCOUNT=5\n\n\
             [ENGINE]\nNAME={engine}\nCAPACITY=2\nHORSEPOWER=100\nFUEL_TYPE=Diesel\nPRICE=1\nCO2_EMISSIONS=1\nFUEL_CONSUMPTION=1\n\n\
             [EQUIPMENT]\nCOUNT=1\n\n\
             [EQUIPMENT_ITEM_1]\nNAME={equipment}\nDESCRIPTION=d\nPRICE=1\nCATEGORY=0\n"
        )
    }

    #[tokio::test]
    async fn test_load_unknown_vehicle_keeps_state() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(&tmp, "ghost", &saved_text("Trabant", "601", "1.4 TSI", "Heated seats")).await;

        let mut c = session(&tmp);
        c.select_vehicle(3).unwrap();
        c.select_color(2).unwrap();
        let before = c.current().cloned();

        match c.load_configuration("ghost").await {
            Err(ConfigError::CatalogMismatch { brand, model }) => {
                assert_eq!(brand, "Trabant");
                assert_eq!(model, "601");
            }
            other => panic!("expected CatalogMismatch, got {other:?}"),
        }
        assert_eq!(c.current().cloned(), before);
    }

    #[tokio::test]
    async fn test_load_skips_unknown_engine_and_equipment() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(&tmp, "partial", &saved_text("Audi", "A4", "W16", "Jet pack")).await;

        let mut c = session(&tmp);
        let report = c.load_configuration("partial").await.unwrap();
        assert_eq!(
            report.skipped,
            vec![Skipped::Engine("W16".into()), Skipped::Equipment("Jet pack".into())]
        );

        let vehicle = c.current().unwrap();
        assert_eq!(vehicle.label(), "Audi A4");
        assert_eq!(vehicle.color, "Purple");
        assert_eq!(vehicle.discount, 5.0);
        assert!(vehicle.engine.is_none());
        assert!(vehicle.equipment().is_empty());
        // Catalog prices win over the saved ones
        assert_eq!(vehicle.base_price, 150000.0);
    }

    #[tokio::test]
    async fn test_load_reports_duplicate_equipment() {
        let tmp = tempfile::tempdir().unwrap();
        let text = format!(
            "{}\n[EQUIPMENT_ITEM_2]\nNAME=Heated seats\nDESCRIPTION=d\nPRICE=1\nCATEGORY=0\n",
            saved_text("Audi", "A4", "2.0 TDI", "Heated seats")
                .replace("[EQUIPMENT]\nCOUNT=1\n", "[EQUIPMENT]\nCOUNT=2\n")
        );
        write_config(&tmp, "twice", &text).await;

        let mut c = session(&tmp);
        let report = c.load_configuration("twice").await.unwrap();
        assert_eq!(report.skipped, vec![Skipped::DuplicateEquipment("Heated seats".into())]);
        assert_eq!(
            report.skipped[0].to_string(),
            "Duplicate equipment ignored: Heated seats"
        );
        assert_eq!(c.current().unwrap().equipment().len(), 1);
    }

    #[tokio::test]
    async fn test_load_uses_catalog_equipment() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(&tmp, "seats", &saved_text("Audi", "A4", "2.0 TDI", "Heated seats")).await;

        let mut c = session(&tmp);
        c.load_configuration("seats.txt").await.unwrap();
        let vehicle = c.current().unwrap();
        assert_eq!(vehicle.equipment()[0].price, 2000.0);
        assert_eq!(vehicle.equipment()[0].description, "Heated front seats");
        assert_eq!(vehicle.engine.map(|id| id.choice()), Some(3));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        assert!(matches!(c.load_configuration("nope").await, Err(ConfigError::FileNotFound(_))));
        assert_eq!(c.state(), SessionState::NoVehicle);
    }

    #[tokio::test]
    async fn test_load_malformed_number_is_recoverable() {
        let tmp = tempfile::tempdir().unwrap();
        let text = saved_text("Audi", "A4", "2.0 TDI", "Heated seats").replace("HORSEPOWER=100", "HORSEPOWER=lots");
        write_config(&tmp, "bad", &text).await;

        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        match c.load_configuration("bad").await {
            Err(ConfigError::MalformedRecord { line, reason }) => {
                assert_eq!(line, 16);
                assert!(reason.contains("HORSEPOWER"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
        assert_eq!(c.current().unwrap().label(), "Volkswagen Golf");
    }

    #[tokio::test]
    async fn test_load_directory_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        tokio::fs::create_dir_all(tmp.path().join("configs").join("dir.txt")).await.unwrap();
        let mut c = session(&tmp);
        assert!(matches!(c.load_configuration("dir").await, Err(ConfigError::FileUnreadable(_))));
    }

    #[tokio::test]
    async fn test_list_saved() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        c.save_configuration("b").await.unwrap();
        c.save_configuration("a").await.unwrap();
        assert_eq!(c.list_saved().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_generate_report() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(10).unwrap();
        c.select_engine(5).unwrap();

        let path = c.generate_report().await.unwrap();
        assert_eq!(path, tmp.path().join("reports").join("Tesla_Model_3_report.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["title"], "Tesla Model 3 (2023)");
        assert_eq!(value["configuration"]["total_price"], 210000.0);
        assert_eq!(value["configuration"]["engine"]["name"], "Electric Motor");
    }

    #[test]
    fn test_equipment_by_category() {
        let tmp = tempfile::tempdir().unwrap();
        let mut c = session(&tmp);
        c.select_vehicle(1).unwrap();
        assert!(c.equipment_by_category().unwrap().is_empty());
        c.add_equipment(6).unwrap();
        c.add_equipment(1).unwrap();
        let groups = c.equipment_by_category().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, vconf_core::EquipmentCategory::Comfort);
    }
}
