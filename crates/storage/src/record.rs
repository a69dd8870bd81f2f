//! Flat `KEY=VALUE` configuration file format.
//!
//! ```text
//! VEHICLE_CONFIGURATION
//! VERSION 2.0
//! DATE 2024-05-01 12:00:00
//!
//! [VEHICLE]
//! BRAND=Volkswagen
//! ...
//! [ENGINE]            (only when an engine is installed)
//! [EQUIPMENT]
//! COUNT=2
//! [EQUIPMENT_ITEM_1]
//! ...
//! [SUMMARY]
//! TOTAL_PRICE=87300
//! ```
//!
//! Writing always emits sections in this order. Reading is section based:
//! blank lines and `;`/`#` comments are skipped, and every value is validated
//! with the offending line reported on failure.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use chrono::NaiveDateTime;
use regex::Regex;
use vconf_core::{Catalog, Engine, Equipment, EquipmentCategory, Vehicle};
use crate::trait_::{Result, StorageError};

/// First line of every configuration file.
pub const MAGIC: &str = "VEHICLE_CONFIGURATION";

/// Format version written by this crate.
pub const FORMAT_VERSION: &str = "2.0";

/// Layout of the `DATE` header.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static ITEM_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EQUIPMENT_ITEM_(\d+)$").expect("valid section pattern"));

/// A saved configuration before it is resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRecord {
    /// Format version from the header
    pub version: String,

    /// When the file was written
    pub saved_at: NaiveDateTime,

    /// Vehicle identity and customization
    pub vehicle: VehicleSection,

    /// Installed engine
    pub engine: Option<Engine>,

    /// Equipment in file order
    pub equipment: Vec<Equipment>,

    /// Total price at save time. Informational only.
    pub total_price: Option<f64>,
}

/// The `[VEHICLE]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSection {
    /// `BRAND`
    pub brand: String,
    /// `MODEL`
    pub model: String,
    /// `YEAR`
    pub year: String,
    /// `BASE_PRICE`
    pub base_price: f64,
    /// `COLOR`
    pub color: String,
    /// `DISCOUNT` percentage
    pub discount: f64,
}

impl ConfigRecord {
    /// Capture a configured vehicle.
    pub fn from_vehicle(vehicle: &Vehicle, catalog: &Catalog, saved_at: NaiveDateTime) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            saved_at,
            vehicle: VehicleSection {
                brand: vehicle.brand.clone(),
                model: vehicle.model.clone(),
                year: vehicle.year.clone(),
                base_price: vehicle.base_price,
                color: vehicle.color.clone(),
                discount: vehicle.discount,
            },
            engine: vehicle.engine.and_then(|id| catalog.engine(id)).cloned(),
            equipment: vehicle.equipment().to_vec(),
            total_price: Some(vehicle.total_price(catalog)),
        }
    }

    /// Parse a configuration file.
    pub fn parse(input: &str) -> Result<Self> {
        let document = Document::tokenize(input)?;
        document.interpret()
    }
}

impl FromStr for ConfigRecord {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ConfigRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{MAGIC}")?;
        writeln!(f, "VERSION {}", self.version)?;
        writeln!(f, "DATE {}", self.saved_at.format(DATE_FORMAT))?;
        writeln!(f)?;

        let v = &self.vehicle;
        writeln!(f, "[VEHICLE]")?;
        writeln!(f, "BRAND={}", v.brand)?;
        writeln!(f, "MODEL={}", v.model)?;
        writeln!(f, "YEAR={}", v.year)?;
        writeln!(f, "BASE_PRICE={}", v.base_price)?;
        writeln!(f, "COLOR={}", v.color)?;
        writeln!(f, "DISCOUNT={}", v.discount)?;
        writeln!(f)?;

        if let Some(engine) = &self.engine {
            writeln!(f, "[ENGINE]")?;
            writeln!(f, "NAME={}", engine.name)?;
            writeln!(f, "CAPACITY={}", engine.capacity)?;
            writeln!(f, "HORSEPOWER={}", engine.horse_power)?;
            writeln!(f, "FUEL_TYPE={}", engine.fuel_type)?;
            writeln!(f, "PRICE={}", engine.price)?;
            writeln!(f, "CO2_EMISSIONS={}", engine.co2_emissions)?;
            writeln!(f, "FUEL_CONSUMPTION={}", engine.fuel_consumption)?;
            writeln!(f)?;
        }

        writeln!(f, "[EQUIPMENT]")?;
        writeln!(f, "COUNT={}", self.equipment.len())?;
        writeln!(f)?;

        for (i, item) in self.equipment.iter().enumerate() {
            writeln!(f, "[EQUIPMENT_ITEM_{}]", i + 1)?;
            writeln!(f, "NAME={}", item.name)?;
            writeln!(f, "DESCRIPTION={}", item.description)?;
            writeln!(f, "PRICE={}", item.price)?;
            writeln!(f, "CATEGORY={}", item.category.code())?;
            writeln!(f)?;
        }

        if let Some(total) = self.total_price {
            writeln!(f, "[SUMMARY]")?;
            writeln!(f, "TOTAL_PRICE={total}")?;
        }
        Ok(())
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> StorageError {
    StorageError::Malformed { line, reason: reason.into() }
}

/// Header lines plus sections, before any value is interpreted.
struct Document<'a> {
    version: (usize, &'a str),
    date: (usize, &'a str),
    sections: Vec<Section<'a>>,
}

struct Section<'a> {
    name: &'a str,
    line: usize,
    entries: Vec<Entry<'a>>,
}

struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    line: usize,
}

impl<'a> Document<'a> {
    fn tokenize(input: &'a str) -> Result<Self> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| {
                let trimmed = line.trim();
                !(trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#'))
            })
            .peekable();

        match lines.next() {
            Some((_, line)) if line.trim() == MAGIC => {}
            Some((n, _)) => return Err(malformed(n, format!("expected {MAGIC} header"))),
            None => return Err(malformed(1, "file is empty")),
        }

        let mut version = None;
        let mut date = None;
        while let Some((n, line)) = lines.next_if(|(_, line)| !line.trim_start().starts_with('[')) {
            let (key, value) = line
                .trim()
                .split_once(' ')
                .ok_or_else(|| malformed(n, format!("unexpected header line {line:?}")))?;
            let slot = match key {
                "VERSION" => &mut version,
                "DATE" => &mut date,
                other => return Err(malformed(n, format!("unknown header {other:?}"))),
            };
            if slot.replace((n, value.trim())).is_some() {
                return Err(malformed(n, format!("duplicate header {key}")));
            }
        }

        let version = version.ok_or_else(|| malformed(1, "missing VERSION header"))?;
        let date = date.ok_or_else(|| malformed(1, "missing DATE header"))?;

        let mut sections: Vec<Section<'a>> = Vec::new();
        for (n, line) in lines {
            let trimmed = line.trim();
            if let Some(name) = trimmed.strip_prefix('[') {
                let name = name
                    .strip_suffix(']')
                    .ok_or_else(|| malformed(n, "unterminated section header"))?
                    .trim();
                if sections.iter().any(|s| s.name == name) {
                    return Err(malformed(n, format!("duplicate section [{name}]")));
                }
                sections.push(Section { name, line: n, entries: Vec::new() });
                continue;
            }

            let Some(section) = sections.last_mut() else {
                return Err(malformed(n, "entry outside of a section"));
            };
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| malformed(n, format!("expected KEY=VALUE, got {trimmed:?}")))?;
            let key = key.trim();
            if section.entries.iter().any(|e| e.key == key) {
                return Err(malformed(n, format!("duplicate key {key} in [{}]", section.name)));
            }
            section.entries.push(Entry { key, value, line: n });
        }

        Ok(Self { version, date, sections })
    }

    fn interpret(self) -> Result<ConfigRecord> {
        let (line, version) = self.version;
        if version.split('.').next() != FORMAT_VERSION.split('.').next() {
            return Err(malformed(line, format!("unsupported version {version}")));
        }

        let (line, date) = self.date;
        let saved_at = NaiveDateTime::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| malformed(line, format!("invalid DATE {date:?}: {e}")))?;

        let mut vehicle = None;
        let mut engine = None;
        let mut count = None;
        let mut items: Vec<(usize, &Section<'_>)> = Vec::new();
        let mut total_price = None;

        for section in &self.sections {
            match section.name {
                "VEHICLE" => vehicle = Some(section.vehicle()?),
                "ENGINE" => engine = Some(section.engine()?),
                "EQUIPMENT" => {
                    section.allow(&["COUNT"])?;
                    count = Some(section.parse::<usize>("COUNT")?);
                }
                "SUMMARY" => {
                    section.allow(&["TOTAL_PRICE"])?;
                    total_price = Some(section.amount("TOTAL_PRICE")?);
                }
                name => {
                    let index = ITEM_SECTION
                        .captures(name)
                        .and_then(|c| c[1].parse::<usize>().ok())
                        .ok_or_else(|| malformed(section.line, format!("unknown section [{name}]")))?;
                    items.push((index, section));
                }
            }
        }

        let vehicle = vehicle.ok_or_else(|| malformed(1, "missing [VEHICLE] section"))?;
        let count = count.ok_or_else(|| malformed(1, "missing [EQUIPMENT] section"))?;

        if items.len() != count {
            return Err(malformed(
                items.last().map(|(_, s)| s.line).unwrap_or(1),
                format!("COUNT={count} but {} equipment items present", items.len()),
            ));
        }
        items.sort_by_key(|(index, _)| *index);
        let mut equipment = Vec::with_capacity(count);
        for (expected, (index, section)) in (1..).zip(items) {
            if index != expected {
                return Err(malformed(
                    section.line,
                    format!("expected [EQUIPMENT_ITEM_{expected}], found [{}]", section.name),
                ));
            }
            equipment.push(section.equipment()?);
        }

        Ok(ConfigRecord {
            version: version.to_string(),
            saved_at,
            vehicle,
            engine,
            equipment,
            total_price,
        })
    }
}

impl<'a> Section<'a> {
    fn vehicle(&self) -> Result<VehicleSection> {
        self.allow(&["BRAND", "MODEL", "YEAR", "BASE_PRICE", "COLOR", "DISCOUNT"])?;
        let discount = self.amount("DISCOUNT")?;
        if discount > 100.0 {
            return Err(malformed(self.line_of("DISCOUNT"), format!("DISCOUNT {discount} exceeds 100")));
        }
        Ok(VehicleSection {
            brand: self.text("BRAND")?.to_string(),
            model: self.text("MODEL")?.to_string(),
            year: self.text("YEAR")?.to_string(),
            base_price: self.amount("BASE_PRICE")?,
            color: self.text("COLOR")?.to_string(),
            discount,
        })
    }

    fn engine(&self) -> Result<Engine> {
        self.allow(&[
            "NAME", "CAPACITY", "HORSEPOWER", "FUEL_TYPE", "PRICE", "CO2_EMISSIONS", "FUEL_CONSUMPTION",
        ])?;
        Ok(Engine {
            name: self.text("NAME")?.to_string(),
            capacity: self.amount("CAPACITY")?,
            horse_power: self.parse("HORSEPOWER")?,
            fuel_type: self.text("FUEL_TYPE")?.to_string(),
            price: self.amount("PRICE")?,
            co2_emissions: self.parse("CO2_EMISSIONS")?,
            fuel_consumption: self.amount("FUEL_CONSUMPTION")?,
        })
    }

    fn equipment(&self) -> Result<Equipment> {
        self.allow(&["NAME", "DESCRIPTION", "PRICE", "CATEGORY"])?;
        let code: u8 = self.parse("CATEGORY")?;
        let category = EquipmentCategory::from_code(code).ok_or_else(|| {
            malformed(self.line_of("CATEGORY"), format!("unknown CATEGORY {code}"))
        })?;
        Ok(Equipment {
            name: self.text("NAME")?.to_string(),
            description: self.text("DESCRIPTION")?.to_string(),
            price: self.amount("PRICE")?,
            category,
        })
    }

    /// Reject keys that do not belong to this section.
    fn allow(&self, keys: &[&str]) -> Result<()> {
        match self.entries.iter().find(|e| !keys.contains(&e.key)) {
            Some(entry) => Err(malformed(
                entry.line,
                format!("unexpected key {} in [{}]", entry.key, self.name),
            )),
            None => Ok(()),
        }
    }

    fn entry(&self, key: &str) -> Result<&Entry<'a>> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| malformed(self.line, format!("missing {key} in [{}]", self.name)))
    }

    fn line_of(&self, key: &str) -> usize {
        self.entry(key).map(|e| e.line).unwrap_or(self.line)
    }

    fn text(&self, key: &str) -> Result<&'a str> {
        self.entry(key).map(|e| e.value)
    }

    fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let entry = self.entry(key)?;
        entry
            .value
            .trim()
            .parse()
            .map_err(|e| malformed(entry.line, format!("invalid {key} {:?}: {e}", entry.value)))
    }

    /// A finite, non-negative decimal.
    fn amount(&self, key: &str) -> Result<f64> {
        let value: f64 = self.parse(key)?;
        if !value.is_finite() || value < 0.0 {
            return Err(malformed(self.line_of(key), format!("{key} must be a non-negative number")));
        }
        Ok(value)
    }
}
