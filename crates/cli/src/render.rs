//! Terminal rendering - ANSI styling, prices, listings and tables.

use std::io::{self, Write};
use vconf_core::{Catalog, CategoryTotal, VehicleKind, VehicleSnapshot};
use vconf_service::Comparison;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const COLUMN: usize = 30;

/// ANSI styling, switched off for plain output.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(&format!("{BOLD}{BLUE}"), text)
    }

    pub fn total(&self, text: &str) -> String {
        self.paint(&format!("{BOLD}{GREEN}"), text)
    }

    /// Paint text in a vehicle color. Colors without an ANSI match render white.
    pub fn paint_color(&self, color: &str, text: &str) -> String {
        let code = match color {
            "Red" => RED,
            "Blue" => BLUE,
            "Green" => GREEN,
            "Yellow" => YELLOW,
            "Black" => BOLD,
            _ => WHITE,
        };
        self.paint(code, text)
    }
}

/// Format a price with thousands separators and two decimals: `80,000.00 USD`.
pub fn format_price(price: f64) -> String {
    let digits = format!("{:.2}", price.abs());
    let (int, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if price < 0.0 && digits != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac} USD")
}

/// Like [`format_price`], with an explicit `+` for non-negative values.
pub fn format_signed_price(price: f64) -> String {
    let text = format_price(price);
    if text.starts_with('-') {
        text
    } else {
        format!("+{text}")
    }
}

/// Boxed section header.
pub fn header(out: &mut impl Write, p: &Palette, text: &str) -> io::Result<()> {
    let bar = "═".repeat(58);
    writeln!(out)?;
    writeln!(out, "{}", p.title(&format!("╔{bar}╗")))?;
    writeln!(out, "{}", p.title(&format!("║ {text:<56} ║")))?;
    writeln!(out, "{}", p.title(&format!("╚{bar}╝")))
}

/// Numbered menu entry.
pub fn menu_item(out: &mut impl Write, p: &Palette, number: usize, text: &str) -> io::Result<()> {
    writeln!(out, "{}{text}", p.accent(&format!(" [{number}] ")))
}

pub fn main_menu(out: &mut impl Write, p: &Palette) -> io::Result<()> {
    header(out, p, "Main Menu")?;
    for (number, text) in [
        (1, "Select vehicle"),
        (2, "Select engine"),
        (3, "Add equipment"),
        (4, "Remove equipment"),
        (5, "Select color"),
        (6, "Apply discount"),
        (7, "Display current configuration"),
        (8, "Visualize vehicle"),
        (9, "Save configuration"),
        (10, "Load configuration"),
        (11, "Save for comparison"),
        (12, "Compare configurations"),
        (13, "Generate report"),
        (14, "Equipment by category"),
        (0, "Exit"),
    ] {
        menu_item(out, p, number, text)?;
    }
    Ok(())
}

// === Catalog listings ===

/// Vehicles grouped by variant, numbered by catalog position.
pub fn vehicles(out: &mut impl Write, p: &Palette, catalog: &Catalog) -> io::Result<()> {
    header(out, p, "Available Vehicles")?;
    for group in catalog.vehicles_by_kind() {
        writeln!(out, "\n{}", p.heading(&format!("{}:", group.label)))?;
        for (id, vehicle) in group.entries {
            writeln!(
                out,
                "{}{} ({}) - {}",
                p.accent(&format!(" [{}] ", id.choice())),
                vehicle.label(),
                vehicle.year,
                format_price(vehicle.base_price),
            )?;
        }
    }
    Ok(())
}

/// Engines grouped by fuel type, numbered by catalog position.
pub fn engines(out: &mut impl Write, p: &Palette, catalog: &Catalog) -> io::Result<()> {
    header(out, p, "Available Engines")?;
    for group in catalog.engines_by_fuel() {
        writeln!(out, "\n{}", p.heading(&format!("{} engines:", group.label)))?;
        for (id, engine) in group.entries {
            let mut line = format!(
                "{} ({}L, {} HP) - {}",
                engine.name,
                engine.capacity,
                engine.horse_power,
                format_price(engine.price),
            );
            if engine.co2_emissions > 0 {
                line.push_str(&format!(" - {} g/km CO2", engine.co2_emissions));
            }
            if engine.fuel_consumption > 0.0 {
                line.push_str(&format!(" - {} l/100km", engine.fuel_consumption));
            }
            writeln!(out, "{}{line}", p.accent(&format!(" [{}] ", id.choice())))?;
        }
    }
    Ok(())
}

/// Equipment grouped by category, numbered by catalog position.
pub fn equipment(out: &mut impl Write, p: &Palette, catalog: &Catalog) -> io::Result<()> {
    header(out, p, "Available Equipment by Category")?;
    for group in catalog.equipment_by_category() {
        writeln!(out, "\n{}", p.heading(&format!("{}:", group.label)))?;
        for (id, item) in group.entries {
            writeln!(
                out,
                "{}{} - {} - {}",
                p.accent(&format!(" [{}] ", id.choice())),
                item.name,
                item.description,
                format_price(item.price),
            )?;
        }
    }
    Ok(())
}

pub fn colors(out: &mut impl Write, p: &Palette, catalog: &Catalog) -> io::Result<()> {
    header(out, p, "Available Colors")?;
    for (i, color) in catalog.colors().iter().enumerate() {
        writeln!(
            out,
            "{}{}",
            p.accent(&format!(" [{}] ", i + 1)),
            p.paint_color(color, &format!("■ {color}")),
        )?;
    }
    Ok(())
}

/// Names saved under the configs directory.
pub fn saved_names(out: &mut impl Write, p: &Palette, names: &[String]) -> io::Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", p.heading("Saved configurations:"))?;
    for name in names {
        writeln!(out, "  - {name}")?;
    }
    Ok(())
}

// === Configuration ===

/// Full configuration sheet.
pub fn configuration(out: &mut impl Write, p: &Palette, snap: &VehicleSnapshot) -> io::Result<()> {
    header(out, p, &format!("{} ({})", snap.label(), snap.year))?;
    writeln!(out, "{}{}", p.bold("Color: "), snap.color)?;
    writeln!(out, "{}{}", p.bold("Base price: "), format_price(snap.base_price))?;

    if let Some(engine) = &snap.engine {
        writeln!(out, "\n{}{}", p.bold("Engine: "), engine.name)?;
        writeln!(out, "  ├─ Capacity: {}L", engine.capacity)?;
        writeln!(out, "  ├─ Power: {} HP", engine.horse_power)?;
        writeln!(out, "  ├─ Fuel type: {}", engine.fuel_type)?;
        if engine.co2_emissions > 0 {
            writeln!(out, "  ├─ CO2 emissions: {} g/km", engine.co2_emissions)?;
        }
        if engine.fuel_consumption > 0.0 {
            writeln!(out, "  ├─ Fuel consumption: {} l/100km", engine.fuel_consumption)?;
        }
        writeln!(out, "  └─ Price: {}", format_price(engine.price))?;
    }

    if !snap.equipment_by_category.is_empty() {
        writeln!(out, "\n{}", p.bold("Selected equipment:"))?;
        for group in &snap.equipment_by_category {
            writeln!(out, "{}", p.heading(&format!("  {}:", group.category)))?;
            for item in &group.items {
                writeln!(out, "    ├─ {}: {}", item.name, format_price(item.price))?;
                writeln!(out, "    │  {}", item.description)?;
            }
            writeln!(out, "    └─ {}", p.bold(&format!("Category total: {}", format_price(group.total))))?;
        }
    }

    if snap.discount > 0.0 {
        writeln!(
            out,
            "\n{}{}% ({})",
            p.bold("Discount: "),
            snap.discount,
            format_price(snap.discount_amount),
        )?;
    }

    writeln!(out, "\n{}", p.total(&format!("Total price: {}", format_price(snap.total_price))))?;
    kind_details(out, p, &snap.kind)
}

fn kind_details(out: &mut impl Write, p: &Palette, kind: &VehicleKind) -> io::Result<()> {
    match kind {
        VehicleKind::Car { doors, body_type, trunk_capacity } => {
            writeln!(out, "\n{}", p.bold("Car details:"))?;
            writeln!(out, "  ├─ Body type: {body_type}")?;
            writeln!(out, "  ├─ Number of doors: {doors}")?;
            if *trunk_capacity > 0 {
                writeln!(out, "  └─ Trunk capacity: {trunk_capacity} liters")?;
            }
        }
        VehicleKind::Motorcycle { style, displacement } => {
            writeln!(out, "\n{}", p.bold("Motorcycle details:"))?;
            writeln!(out, "  ├─ Type: {style}")?;
            if *displacement > 0 {
                writeln!(out, "  └─ Engine displacement: {displacement} cc")?;
            }
        }
        VehicleKind::Electric { battery_capacity, range, charging_time } => {
            writeln!(out, "\n{}", p.bold("Electric vehicle details:"))?;
            writeln!(out, "  ├─ Battery capacity: {battery_capacity} kWh")?;
            writeln!(out, "  ├─ Range: {range} km")?;
            writeln!(out, "  └─ Fast charging time: {charging_time} minutes")?;
        }
    }
    Ok(())
}

/// Current equipment per category with totals and shares.
pub fn category_breakdown(out: &mut impl Write, p: &Palette, groups: &[CategoryTotal]) -> io::Result<()> {
    header(out, p, "Current Equipment by Category")?;
    if groups.is_empty() {
        return writeln!(out, "{}", p.warning("No equipment added yet."));
    }

    let mut total = 0.0;
    for group in groups {
        writeln!(out, "\n{}", p.heading(&format!("{}:", group.category)))?;
        for item in &group.items {
            writeln!(out, "  ├─ {}: {}", item.name, format_price(item.price))?;
            writeln!(out, "  │  {}", item.description)?;
        }
        writeln!(
            out,
            "  └─ {}",
            p.bold(&format!(
                "Category total: {} ({:.1}% of equipment cost)",
                format_price(group.total),
                group.share,
            )),
        )?;
        total += group.total;
    }
    writeln!(out, "\n{}", p.total(&format!("Total equipment cost: {}", format_price(total))))
}

/// ASCII drawing in the vehicle's color.
pub fn visualization(out: &mut impl Write, p: &Palette, snap: &VehicleSnapshot) -> io::Result<()> {
    header(out, p, &format!("Visualization of {} in {} color", snap.label(), snap.color))?;
    for line in crate::art::drawing(&snap.kind) {
        writeln!(out, "{}", p.paint_color(&snap.color, line))?;
    }
    Ok(())
}

/// Side-by-side table of the current and saved configurations.
pub fn comparison(out: &mut impl Write, p: &Palette, cmp: &Comparison) -> io::Result<()> {
    fn row(out: &mut impl Write, feature: &str, current: &str, saved: &str) -> io::Result<()> {
        writeln!(out, "{feature:>COLUMN$} | {current:>COLUMN$} | {saved:>COLUMN$}")
    }
    fn engine(has_engine: bool) -> &'static str {
        if has_engine {
            "Engine selected"
        } else {
            "No engine selected"
        }
    }

    let rule = "-".repeat(COLUMN * 3 + 6);
    let (cur, saved) = (&cmp.current, &cmp.saved);

    header(out, p, "Configuration Comparison")?;
    row(out, "Feature", "Current Configuration", "Saved Configuration")?;
    writeln!(out, "{rule}")?;
    row(out, "Vehicle", &cur.vehicle, &saved.vehicle)?;
    row(out, "Color", &cur.color, &saved.color)?;
    row(out, "Base Price", &format_price(cur.base_price), &format_price(saved.base_price))?;
    row(out, "Engine", engine(cur.has_engine), engine(saved.has_engine))?;
    writeln!(out, "{rule}")?;
    row(out, "Total Price", &format_price(cur.total_price), &format_price(saved.total_price))?;
    row(out, "Price Difference", &format_signed_price(cmp.price_delta()), "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(80000.0), "80,000.00 USD");
        assert_eq!(format_price(999.5), "999.50 USD");
        assert_eq!(format_price(0.0), "0.00 USD");
        assert_eq!(format_price(1234567.891), "1,234,567.89 USD");
        assert_eq!(format_price(100000.0), "100,000.00 USD");
        assert_eq!(format_price(-205000.0), "-205,000.00 USD");
        assert_eq!(format_price(-0.001), "0.00 USD");
    }

    #[test]
    fn test_format_signed_price() {
        assert_eq!(format_signed_price(12000.0), "+12,000.00 USD");
        assert_eq!(format_signed_price(0.0), "+0.00 USD");
        assert_eq!(format_signed_price(-1500.0), "-1,500.00 USD");
    }

    #[test]
    fn test_plain_palette_has_no_escapes() {
        let p = Palette::plain();
        assert_eq!(p.bold("x"), "x");
        assert_eq!(p.paint_color("Red", "x"), "x");

        let p = Palette::new(true);
        assert_eq!(p.paint_color("Red", "x"), "\x1b[31mx\x1b[0m");
        assert_eq!(p.paint_color("Silver", "x"), "\x1b[37mx\x1b[0m");
    }

    #[test]
    fn test_vehicle_listing_uses_catalog_numbers() {
        let catalog = Catalog::standard();
        let text = render(|out| vehicles(out, &Palette::plain(), &catalog));
        assert!(text.contains(" [1] Volkswagen Golf (2023) - 80,000.00 USD"));
        assert!(text.contains(" [7] Yamaha MT-07 (2023) - 35,000.00 USD"));
        assert!(text.contains("Electric Vehicles:"));
    }

    #[test]
    fn test_engine_listing_keeps_catalog_numbers_across_groups() {
        let catalog = Catalog::standard();
        let text = render(|out| engines(out, &Palette::plain(), &catalog));
        let diesel = text.find("Diesel engines:").unwrap();
        let gasoline = text.find("Gasoline engines:").unwrap();
        assert!(diesel < gasoline);
        assert!(text.contains(" [2] 1.6 TDI (1.6L, 115 HP) - 15,000.00 USD - 110 g/km CO2 - 4.8 l/100km"));
        assert!(text.contains(" [5] Electric Motor (0L, 204 HP) - 30,000.00 USD\n"));
    }

    #[test]
    fn test_configuration_sheet() {
        let catalog = Catalog::standard();
        let mut golf = catalog.vehicles()[0].clone();
        golf.set_engine(catalog.find_engine("1.4 TSI").unwrap().0);
        golf.add_equipment(catalog.equipment()[0].clone());
        golf.set_discount(10.0);

        let text = render(|out| configuration(out, &Palette::plain(), &golf.describe(&catalog)));
        assert!(text.contains("Volkswagen Golf (2023)"));
        assert!(text.contains("Engine: 1.4 TSI"));
        assert!(text.contains("  Comfort:"));
        assert!(text.contains("Category total: 5,000.00 USD"));
        assert!(text.contains("Discount: 10% (9,700.00 USD)"));
        assert!(text.contains("Total price: 87,300.00 USD"));
        assert!(text.contains("Trunk capacity: 380 liters"));
    }

    #[test]
    fn test_comparison_table() {
        let catalog = Catalog::standard();
        let golf = catalog.vehicles()[0].clone();
        let mut engined = golf.clone();
        engined.set_engine(catalog.find_engine("1.4 TSI").unwrap().0);

        let cmp = Comparison::new(&engined, &golf, &catalog);
        let text = render(|out| comparison(out, &Palette::plain(), &cmp));
        assert!(text.contains(&format!("{:>30} | {:>30} | {:>30}", "Engine", "Engine selected", "No engine selected")));
        assert!(text.contains("+12,000.00 USD"));
    }

    #[test]
    fn test_empty_breakdown() {
        let text = render(|out| category_breakdown(out, &Palette::plain(), &[]));
        assert!(text.contains("No equipment added yet."));
    }
}
