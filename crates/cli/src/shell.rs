//! Interactive menu loop.
//!
//! Reads one answer per line. Closing the input ends the session the same
//! way as choosing `0`.

use std::io::Write;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;
use vconf_core::EquipmentChange;
use vconf_service::{ConfigError, Configurator, Precondition};
use vconf_storage::ConfigStore;
use crate::art::BANNER;
use crate::render::{self, Palette};

/// Whether the menu loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A parsed numeric answer.
enum Answer {
    Number(usize),
    Cancel,
    Invalid(String),
}

/// Menu-driven front end over a [`Configurator`].
pub struct Shell<S: ConfigStore, R, W> {
    configurator: Configurator<S>,
    input: R,
    out: W,
    palette: Palette,
}

impl<S, R, W> Shell<S, R, W>
where
    S: ConfigStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(configurator: Configurator<S>, input: R, out: W, palette: Palette) -> Self {
        Self { configurator, input, out, palette }
    }

    /// Run the menu until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.palette.title(BANNER))?;
        writeln!(self.out, "{}", self.palette.heading("Welcome to the Vehicle Configurator!"))?;
        writeln!(self.out, "Configure your vehicle with engines, equipment, colors and discounts.")?;

        loop {
            render::main_menu(&mut self.out, &self.palette)?;
            let Some(line) = self.ask(&format!("\n{}", self.palette.bold("Your choice: "))).await? else {
                break;
            };
            debug!(choice = %line, "Menu choice");

            let flow = match line.parse::<usize>() {
                Ok(1) => self.select_vehicle().await?,
                Ok(2) => self.select_engine().await?,
                Ok(3) => self.add_equipment().await?,
                Ok(4) => self.remove_equipment().await?,
                Ok(5) => self.select_color().await?,
                Ok(6) => self.apply_discount().await?,
                Ok(7) => self.display()?,
                Ok(8) => self.visualize()?,
                Ok(9) => self.save().await?,
                Ok(10) => self.load().await?,
                Ok(11) => self.save_for_comparison()?,
                Ok(12) => self.compare()?,
                Ok(13) => self.report().await?,
                Ok(14) => self.equipment_by_category()?,
                Ok(0) => Flow::Quit,
                _ => {
                    self.fail("Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(self.out, "{}", self.palette.heading("Thank you for using Vehicle Configurator!"))?;
        self.out.flush()?;
        Ok(())
    }

    // === Input ===

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn ask_number(&mut self, prompt: &str) -> Result<Option<Answer>> {
        Ok(self.ask(prompt).await?.map(|line| match line.parse::<usize>() {
            Ok(0) => Answer::Cancel,
            Ok(n) => Answer::Number(n),
            Err(_) => Answer::Invalid(line),
        }))
    }

    // === Output ===

    fn succeed(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", self.palette.success(&format!("✓ {text}")))?;
        Ok(())
    }

    fn warn(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", self.palette.warning(&format!("! {text}")))?;
        Ok(())
    }

    fn fail(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", self.palette.failure(&format!("✗ {text}")))?;
        Ok(())
    }

    fn report_error(&mut self, err: &ConfigError) -> Result<Flow> {
        match err {
            ConfigError::PreconditionUnmet(_) => self.warn(&err.to_string())?,
            _ => self.fail(&err.to_string())?,
        }
        Ok(Flow::Continue)
    }

    fn require_vehicle(&mut self) -> Result<bool> {
        if self.configurator.has_selected_vehicle() {
            return Ok(true);
        }
        self.warn("Please select a vehicle first.")?;
        Ok(false)
    }

    // === Menu actions ===

    async fn select_vehicle(&mut self) -> Result<Flow> {
        render::vehicles(&mut self.out, &self.palette, self.configurator.catalog())?;
        let choice = match self.ask_number("\nSelect vehicle number (0 to cancel): ").await? {
            None => return Ok(Flow::Quit),
            Some(Answer::Cancel) => return Ok(Flow::Continue),
            Some(Answer::Invalid(text)) => {
                self.fail(&format!("Not a number: {text:?}"))?;
                return Ok(Flow::Continue);
            }
            Some(Answer::Number(n)) => n,
        };

        match self.configurator.select_vehicle(choice).map(|v| v.label()) {
            Ok(label) => self.succeed(&format!("You've selected: {label}"))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn select_engine(&mut self) -> Result<Flow> {
        if !self.require_vehicle()? {
            return Ok(Flow::Continue);
        }
        render::engines(&mut self.out, &self.palette, self.configurator.catalog())?;
        let choice = match self.ask_number("\nSelect engine number (0 to cancel): ").await? {
            None => return Ok(Flow::Quit),
            Some(Answer::Cancel) => return Ok(Flow::Continue),
            Some(Answer::Invalid(text)) => {
                self.fail(&format!("Not a number: {text:?}"))?;
                return Ok(Flow::Continue);
            }
            Some(Answer::Number(n)) => n,
        };

        match self.configurator.select_engine(choice).map(|e| e.name.clone()) {
            Ok(name) => self.succeed(&format!("Engine selected: {name}"))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn add_equipment(&mut self) -> Result<Flow> {
        if !self.require_vehicle()? {
            return Ok(Flow::Continue);
        }
        render::equipment(&mut self.out, &self.palette, self.configurator.catalog())?;

        let mut prompt = "\nSelect equipment number (0 to finish): ";
        loop {
            match self.ask_number(prompt).await? {
                None => return Ok(Flow::Quit),
                Some(Answer::Cancel) => return Ok(Flow::Continue),
                Some(Answer::Invalid(text)) => self.fail(&format!("Not a number: {text:?}"))?,
                Some(Answer::Number(n)) => match self.configurator.add_equipment(n) {
                    Ok((EquipmentChange::Added, item)) => self.succeed(&format!("Added: {}", item.name))?,
                    Ok((_, item)) => self.warn(&format!("{} is already installed", item.name))?,
                    Err(e) => {
                        self.report_error(&e)?;
                    }
                },
            }
            prompt = "Select next equipment (0 to finish): ";
        }
    }

    async fn remove_equipment(&mut self) -> Result<Flow> {
        let items = match self.configurator.current() {
            None => return self.report_error(&ConfigError::PreconditionUnmet(Precondition::NoVehicle)),
            Some(vehicle) => vehicle.equipment().to_vec(),
        };
        if items.is_empty() {
            return self.report_error(&ConfigError::PreconditionUnmet(Precondition::NoEquipment));
        }

        render::header(&mut self.out, &self.palette, "Remove Equipment")?;
        for (i, item) in items.iter().enumerate() {
            render::menu_item(
                &mut self.out,
                &self.palette,
                i + 1,
                &format!("{} - {}", item.name, render::format_price(item.price)),
            )?;
        }
        render::menu_item(&mut self.out, &self.palette, 0, "Cancel")?;

        let choice = match self.ask_number("\nSelect equipment to remove: ").await? {
            None => return Ok(Flow::Quit),
            Some(Answer::Cancel) => return Ok(Flow::Continue),
            Some(Answer::Invalid(text)) => {
                self.fail(&format!("Not a number: {text:?}"))?;
                return Ok(Flow::Continue);
            }
            Some(Answer::Number(n)) => n,
        };

        match self.configurator.remove_equipment_by_choice(choice) {
            Ok((_, item)) => self.succeed(&format!("Removed: {}", item.name))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn select_color(&mut self) -> Result<Flow> {
        if !self.require_vehicle()? {
            return Ok(Flow::Continue);
        }
        render::colors(&mut self.out, &self.palette, self.configurator.catalog())?;
        let choice = match self.ask_number("\nSelect color number (0 to cancel): ").await? {
            None => return Ok(Flow::Quit),
            Some(Answer::Cancel) => return Ok(Flow::Continue),
            Some(Answer::Invalid(text)) => {
                self.fail(&format!("Not a number: {text:?}"))?;
                return Ok(Flow::Continue);
            }
            Some(Answer::Number(n)) => n,
        };

        match self.configurator.select_color(choice).map(str::to_string) {
            Ok(color) => self.succeed(&format!("Color selected: {color}"))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn apply_discount(&mut self) -> Result<Flow> {
        if !self.require_vehicle()? {
            return Ok(Flow::Continue);
        }
        render::header(&mut self.out, &self.palette, "Apply Discount")?;
        let max = self.configurator.config().max_discount;
        let Some(text) = self.ask(&format!("Enter discount percentage (0-{max}): ")).await? else {
            return Ok(Flow::Quit);
        };

        let Ok(percent) = text.parse::<f64>() else {
            self.fail(&format!("Not a number: {text:?}"))?;
            return Ok(Flow::Continue);
        };
        match self.configurator.apply_discount(percent) {
            Ok(()) => self.succeed(&format!("{percent}% discount applied!"))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    fn display(&mut self) -> Result<Flow> {
        match self.configurator.describe() {
            Ok(snap) => render::configuration(&mut self.out, &self.palette, &snap)?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    fn visualize(&mut self) -> Result<Flow> {
        match self.configurator.describe() {
            Ok(snap) => render::visualization(&mut self.out, &self.palette, &snap)?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn save(&mut self) -> Result<Flow> {
        if !self.require_vehicle()? {
            return Ok(Flow::Continue);
        }
        render::header(&mut self.out, &self.palette, "Save Configuration")?;
        let Some(name) = self.ask("Enter filename (without extension): ").await? else {
            return Ok(Flow::Quit);
        };

        match self.configurator.save_configuration(&name).await {
            Ok(path) => self.succeed(&format!("Configuration saved to {}", path.display()))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn load(&mut self) -> Result<Flow> {
        render::header(&mut self.out, &self.palette, "Load Configuration")?;
        match self.configurator.list_saved().await {
            Ok(names) => render::saved_names(&mut self.out, &self.palette, &names)?,
            Err(e) => {
                self.report_error(&e)?;
            }
        }
        let Some(name) = self.ask("Enter filename (without extension): ").await? else {
            return Ok(Flow::Quit);
        };

        let report = match self.configurator.load_configuration(&name).await {
            Ok(report) => report,
            Err(e) => return self.report_error(&e),
        };
        for skipped in &report.skipped {
            self.warn(&skipped.to_string())?;
        }
        self.succeed(&format!("Configuration loaded from {}: {}", report.path.display(), report.vehicle))?;
        Ok(Flow::Continue)
    }

    fn save_for_comparison(&mut self) -> Result<Flow> {
        match self.configurator.save_for_comparison() {
            Ok(_) => self.succeed("Current configuration saved for comparison.")?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    fn compare(&mut self) -> Result<Flow> {
        match self.configurator.compare_configurations() {
            Ok(cmp) => render::comparison(&mut self.out, &self.palette, &cmp)?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn report(&mut self) -> Result<Flow> {
        match self.configurator.generate_report().await {
            Ok(path) => self.succeed(&format!("Report has been generated: {}", path.display()))?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }

    fn equipment_by_category(&mut self) -> Result<Flow> {
        match self.configurator.equipment_by_category() {
            Ok(groups) => render::category_breakdown(&mut self.out, &self.palette, &groups)?,
            Err(e) => return self.report_error(&e),
        }
        Ok(Flow::Continue)
    }
}
