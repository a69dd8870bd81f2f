//! Equipment options and their categories.

use serde::{Deserialize, Serialize};

/// An optional equipment item. Identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique name
    pub name: String,

    /// Short description
    pub description: String,

    /// Price
    pub price: f64,

    /// Category
    pub category: EquipmentCategory,
}

impl Equipment {
    /// Create a new equipment item.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: EquipmentCategory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            category,
        }
    }
}

/// Equipment category.
///
/// Declaration order is the display order and defines the persisted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentCategory {
    /// Seats, climate, interior
    Comfort,
    /// Driver assistance and protection
    Safety,
    /// Audio, navigation, screens
    Multimedia,
    /// Paint, wheels, body parts
    Exterior,
    /// Engine and chassis upgrades
    Performance,
}

impl EquipmentCategory {
    /// All categories in display order.
    pub const ALL: [EquipmentCategory; 5] = [
        EquipmentCategory::Comfort,
        EquipmentCategory::Safety,
        EquipmentCategory::Multimedia,
        EquipmentCategory::Exterior,
        EquipmentCategory::Performance,
    ];

    /// Integer code used in saved configuration files.
    pub fn code(self) -> u8 {
        match self {
            EquipmentCategory::Comfort => 0,
            EquipmentCategory::Safety => 1,
            EquipmentCategory::Multimedia => 2,
            EquipmentCategory::Exterior => 3,
            EquipmentCategory::Performance => 4,
        }
    }

    /// Inverse of [`EquipmentCategory::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            EquipmentCategory::Comfort => "Comfort",
            EquipmentCategory::Safety => "Safety",
            EquipmentCategory::Multimedia => "Multimedia",
            EquipmentCategory::Exterior => "Exterior",
            EquipmentCategory::Performance => "Performance",
        }
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of adding or removing equipment.
///
/// None of these are errors: duplicates and misses are reported, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentChange {
    /// Item appended to the list
    Added,
    /// An item with the same name was already selected
    AlreadyPresent,
    /// Item taken off the list
    Removed,
    /// Nothing to remove under that name
    NotFound,
}

impl EquipmentChange {
    /// Whether the equipment list was modified.
    pub fn is_change(self) -> bool {
        matches!(self, EquipmentChange::Added | EquipmentChange::Removed)
    }
}
