//! Errors reported by the configurator.

use std::path::PathBuf;
use vconf_storage::StorageError;

/// Result type for configurator operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Something the session needs before an operation can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// No vehicle has been selected
    NoVehicle,
    /// No configuration was saved for comparison
    NoComparison,
    /// The current vehicle has no equipment
    NoEquipment,
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Precondition::NoVehicle => "No vehicle selected yet",
            Precondition::NoComparison => "No configuration saved for comparison",
            Precondition::NoEquipment => "No equipment to remove",
        })
    }
}

/// Errors that can occur during a configuration session.
///
/// All of these are recoverable: the session state is unchanged when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Menu choice outside `1..=max`
    #[error("Invalid {what} selection {index} (choose 1-{max})")]
    InvalidSelection {
        /// What was being selected
        what: &'static str,
        /// The rejected choice
        index: usize,
        /// Highest valid choice
        max: usize,
    },

    /// Operation needs state that is not there yet
    #[error("{0}")]
    PreconditionUnmet(Precondition),

    /// Discount outside the allowed policy range
    #[error("Discount {percent}% is outside the allowed range 0-{max}%")]
    DiscountOutOfRange {
        /// Rejected value
        percent: f64,
        /// Upper bound in effect
        max: f64,
    },

    /// Configuration file does not exist
    #[error("Cannot open file: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Configuration file exists but could not be read or written
    #[error("File error: {0}")]
    FileUnreadable(String),

    /// Configuration file content is invalid
    #[error("Malformed configuration at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Saved vehicle is not in the catalog
    #[error("No matching vehicle found in catalog: {brand} {model}")]
    CatalogMismatch {
        /// Saved brand
        brand: String,
        /// Saved model
        model: String,
    },

    /// Unusable file name
    #[error("Invalid file name {0:?}")]
    InvalidName(String),

    /// Report could not be produced
    #[error("Report error: {0}")]
    Report(String),
}

impl From<StorageError> for ConfigError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => ConfigError::FileNotFound(path),
            StorageError::Malformed { line, reason } => ConfigError::MalformedRecord { line, reason },
            StorageError::InvalidName(name) => ConfigError::InvalidName(name),
            StorageError::Io(e) => ConfigError::FileUnreadable(e.to_string()),
            StorageError::Json(e) => ConfigError::Report(e.to_string()),
        }
    }
}
