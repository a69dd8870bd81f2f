//! Configuration session - selection, pricing, persistence and reporting.

#![warn(missing_docs)]

pub mod error;
pub mod comparison;
pub mod report;
pub mod configurator;

pub use error::{ConfigError, Precondition, Result};
pub use comparison::{Comparison, ComparisonSide};
pub use report::{report_stem, Report};
pub use configurator::{Configurator, ConfiguratorConfig, LoadReport, SessionState, Skipped};
