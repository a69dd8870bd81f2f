//! Storage trait abstraction.

use std::path::PathBuf;
use async_trait::async_trait;
use crate::record::ConfigRecord;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File does not exist
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File content does not follow the configuration format
    #[error("Malformed configuration at line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Unusable file name
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

/// Storage abstraction for saved configurations.
///
/// Names are user-supplied and normalized by the backend.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Where a configuration with this name lives.
    fn resolve(&self, name: &str) -> Result<PathBuf>;

    /// Save a configuration, returning the path written.
    async fn save(&mut self, name: &str, record: &ConfigRecord) -> Result<PathBuf>;

    /// Load and parse a configuration.
    async fn load(&self, name: &str) -> Result<ConfigRecord>;

    /// Names of saved configurations, sorted.
    async fn list(&self) -> Result<Vec<String>>;

    /// Write a JSON report, returning the path written.
    async fn save_report(&mut self, stem: &str, report: &serde_json::Value) -> Result<PathBuf>;
}
