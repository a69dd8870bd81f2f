//! Storage abstraction and implementations for saved vehicle configurations.
//!
//! This crate provides a trait-based storage interface, the flat
//! `KEY=VALUE` file codec, and a plain file reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod record;
pub mod file_storage;

pub use trait_::{ConfigStore, StorageError, Result};
pub use record::{ConfigRecord, VehicleSection, DATE_FORMAT, FORMAT_VERSION, MAGIC};
pub use file_storage::{normalize, FileStorage, CONFIG_EXTENSION};
