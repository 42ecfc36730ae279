//! Application settings
//!
//! This module provides the settings record and its persistence:
//! - JSON settings file (human-readable, hand-editable)
//! - Defaults substituted, and written back, when the file is missing or bad
//! - Explicit ownership: the host owns one `AppSettings` and lends it out
//!
//! # Architecture
//!
//! - `types`: `AppSettings`, `Resolution`, `GraphicsDetail`, `SettingsError`
//! - `store`: `SettingsStore` trait, file and in-memory stores, recovery policy
//!
//! # Example Usage
//!
//! ```ignore
//! let mut store = FileSettingsStore::new(FileSettingsStore::default_directory())?;
//! let mut settings = load_or_default(&mut store);
//!
//! settings.volume_main = 3;
//! store.save(&settings)?;
//! ```

pub mod store;
pub mod types;

pub use store::{load_or_default, FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use types::*;
