//! DeepStorm Registry - Named journals shared across a process
//!
//! One journal per user story or screen is the usual layout:
//!
//! ```text
//! JournalRegistry
//!  ├── "templates"  → Arc<RwLock<Journal>>
//!  ├── "orders"     → Arc<RwLock<Journal>>
//!  └── "orders-list"→ Arc<RwLock<Journal>>
//! ```
//!
//! ## Key Components
//!
//! - [`JournalRegistry`]: name to journal map with create/lookup/delete
//! - [`RegistryConfig`]: RON-loadable defaults and per-journal presets
//!
//! Creating a journal under a name that is already registered returns the
//! existing journal. Use [`JournalRegistry::register`] to replace one.

mod config;
mod error;
mod registry;

pub use config::{JournalPreset, RegistryConfig};
pub use error::{Error, Result};
pub use registry::{JournalRegistry, SharedJournal};

// Re-export core journal types for convenience
pub use deepstorm_core::{DescriptionFormat, Journal, JournalConfig, JournalRecord, RecordNumber};
