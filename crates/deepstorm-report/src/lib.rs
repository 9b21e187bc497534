//! DeepStorm Report - Journal exports and report dispatch
//!
//! This crate turns journals into something that can leave the process:
//!
//! - **Exporter**: Render a journal as text, RON, JSON or CSV
//! - **Reporter**: Assemble simple or multi-journal reports
//! - **ReportTransport**: Seam for the platform layer that actually sends them
//!
//! # Example
//!
//! ```rust
//! use deepstorm_core::{DescriptionFormat, Journal};
//! use deepstorm_report::{ExportFormat, Exporter, MemoryTransport, Reporter};
//!
//! let mut orders = Journal::new("orders");
//! orders.suppress_logging(true);
//! orders.log("order 42 created");
//!
//! // Export for external analysis
//! let csv = Exporter::new(&orders).export(ExportFormat::Csv)?;
//! assert!(csv.contains("order 42 created"));
//!
//! // Queue several journals and send them together
//! let mut reporter = Reporter::new(MemoryTransport::new());
//! reporter.add_destination("qa@example.com");
//! reporter.set_format(ExportFormat::Text(DescriptionFormat::Extended));
//! reporter.add_part_journal(&orders)?;
//! reporter.perform_all()?;
//!
//! assert_eq!(reporter.transport().deliveries().len(), 1);
//! # Ok::<(), deepstorm_report::Error>(())
//! ```

mod error;
mod exporter;
mod report;
mod reporter;

pub use error::{Error, Result};
pub use exporter::{ExportFormat, Exporter};
pub use report::{Delivery, MemoryTransport, Report, ReportTransport};
pub use reporter::{ReportPart, Reporter};

// Re-export core journal types for convenience
pub use deepstorm_core::{DescriptionFormat, Journal, JournalRecord};
