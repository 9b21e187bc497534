//! Reporter - Builds reports from journals and hands them to a transport
//!
//! Two ways to report:
//! - **Simple**: [`Reporter::send_journal`] delivers one journal right away.
//! - **Complex**: [`Reporter::add_part_journal`] queues journals, and
//!   [`Reporter::perform_all`] delivers them together in a single report.
//!
//! Parts are rendered when they are queued, so later appends to a journal
//! do not change a report that is already waiting.

use crate::exporter::{ExportFormat, Exporter};
use crate::report::{Report, ReportTransport};
use crate::{Error, Result};
use deepstorm_core::{DescriptionFormat, Journal};
use indexmap::IndexMap;

/// One journal rendered for a complex report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPart {
    /// Display name of the journal
    pub journal: String,
    /// One-line summary placed in the report body
    pub summary: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Builds journal reports and delivers them through `T`
///
/// ```
/// use deepstorm_core::Journal;
/// use deepstorm_report::{MemoryTransport, Reporter};
///
/// let mut journal = Journal::new("orders");
/// journal.suppress_logging(true);
/// journal.log("order 42 created");
///
/// let mut reporter = Reporter::new(MemoryTransport::new());
/// reporter.add_destination("qa@example.com");
/// reporter.send_journal(&journal)?;
///
/// let delivery = reporter.transport().last().unwrap();
/// assert!(delivery.report.body.contains("order 42 created"));
/// # Ok::<(), deepstorm_report::Error>(())
/// ```
#[derive(Debug)]
pub struct Reporter<T: ReportTransport> {
    transport: T,
    destinations: Vec<String>,
    format: ExportFormat,
    parts: Vec<ReportPart>,
}

impl<T: ReportTransport> Reporter<T> {
    /// Create a reporter that attaches extended text exports
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            destinations: Vec::new(),
            format: ExportFormat::default(),
            parts: Vec::new(),
        }
    }

    /// Add a destination address; duplicates are ignored
    pub fn add_destination(&mut self, destination: impl Into<String>) {
        let destination = destination.into();
        if !self.destinations.contains(&destination) {
            self.destinations.push(destination);
        }
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Format used for journal attachments
    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Deliver one journal: short text in the body, export attached
    pub fn send_journal(&mut self, journal: &Journal) -> Result<()> {
        let exporter = Exporter::new(journal);
        let mut report = Report::new(format!("Journal report: {}", journal.name()))
            .with_body(exporter.to_text(DescriptionFormat::Short));
        report.attach(
            exporter.file_name(self.format),
            exporter.export(self.format)?.into_bytes(),
        );
        self.deliver(&report)
    }

    /// Render `journal` now and queue it for [`Reporter::perform_all`]
    pub fn add_part_journal(&mut self, journal: &Journal) -> Result<()> {
        let exporter = Exporter::new(journal);
        let stats = journal.stats();
        let summary = match (stats.first_number, stats.last_number) {
            (Some(first), Some(last)) => format!(
                "{}: {} records (#{} - #{})",
                journal.name(),
                stats.len,
                first,
                last
            ),
            _ => format!("{}: no records", journal.name()),
        };

        self.parts.push(ReportPart {
            journal: journal.name().to_string(),
            summary,
            file_name: exporter.file_name(self.format),
            data: exporter.export(self.format)?.into_bytes(),
        });
        Ok(())
    }

    /// Parts queued by [`Reporter::add_part_journal`]
    pub fn pending_parts(&self) -> &[ReportPart] {
        &self.parts
    }

    pub fn discard_parts(&mut self) {
        self.parts.clear();
    }

    /// Deliver every queued part in one report
    ///
    /// Parts stay queued if delivery fails.
    pub fn perform_all(&mut self) -> Result<()> {
        if self.parts.is_empty() {
            return Err(Error::NothingToReport);
        }

        let mut body = String::from("Journals in this report:\n");
        let mut report = Report::new(format!("Journal report: {} journals", self.parts.len()));
        for part in &self.parts {
            body.push_str(&format!("- {}\n", part.summary));
            report.attach(part.file_name.clone(), part.data.clone());
        }
        report.body = body;

        self.deliver(&report)?;
        self.parts.clear();
        Ok(())
    }

    /// Deliver a single attachment
    pub fn send_data(&mut self, data: Vec<u8>, file_name: impl Into<String>) -> Result<()> {
        let file_name = file_name.into();
        let mut report = Report::new(format!("Report: {}", file_name));
        report.attach(file_name, data);
        self.deliver(&report)
    }

    /// Deliver several attachments in one report
    pub fn send_files(&mut self, files: IndexMap<String, Vec<u8>>) -> Result<()> {
        if files.is_empty() {
            return Err(Error::NothingToReport);
        }

        let mut report = Report::new(format!("Report: {} files", files.len()));
        for (name, data) in files {
            report.attach(name, data);
        }
        self.deliver(&report)
    }

    fn deliver(&mut self, report: &Report) -> Result<()> {
        if self.destinations.is_empty() {
            return Err(Error::NoDestination);
        }

        match self.transport.deliver(&self.destinations, report) {
            Ok(()) => {
                tracing::debug!(
                    subject = %report.subject,
                    attachments = report.attachments.len(),
                    destinations = self.destinations.len(),
                    "report delivered"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(subject = %report.subject, error = %err, "report delivery failed");
                Err(err)
            }
        }
    }
}
