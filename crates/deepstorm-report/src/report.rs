//! Reports and the transports that deliver them
//!
//! A [`Report`] is what leaves the process: a subject, a text body and any
//! number of named attachments. Delivery itself (a mail composer, an upload,
//! a file drop) lives behind [`ReportTransport`].

use crate::Result;
use indexmap::IndexMap;

/// A rendered report ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub subject: String,
    pub body: String,
    /// File name to contents, in the order they were attached
    pub attachments: IndexMap<String, Vec<u8>>,
}

impl Report {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a file; an existing name gets a numeric suffix
    pub fn attach(&mut self, file_name: impl Into<String>, data: Vec<u8>) -> &str {
        let name = unique_name(&self.attachments, file_name.into());
        let index = self.attachments.insert_full(name, data).0;
        self.attachments
            .get_index(index)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    pub fn attachment(&self, file_name: &str) -> Option<&[u8]> {
        self.attachments.get(file_name).map(Vec::as_slice)
    }
}

fn unique_name(existing: &IndexMap<String, Vec<u8>>, name: String) -> String {
    if !existing.contains_key(&name) {
        return name;
    }

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem.to_string(), format!(".{}", extension)),
        _ => (name.clone(), String::new()),
    };

    (2..)
        .map(|n| format!("{}-{}{}", stem, n, extension))
        .find(|candidate| !existing.contains_key(candidate))
        .unwrap_or(name)
}

/// Delivers reports to their destinations
///
/// Implemented by the platform layer, e.g. a mail composer that presents the
/// report to the user and reports back whether it was sent.
pub trait ReportTransport {
    fn deliver(&mut self, destinations: &[String], report: &Report) -> Result<()>;
}

/// A report handed to a [`MemoryTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub destinations: Vec<String>,
    pub report: Report,
}

/// Transport that keeps delivered reports in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    deliveries: Vec<Delivery>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered reports, oldest first
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn last(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }

    pub fn take(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries)
    }
}

impl ReportTransport for MemoryTransport {
    fn deliver(&mut self, destinations: &[String], report: &Report) -> Result<()> {
        self.deliveries.push(Delivery {
            destinations: destinations.to_vec(),
            report: report.clone(),
        });
        Ok(())
    }
}

impl<T: ReportTransport + ?Sized> ReportTransport for &mut T {
    fn deliver(&mut self, destinations: &[String], report: &Report) -> Result<()> {
        (**self).deliver(destinations, report)
    }
}
