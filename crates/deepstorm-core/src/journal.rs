//! Bounded journal of log records
//!
//! A journal keeps at most `capacity` records and evicts the oldest first.
//! Record numbers come from a counter that lives as long as the journal:
//! neither eviction nor [`Journal::clear`] ever causes a number to be reused.
//!
//! # Example
//!
//! ```rust
//! use deepstorm_core::{DescriptionFormat, Journal, JournalConfig};
//!
//! let mut journal = Journal::with_config("orders", JournalConfig::with_capacity(3));
//! journal.suppress_logging(true);
//!
//! for step in ["A", "B", "C", "D"] {
//!     journal.log(step);
//! }
//!
//! let kept: Vec<&str> = journal.records().map(|r| r.description()).collect();
//! assert_eq!(kept, ["B", "C", "D"]);
//! assert!(journal.report_last(2, DescriptionFormat::Short).ends_with("] D"));
//! ```

use crate::echo::{EchoSink, TracingEcho};
use crate::record::{DescriptionFormat, JournalRecord, RecordNumber};
use crate::value::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::fmt;
use std::iter::Skip;
use std::sync::Arc;

/// Default maximum number of retained records
pub const DEFAULT_CAPACITY: usize = 500;

/// Retention and echo settings for a journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Maximum number of retained records (at least 1)
    pub capacity: usize,
    /// Disable console echo of appended records
    pub logging_suppressed: bool,
}

impl JournalConfig {
    /// Default settings with a specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            logging_suppressed: false,
        }
    }
}

/// Iterator over records, oldest first
pub type Records<'a> = vec_deque::Iter<'a, JournalRecord>;

/// Iterator over the newest records of a journal, oldest of the window first
pub type LastRecords<'a> = Skip<Records<'a>>;

/// Ordered, capacity-bounded store of journal records
///
/// `Journal` does no locking of its own; wrap it (as the registry does)
/// when several threads need it.
#[derive(Clone)]
pub struct Journal {
    name: String,
    config: JournalConfig,
    records: VecDeque<JournalRecord>,
    /// Number handed to the next appended record
    next_number: RecordNumber,
    evicted: u64,
    sink: Arc<dyn EchoSink>,
}

impl Journal {
    /// Create an empty journal with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, JournalConfig::default())
    }

    /// Create an empty journal with custom settings
    pub fn with_config(name: impl Into<String>, config: JournalConfig) -> Self {
        let config = JournalConfig {
            capacity: config.capacity.max(1),
            ..config
        };
        Self {
            name: name.into(),
            records: VecDeque::with_capacity(config.capacity.min(DEFAULT_CAPACITY)),
            config,
            next_number: RecordNumber(1),
            evicted: 0,
            sink: Arc::new(TracingEcho),
        }
    }

    /// Replace the echo sink
    pub fn with_sink(mut self, sink: Arc<dyn EchoSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn set_sink(&mut self, sink: Arc<dyn EchoSink>) {
        self.sink = sink;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Change the capacity, evicting the oldest records if it shrinks
    ///
    /// A capacity of 0 is raised to 1.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.config.capacity = capacity.max(1);
        self.enforce_capacity();
    }

    pub fn is_logging_suppressed(&self) -> bool {
        self.config.logging_suppressed
    }

    /// Enable or disable console echo for this journal
    pub fn suppress_logging(&mut self, suppressed: bool) {
        self.config.logging_suppressed = suppressed;
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record stamped with the next number and the current time
    ///
    /// Never fails: when the journal is full the oldest record is evicted.
    pub fn append(&mut self, description: impl Into<String>, metadata: Metadata) -> RecordNumber {
        self.append_at(description, metadata, Utc::now())
    }

    /// Append a record without metadata
    pub fn log(&mut self, description: impl Into<String>) -> RecordNumber {
        self.append(description, Metadata::new())
    }

    /// Append with an explicit timestamp
    pub fn append_at(
        &mut self,
        description: impl Into<String>,
        metadata: Metadata,
        timestamp: DateTime<Utc>,
    ) -> RecordNumber {
        let number = self.next_number;
        self.next_number = number.next();

        let record = JournalRecord::new(description, metadata, timestamp, number);
        if !self.config.logging_suppressed {
            self.sink.echo(&self.name, &record.short_description());
        }

        self.records.push_back(record);
        self.enforce_capacity();
        number
    }

    /// Remove every record; numbering continues where it left off
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Render every stored record, oldest first
    pub fn report(&self, format: DescriptionFormat) -> String {
        render(self.records(), format)
    }

    /// Render the `count` newest records, oldest of the window first
    pub fn report_last(&self, count: usize, format: DescriptionFormat) -> String {
        render(self.last_records(count), format)
    }

    /// Render one record, or an empty string if it is not stored
    pub fn record_description(&self, number: RecordNumber, format: DescriptionFormat) -> String {
        self.record(number)
            .map(|record| record.describe(format))
            .unwrap_or_default()
    }

    /// Look up a stored record by number
    pub fn record(&self, number: RecordNumber) -> Option<&JournalRecord> {
        self.records
            .binary_search_by_key(&number, JournalRecord::number)
            .ok()
            .and_then(|index| self.records.get(index))
    }

    /// Iterate over stored records, oldest first
    pub fn records(&self) -> Records<'_> {
        self.records.iter()
    }

    /// Iterate over the `count` newest records (all of them if fewer are stored)
    pub fn last_records(&self, count: usize) -> LastRecords<'_> {
        let skip = self.records.len().saturating_sub(count);
        self.records.iter().skip(skip)
    }

    /// Owned copy of the stored records
    pub fn snapshot(&self) -> Vec<JournalRecord> {
        self.records.iter().cloned().collect()
    }

    /// The most recently appended record still stored
    pub fn last(&self) -> Option<&JournalRecord> {
        self.records.back()
    }

    /// Number the next appended record will receive
    pub fn next_number(&self) -> RecordNumber {
        self.next_number
    }

    /// Get statistics about the journal
    pub fn stats(&self) -> JournalStats {
        JournalStats {
            len: self.records.len(),
            capacity: self.config.capacity,
            total_appended: self.next_number.get() - 1,
            evicted: self.evicted,
            first_number: self.records.front().map(JournalRecord::number),
            last_number: self.records.back().map(JournalRecord::number),
            oldest: self.records.front().map(JournalRecord::timestamp),
            newest: self.records.back().map(JournalRecord::timestamp),
        }
    }

    fn enforce_capacity(&mut self) {
        if self.records.len() > self.config.capacity {
            let excess = self.records.len() - self.config.capacity;
            self.records.drain(..excess);
            self.evicted += excess as u64;
        }
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("len", &self.records.len())
            .field("next_number", &self.next_number)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a JournalRecord;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

/// Join record renderings with the separator of `format`
pub fn render<'a>(
    records: impl IntoIterator<Item = &'a JournalRecord>,
    format: DescriptionFormat,
) -> String {
    records
        .into_iter()
        .map(|record| record.describe(format))
        .collect::<Vec<_>>()
        .join(format.separator())
}

/// Statistics about the journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalStats {
    /// Number of stored records
    pub len: usize,
    pub capacity: usize,
    /// Records appended over the journal's lifetime
    pub total_appended: u64,
    /// Records dropped by the capacity limit (clearing is not counted)
    pub evicted: u64,
    pub first_number: Option<RecordNumber>,
    pub last_number: Option<RecordNumber>,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

impl JournalStats {
    /// Get the fill percentage (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f32 {
        self.len as f32 / self.capacity as f32
    }
}
