//! Journal records and their text renderings

use crate::value::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SHORT_TIME_FORMAT: &str = "%H:%M:%S%.3f";
const FULL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

/// Sequence number of a record within its journal
///
/// Numbers start at 1 and are never reused by the same journal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct RecordNumber(pub u64);

impl RecordNumber {
    /// Create a new record number
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    /// Get the raw value
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

/// How much of a record a rendering includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DescriptionFormat {
    /// One line: number, time of day, description
    #[default]
    Short,
    /// Several lines: number, full date, description, every metadata field
    Extended,
}

impl DescriptionFormat {
    /// Separator placed between records in a multi-record report
    pub fn separator(self) -> &'static str {
        match self {
            DescriptionFormat::Short => "\n",
            DescriptionFormat::Extended => "\n\n",
        }
    }
}

/// A single logged event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    number: RecordNumber,
    description: String,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
}

impl JournalRecord {
    /// Build a record; journals call this with their own counter and clock
    pub fn new(
        description: impl Into<String>,
        metadata: Metadata,
        timestamp: DateTime<Utc>,
        number: RecordNumber,
    ) -> Self {
        Self {
            number,
            description: description.into(),
            timestamp,
            metadata,
        }
    }

    /// Position of the record in its journal
    pub fn number(&self) -> RecordNumber {
        self.number
    }

    /// Text supplied when the record was appended
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the record was appended
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Auxiliary fields attached to the record
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// `#<number> [<HH:MM:SS.mmm>] <description>`
    pub fn short_description(&self) -> String {
        format!(
            "#{} [{}] {}",
            self.number,
            self.timestamp.format(SHORT_TIME_FORMAT),
            self.description
        )
    }

    /// Multi-line rendering with the full date and one line per metadata field
    pub fn extended_description(&self) -> String {
        let mut output = format!(
            "Record #{}\nDate: {}\nDescription: {}\n",
            self.number,
            self.timestamp.format(FULL_TIME_FORMAT),
            self.description
        );

        if self.metadata.is_empty() {
            output.push_str("Info: none");
        } else {
            output.push_str("Info:");
            for (key, value) in &self.metadata {
                output.push_str(&format!("\n    {}: {}", key, value));
            }
        }

        output
    }

    /// Render the record in `format`
    pub fn describe(&self, format: DescriptionFormat) -> String {
        match format {
            DescriptionFormat::Short => self.short_description(),
            DescriptionFormat::Extended => self.extended_description(),
        }
    }
}

impl fmt::Display for JournalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 2, 27, 14, 30, 45).unwrap()
    }

    fn sample_record() -> JournalRecord {
        let mut info = Metadata::new();
        info.insert("order_id".into(), Value::Int(42));
        info.insert("user".into(), "alice".into());
        JournalRecord::new("Order created", info, fixed_time(), RecordNumber(12))
    }

    #[test]
    fn test_short_description() {
        let record = sample_record();
        assert_eq!(
            record.short_description(),
            "#12 [14:30:45.000] Order created"
        );
        assert_eq!(record.to_string(), record.short_description());
    }

    #[test]
    fn test_extended_description() {
        let record = sample_record();
        let expected = "Record #12\n\
                        Date: 2016-02-27 14:30:45.000 UTC\n\
                        Description: Order created\n\
                        Info:\n    order_id: 42\n    user: alice";
        assert_eq!(record.extended_description(), expected);
    }

    #[test]
    fn test_extended_without_metadata() {
        let record = JournalRecord::new("", Metadata::new(), fixed_time(), RecordNumber(1));
        let text = record.extended_description();
        assert!(text.contains("Description: \n"));
        assert!(text.ends_with("Info: none"));
    }

    #[test]
    fn test_describe_dispatch() {
        let record = sample_record();
        assert_eq!(
            record.describe(DescriptionFormat::Short),
            record.short_description()
        );
        assert_eq!(
            record.describe(DescriptionFormat::Extended),
            record.extended_description()
        );
    }

    #[test]
    fn test_record_ron_roundtrip() {
        let record = sample_record();
        let text = ron::to_string(&record).unwrap();
        let parsed: JournalRecord = ron::from_str(&text).unwrap();
        assert_eq!(parsed, record);
    }
}
