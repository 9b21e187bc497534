//! Export journal data to various formats

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use deepstorm_core::{inline_fields, DescriptionFormat, Journal, JournalRecord};
use serde::Serialize;
use std::io::Write;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Human-readable text with a summary header
    Text(DescriptionFormat),
    /// RON format (Rust Object Notation)
    Ron,
    /// JSON format (requires serde_json feature)
    Json,
    /// CSV format, one row per record
    Csv,
}

impl ExportFormat {
    /// File extension used for attachments in this format
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text(_) => "txt",
            ExportFormat::Ron => "ron",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Text(DescriptionFormat::Extended)
    }
}

/// Exporter for journal data
pub struct Exporter<'a> {
    journal: &'a Journal,
}

impl<'a> Exporter<'a> {
    /// Create a new exporter
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Export every stored record in the specified format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        self.export_records(self.journal.records().collect(), format)
    }

    /// Export only the `count` newest records
    pub fn export_last(&self, count: usize, format: ExportFormat) -> Result<String> {
        self.export_records(self.journal.last_records(count).collect(), format)
    }

    /// Export to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Attachment file name for this journal, e.g. `orders.csv`
    pub fn file_name(&self, format: ExportFormat) -> String {
        let stem: String = self
            .journal
            .name()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = if stem.is_empty() { "journal" } else { &stem };
        format!("{}.{}", stem, format.extension())
    }

    /// Export to human-readable text format
    pub fn to_text(&self, format: DescriptionFormat) -> String {
        self.text(&self.journal.records().collect::<Vec<_>>(), format)
    }

    /// Export to RON format
    pub fn to_ron(&self) -> Result<String> {
        self.ron(&self.journal.records().collect::<Vec<_>>())
    }

    /// Export to JSON format
    pub fn to_json(&self) -> Result<String> {
        self.json(&self.journal.records().collect::<Vec<_>>())
    }

    /// Export to CSV format
    pub fn to_csv(&self) -> String {
        self.csv(&self.journal.records().collect::<Vec<_>>())
    }

    fn export_records(&self, records: Vec<&JournalRecord>, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text(description) => Ok(self.text(&records, description)),
            ExportFormat::Ron => self.ron(&records),
            ExportFormat::Json => self.json(&records),
            ExportFormat::Csv => Ok(self.csv(&records)),
        }
    }

    fn text(&self, records: &[&JournalRecord], format: DescriptionFormat) -> String {
        let stats = self.journal.stats();
        let mut output = String::new();

        output.push_str(&format!("=== Journal: {} ===\n", self.journal.name()));
        output.push_str(&format!(
            "Records: {} of {} (capacity {}, evicted {})\n",
            records.len(),
            stats.len,
            stats.capacity,
            stats.evicted
        ));
        if let (Some(first), Some(last)) = (records.first(), records.last()) {
            output.push_str(&format!(
                "Numbers: #{} - #{}\n",
                first.number(),
                last.number()
            ));
        }

        output.push('\n');
        output.push_str(&deepstorm_core::render(records.iter().copied(), format));
        output.push('\n');
        output
    }

    fn ron(&self, records: &[&JournalRecord]) -> Result<String> {
        let export = ExportData::new(self.journal, records);
        ron::ser::to_string_pretty(&export, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(feature = "serde_json")]
    fn json(&self, records: &[&JournalRecord]) -> Result<String> {
        let export = ExportData::new(self.journal, records);
        serde_json::to_string_pretty(&export).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    fn json(&self, _records: &[&JournalRecord]) -> Result<String> {
        Err(Error::ExportError(
            "JSON export requires the 'serde_json' feature".to_string(),
        ))
    }

    fn csv(&self, records: &[&JournalRecord]) -> String {
        let mut output = String::new();
        output.push_str("number,timestamp,description,metadata\n");

        for record in records {
            let metadata = inline_fields(record.metadata());

            output.push_str(&format!(
                "{},{},\"{}\",\"{}\"\n",
                record.number(),
                record
                    .timestamp()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                escape_csv(record.description()),
                escape_csv(&metadata)
            ));
        }

        output
    }
}

fn escape_csv(field: &str) -> String {
    field.replace('"', "\"\"")
}

/// Data structure for journal export
#[derive(Debug, Serialize)]
struct ExportData<'a> {
    version: u32,
    name: &'a str,
    stats: ExportStats,
    records: &'a [&'a JournalRecord],
}

impl<'a> ExportData<'a> {
    fn new(journal: &'a Journal, records: &'a [&'a JournalRecord]) -> Self {
        let stats = journal.stats();
        Self {
            version: 1,
            name: journal.name(),
            stats: ExportStats {
                exported: records.len(),
                stored: stats.len,
                capacity: stats.capacity,
                total_appended: stats.total_appended,
                evicted: stats.evicted,
                oldest: records.first().map(|r| r.timestamp()),
                newest: records.last().map(|r| r.timestamp()),
            },
            records,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportStats {
    exported: usize,
    stored: usize,
    capacity: usize,
    total_appended: u64,
    evicted: u64,
    oldest: Option<DateTime<Utc>>,
    newest: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepstorm_core::{metadata, JournalConfig};

    fn create_test_journal() -> Journal {
        let mut journal = Journal::with_config("orders", JournalConfig::with_capacity(3));
        journal.suppress_logging(true);

        journal.log("opened list");
        journal.append("order created", metadata! { "order" => 42 });
        journal.append(
            "said \"hi\"",
            metadata! { "user" => "alice", "tags" => vec!["a", "b"] },
        );
        journal.log("order paid");
        journal
    }

    #[test]
    fn test_export_text() {
        let journal = create_test_journal();
        let text = Exporter::new(&journal).to_text(DescriptionFormat::Short);

        assert!(text.starts_with("=== Journal: orders ===\n"));
        assert!(text.contains("Records: 3 of 3 (capacity 3, evicted 1)"));
        assert!(text.contains("Numbers: #2 - #4"));
        assert!(text.contains(&journal.report(DescriptionFormat::Short)));
        assert!(!text.contains("opened list"));
    }

    #[test]
    fn test_export_last_text() {
        let journal = create_test_journal();
        let text = Exporter::new(&journal)
            .export_last(1, ExportFormat::Text(DescriptionFormat::Extended))
            .unwrap();

        assert!(text.contains("Records: 1 of 3"));
        assert!(text.contains("Description: order paid"));
        assert!(!text.contains("order created"));
    }

    #[test]
    fn test_export_ron() {
        let journal = create_test_journal();
        let ron = Exporter::new(&journal).to_ron().unwrap();

        assert!(ron.contains("version"));
        assert!(ron.contains("records"));
        assert!(ron.contains("order created"));
        assert!(ron.contains("total_appended: 4"));
    }

    #[test]
    fn test_export_csv() {
        let journal = create_test_journal();
        let csv = Exporter::new(&journal).to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "number,timestamp,description,metadata");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2,"));
        assert!(lines[1].ends_with(",\"order created\",\"{order: 42}\""));
        assert!(lines[2].contains("\"said \"\"hi\"\"\""));
        assert!(lines[3].ends_with(",\"order paid\",\"\""));
    }

    #[cfg(not(feature = "serde_json"))]
    #[test]
    fn test_json_requires_feature() {
        let journal = create_test_journal();
        let err = Exporter::new(&journal).export(ExportFormat::Json).unwrap_err();
        assert!(matches!(err, Error::ExportError(_)));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_export_json() {
        let journal = create_test_journal();
        let json = Exporter::new(&journal).to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["name"], "orders");
        assert_eq!(parsed["records"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_export_to_writer() {
        let journal = create_test_journal();
        let mut buffer = Vec::new();
        Exporter::new(&journal)
            .export_to(&mut buffer, ExportFormat::Csv)
            .unwrap();
        assert!(String::from_utf8(buffer).unwrap().starts_with("number,"));
    }

    #[test]
    fn test_file_name() {
        let mut journal = Journal::new("New order / flow");
        let exporter = Exporter::new(&journal);
        assert_eq!(exporter.file_name(ExportFormat::Csv), "New_order___flow.csv");
        assert_eq!(
            exporter.file_name(ExportFormat::Text(DescriptionFormat::Short)),
            "New_order___flow.txt"
        );

        journal.set_name("");
        assert_eq!(
            Exporter::new(&journal).file_name(ExportFormat::Ron),
            "journal.ron"
        );
    }

    #[test]
    fn test_empty_journal_text() {
        let journal = Journal::new("empty");
        let text = Exporter::new(&journal).to_text(DescriptionFormat::Short);
        assert!(text.contains("Records: 0 of 0"));
        assert!(!text.contains("Numbers:"));
    }
}
