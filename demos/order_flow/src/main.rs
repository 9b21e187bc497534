//! Order Flow Example
//!
//! One journal per screen of an order flow, echoed to the console through
//! `tracing`, then sent as a single combined report.

use deepstorm_core::{journal_log, metadata, DescriptionFormat, JournalConfig};
use deepstorm_registry::{JournalPreset, JournalRegistry, RegistryConfig};
use deepstorm_report::{ExportFormat, Report, ReportTransport, Reporter};

/// Prints reports instead of opening a mail composer
struct StdoutTransport;

impl ReportTransport for StdoutTransport {
    fn deliver(&mut self, destinations: &[String], report: &Report) -> deepstorm_report::Result<()> {
        println!("To: {}", destinations.join(", "));
        println!("Subject: {}\n", report.subject);
        println!("{}", report.body);
        for (name, data) in &report.attachments {
            println!("--- {} ({} bytes) ---", name, data.len());
            println!("{}", String::from_utf8_lossy(data));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== DeepStorm Order Flow Example ===\n");

    let registry = JournalRegistry::with_config(RegistryConfig {
        defaults: JournalConfig::with_capacity(100),
        journals: vec![
            JournalPreset::new("templates").with_capacity(5),
            JournalPreset::new("new-order").with_display_name("New order"),
            JournalPreset::new("orders-list").suppressed(),
        ],
    });

    if let Some(templates) = registry.journal_by_name("templates") {
        let mut templates = templates.write();
        for i in 1..=8 {
            journal_log!(templates, "template {} loaded", i);
        }
    }

    let new_order = registry.create_journal("new-order");
    {
        let mut journal = new_order.write();
        journal_log!(journal, metadata! { "screen" => "cart" }; "cart opened with {} items", 3);
        journal_log!(
            journal,
            metadata! { "order" => 42, "total" => 19.5 };
            "order {} submitted",
            42
        );
    }

    let list = registry.create_journal("orders-list");
    list.write().log("list refreshed (not echoed)");

    println!("\nLast two 'New order' records:");
    println!(
        "{}\n",
        new_order.read().report_last(2, DescriptionFormat::Extended)
    );

    let mut reporter = Reporter::new(StdoutTransport);
    reporter.add_destination("qa@example.com");
    reporter.set_format(ExportFormat::Text(DescriptionFormat::Short));

    for name in registry.journal_names() {
        if let Some(journal) = registry.journal_by_name(&name) {
            reporter.add_part_journal(&journal.read())?;
        }
    }
    reporter.perform_all()?;

    Ok(())
}
