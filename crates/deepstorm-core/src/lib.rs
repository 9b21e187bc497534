//! DeepStorm Core - Bounded in-memory journals
//!
//! This crate provides the record store that the rest of DeepStorm builds on:
//! - Dynamic metadata values (`Value`, `Metadata`)
//! - Immutable records with short and extended renderings (`JournalRecord`)
//! - Capacity-bounded journals with FIFO eviction (`Journal`)
//! - Console echo of appended records (`EchoSink`)
//!
//! Journals are plain single-owner data structures. Use `deepstorm-registry`
//! to share named journals across a process.

#[macro_use]
mod macros;

mod echo;
pub mod journal;
mod record;
mod value;

pub use echo::{EchoSink, MemoryEcho, TracingEcho, ECHO_TARGET};
pub use journal::{
    render, Journal, JournalConfig, JournalStats, LastRecords, Records, DEFAULT_CAPACITY,
};
pub use record::{DescriptionFormat, JournalRecord, RecordNumber};
pub use value::{inline_fields, Metadata, Value};
