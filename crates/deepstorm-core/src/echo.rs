//! Console echo of appended records
//!
//! Every journal owns a sink that receives the short rendering of each
//! appended record, unless logging is suppressed for that journal. The
//! default sink forwards to `tracing`; installing a subscriber is left to
//! the application.

use parking_lot::Mutex;
use std::fmt;

/// Tracing target used for echoed records
pub const ECHO_TARGET: &str = "deepstorm::journal";

/// Line-oriented destination for echoed records
pub trait EchoSink: Send + Sync {
    /// Receive the short line of one appended record
    fn echo(&self, journal: &str, line: &str);
}

/// Forwards echoed lines to `tracing` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEcho;

impl EchoSink for TracingEcho {
    fn echo(&self, journal: &str, line: &str) {
        tracing::info!(target: ECHO_TARGET, journal = %journal, "{}", line);
    }
}

/// Keeps echoed lines in memory
///
/// ```
/// use std::sync::Arc;
/// use deepstorm_core::{Journal, MemoryEcho};
///
/// let echo = Arc::new(MemoryEcho::new());
/// let mut journal = Journal::new("orders").with_sink(echo.clone());
/// journal.log("created");
///
/// assert_eq!(echo.lines().len(), 1);
/// ```
#[derive(Default)]
pub struct MemoryEcho {
    lines: Mutex<Vec<(String, String)>>,
}

impl MemoryEcho {
    pub fn new() -> Self {
        Self::default()
    }

    /// All echoed lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, line)| line).collect()
    }

    /// Echoed lines paired with the name of the journal that produced them
    pub fn entries(&self) -> Vec<(String, String)> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl EchoSink for MemoryEcho {
    fn echo(&self, journal: &str, line: &str) {
        self.lines
            .lock()
            .push((journal.to_string(), line.to_string()));
    }
}

impl fmt::Debug for MemoryEcho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEcho")
            .field("lines", &self.lines.lock().len())
            .finish()
    }
}
