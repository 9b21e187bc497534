//! Registry - Directory of named journals
//!
//! The registry maps a unique name to a shared journal handle. It is meant
//! to be built once and passed to whatever needs journal lookup; the
//! lazily-created [`JournalRegistry::shared`] instance exists for code that
//! cannot be handed one.
//!
//! ## Locking
//!
//! The name map sits behind one `RwLock` and every journal behind its own.
//! Operations that create journals check and insert under a single write
//! guard, so a name never maps to two journals.

use crate::config::RegistryConfig;
use deepstorm_core::{EchoSink, Journal, TracingEcho};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Handle to a journal owned by a registry
pub type SharedJournal = Arc<RwLock<Journal>>;

/// Name to journal directory
///
/// ```
/// use deepstorm_registry::JournalRegistry;
///
/// let registry = JournalRegistry::new();
/// registry.create_journals(["templates", "orders"]);
///
/// let orders = registry.journal_by_name("orders").unwrap();
/// orders.write().log("order 42 created");
///
/// assert_eq!(registry.journal_names(), ["templates", "orders"]);
/// assert!(registry.delete_journal("orders"));
/// assert!(registry.journal_by_name("orders").is_none());
/// ```
pub struct JournalRegistry {
    journals: RwLock<IndexMap<String, SharedJournal>>,
    config: RegistryConfig,
    sink: Arc<dyn EchoSink>,
}

impl JournalRegistry {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self {
            journals: RwLock::new(IndexMap::new()),
            config: RegistryConfig::default(),
            sink: Arc::new(TracingEcho),
        }
    }

    /// Create a registry and pre-create every preset in `config`
    pub fn with_config(config: RegistryConfig) -> Self {
        let registry = Self {
            config,
            ..Self::new()
        };
        registry.create_presets();
        registry
    }

    /// Use `sink` for every registered journal, current and future
    pub fn with_sink(mut self, sink: Arc<dyn EchoSink>) -> Self {
        self.sink = sink;
        for journal in self.journals.get_mut().values() {
            journal.write().set_sink(self.sink.clone());
        }
        self
    }

    /// Process-wide registry, created on first use
    pub fn shared() -> &'static JournalRegistry {
        static SHARED: OnceLock<JournalRegistry> = OnceLock::new();
        SHARED.get_or_init(JournalRegistry::new)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Create an empty journal for every name not yet registered
    pub fn create_journals<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut journals = self.journals.write();
        for name in names {
            let name = name.into();
            if !journals.contains_key(&name) {
                let journal = self.build_journal(&name);
                journals.insert(name, journal);
            }
        }
    }

    /// Register a journal under `name`, or return the one already there
    pub fn create_journal(&self, name: impl Into<String>) -> SharedJournal {
        let name = name.into();
        let mut journals = self.journals.write();
        if let Some(existing) = journals.get(&name) {
            return existing.clone();
        }

        let journal = self.build_journal(&name);
        journals.insert(name, journal.clone());
        journal
    }

    /// Register `journal` under `name`, replacing any journal already there
    ///
    /// The journal adopts the registry's echo sink. Returns the replaced
    /// handle. Holders of that handle keep a working journal that is simply
    /// no longer reachable through the registry.
    pub fn register(&self, name: impl Into<String>, mut journal: Journal) -> Option<SharedJournal> {
        let name = name.into();
        journal.set_sink(self.sink.clone());
        let replaced = self
            .journals
            .write()
            .insert(name.clone(), Arc::new(RwLock::new(journal)));
        if replaced.is_some() {
            tracing::debug!(journal = %name, "replaced registered journal");
        } else {
            tracing::debug!(journal = %name, "registered journal");
        }
        replaced
    }

    pub fn journal_by_name(&self, name: &str) -> Option<SharedJournal> {
        self.journals.read().get(name).cloned()
    }

    /// Remove `name` from the registry; returns whether it was present
    pub fn delete_journal(&self, name: &str) -> bool {
        let removed = self.journals.write().shift_remove(name).is_some();
        if removed {
            tracing::debug!(journal = %name, "deleted journal");
        }
        removed
    }

    /// Registered names in registration order
    pub fn journal_names(&self) -> Vec<String> {
        self.journals.read().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.journals.read().contains_key(name)
    }

    /// Number of registered journals
    pub fn len(&self) -> usize {
        self.journals.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.journals.read().is_empty()
    }

    fn create_presets(&self) {
        let names: Vec<String> = self
            .config
            .journals
            .iter()
            .map(|preset| preset.name.clone())
            .collect();
        self.create_journals(names);
    }

    fn build_journal(&self, name: &str) -> SharedJournal {
        let (display_name, settings) = self.config.resolve(name);
        tracing::debug!(
            journal = %name,
            capacity = settings.capacity,
            suppressed = settings.logging_suppressed,
            "created journal"
        );
        let journal = Journal::with_config(display_name, settings).with_sink(self.sink.clone());
        Arc::new(RwLock::new(journal))
    }
}

impl Default for JournalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JournalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JournalRegistry")
            .field("journals", &self.journal_names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalPreset;
    use deepstorm_core::{DescriptionFormat, JournalConfig, MemoryEcho, DEFAULT_CAPACITY};
    use std::thread;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = JournalRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.journal_names().is_empty());
        assert!(registry.journal_by_name("orders").is_none());
    }

    #[test]
    fn test_create_then_lookup_returns_same_journal() {
        let registry = JournalRegistry::new();
        let created = registry.create_journal("Orders");
        let found = registry.journal_by_name("Orders").unwrap();
        assert!(Arc::ptr_eq(&created, &found));
        assert_eq!(found.read().name(), "Orders");
        assert_eq!(found.read().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_create_journal_twice_returns_existing() {
        let registry = JournalRegistry::new();
        let first = registry.create_journal("orders");
        {
            let mut journal = first.write();
            journal.suppress_logging(true);
            journal.log("kept");
        }

        let second = registry.create_journal("orders");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.read().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_delete_journal() {
        let registry = JournalRegistry::new();
        let handle = registry.create_journal("Orders");

        assert!(registry.delete_journal("Orders"));
        assert!(registry.journal_by_name("Orders").is_none());
        assert!(!registry.delete_journal("Orders"));

        // Outstanding handles stay usable.
        handle.write().suppress_logging(true);
        handle.write().log("after delete");
        assert_eq!(handle.read().len(), 1);
    }

    #[test]
    fn test_create_journals_skips_existing() {
        let registry = JournalRegistry::new();
        let orders = registry.create_journal("orders");
        orders.write().suppress_logging(true);
        orders.write().log("existing");

        registry.create_journals(vec!["templates".to_string(), "orders".to_string()]);

        assert_eq!(registry.journal_names(), vec!["orders", "templates"]);
        assert_eq!(registry.journal_by_name("orders").unwrap().read().len(), 1);
    }

    #[test]
    fn test_names_keep_insertion_order_after_delete() {
        let registry = JournalRegistry::new();
        registry.create_journals(["a", "b", "c"]);
        registry.delete_journal("b");
        registry.create_journal("d");
        assert_eq!(registry.journal_names(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_register_replaces() {
        let registry = JournalRegistry::new();
        let old = registry.create_journal("orders");

        let mut fresh = Journal::new("orders v2");
        fresh.suppress_logging(true);
        fresh.log("from replacement");

        let replaced = registry.register("orders", fresh).unwrap();
        assert!(Arc::ptr_eq(&replaced, &old));

        let current = registry.journal_by_name("orders").unwrap();
        assert_eq!(current.read().name(), "orders v2");
        assert!(registry.register("new", Journal::new("new")).is_none());
    }

    #[test]
    fn test_register_adopts_registry_sink() {
        let echo = Arc::new(MemoryEcho::new());
        let registry = JournalRegistry::new().with_sink(echo.clone());
        registry.register("orders", Journal::new("orders"));

        registry.journal_by_name("orders").unwrap().write().log("x");

        assert_eq!(echo.lines().len(), 1);
        assert_eq!(echo.entries()[0].0, "orders");
    }

    #[test]
    fn test_with_config_applies_presets() {
        let config = RegistryConfig {
            defaults: JournalConfig::with_capacity(10),
            journals: vec![
                JournalPreset::new("orders").with_display_name("Order flow"),
                JournalPreset::new("templates").with_capacity(3).suppressed(),
            ],
        };
        let registry = JournalRegistry::with_config(config);

        assert_eq!(registry.journal_names(), vec!["orders", "templates"]);

        let orders = registry.journal_by_name("orders").unwrap();
        assert_eq!(orders.read().name(), "Order flow");
        assert_eq!(orders.read().capacity(), 10);

        let templates = registry.journal_by_name("templates").unwrap();
        assert_eq!(templates.read().capacity(), 3);
        assert!(templates.read().is_logging_suppressed());

        let other = registry.create_journal("other");
        assert_eq!(other.read().capacity(), 10);
    }

    #[test]
    fn test_sink_reaches_created_journals() {
        let echo = Arc::new(MemoryEcho::new());
        let registry = JournalRegistry::with_config(RegistryConfig {
            journals: vec![JournalPreset::new("preset")],
            ..Default::default()
        })
        .with_sink(echo.clone());

        registry.create_journal("late").write().log("late entry");
        registry
            .journal_by_name("preset")
            .unwrap()
            .write()
            .log("preset entry");

        let entries = echo.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "late");
        assert_eq!(entries[1].0, "preset");
    }

    #[test]
    fn test_concurrent_create_yields_one_journal() {
        let registry = Arc::new(JournalRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let journal = registry.create_journal("shared");
                    let mut journal = journal.write();
                    journal.suppress_logging(true);
                    journal.log(format!("from thread {}", i));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
        let journal = registry.journal_by_name("shared").unwrap();
        let journal = journal.read();
        assert_eq!(journal.len(), 8);
        assert_eq!(journal.report(DescriptionFormat::Short).lines().count(), 8);
    }

    #[test]
    fn test_shared_instance_is_stable() {
        let first = JournalRegistry::shared();
        let second = JournalRegistry::shared();
        assert!(std::ptr::eq(first, second));

        first.create_journal("registry-shared-test");
        assert!(second.contains("registry-shared-test"));
        assert!(first.delete_journal("registry-shared-test"));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JournalRegistry>();
        assert_send_sync::<SharedJournal>();
    }
}
