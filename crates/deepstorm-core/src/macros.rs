//! Formatting helpers for call sites

/// Build a [`Metadata`](crate::Metadata) map from `key => value` pairs
///
/// ```
/// use deepstorm_core::{metadata, Value};
///
/// let info = metadata! { "order" => 42, "user" => "alice" };
/// assert_eq!(info["order"], Value::Int(42));
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Metadata::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}

/// Append a `format!`-style description to a journal
///
/// An optional metadata expression goes before a `;`. Expands to the
/// [`RecordNumber`](crate::RecordNumber) of the new record.
///
/// ```
/// use deepstorm_core::{journal_log, metadata, Journal};
///
/// let mut journal = Journal::new("orders");
/// journal.suppress_logging(true);
///
/// journal_log!(journal, "order {} created", 42);
/// journal_log!(journal, metadata! { "total" => 9.5 }; "order {} paid", 42);
///
/// assert_eq!(journal.len(), 2);
/// assert_eq!(journal.last().unwrap().description(), "order 42 paid");
/// ```
#[macro_export]
macro_rules! journal_log {
    ($journal:expr, $metadata:expr; $($arg:tt)+) => {
        $journal.append(::std::format!($($arg)+), $metadata)
    };
    ($journal:expr, $($arg:tt)+) => {
        $journal.append(::std::format!($($arg)+), $crate::Metadata::new())
    };
}
