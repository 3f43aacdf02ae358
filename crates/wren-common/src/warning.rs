//! Engine warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the markup scanner, the style cascade, layout and the resource
//! resolver to report input they recovered from.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use strum_macros::{Display, EnumIter};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// The engine component a warning originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Component {
    /// Markup scanning and tree construction.
    #[strum(to_string = "HTML")]
    Html,
    /// Value resolution, stylesheet ingestion and the cascade.
    #[strum(to_string = "CSS")]
    Css,
    /// Block and inline measurement.
    Layout,
    /// Table sizing and cell placement.
    Table,
    /// Image and stylesheet resolution.
    Resource,
    /// The paint pass.
    Paint,
}

/// Warn about recovered input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once(Component::Css, "unknown length unit in '12qq'");
/// ```
pub fn warn_once(component: Component, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[Wren {component}] ⚠ {message}{RESET}");
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_component_labels() {
        let labels: Vec<String> = Component::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            vec!["HTML", "CSS", "Layout", "Table", "Resource", "Paint"]
        );
    }

    /// Serializes the tests that read or reset the process-wide set.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn test_warn_once_deduplicates() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let before = warning_count();

        warn_once(Component::Table, "rowspan runs past the last row");
        assert_eq!(warning_count(), before + 1);

        warn_once(Component::Table, "rowspan runs past the last row");
        assert_eq!(warning_count(), before + 1);
    }

    #[test]
    fn test_same_message_from_another_component_counts() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let before = warning_count();

        warn_once(Component::Css, "unrecognized color 'bleu'");
        warn_once(Component::Paint, "unrecognized color 'bleu'");
        assert_eq!(warning_count(), before + 2);
    }

    #[test]
    fn test_clear_warnings_empties_the_set() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        warn_once(Component::Html, "unmatched closing tag </b>");
        assert!(warning_count() >= 1);

        clear_warnings();
        assert_eq!(warning_count(), 0);

        warn_once(Component::Html, "unmatched closing tag </b>");
        assert_eq!(warning_count(), 1);
    }
}
