//! Field storage and change detection

use std::collections::HashMap;

use parking_lot::Mutex;

/// Cache of last-observed raw field values with change detection
///
/// A field that is present in the cache has been observed at least once;
/// absence means no observation yet. An observed-but-absent value is stored
/// as the empty string, so two consecutive absent observations compare
/// equal and are not reported as a change.
///
/// All operations take the internal lock, so the compare-then-store in
/// [`ingest`](FieldStore::ingest) is atomic with respect to concurrent
/// [`invalidate`](FieldStore::invalidate) calls.
pub struct FieldStore {
    fields: Mutex<HashMap<String, String>>,
}

impl FieldStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            fields: Mutex::new(HashMap::new()),
        }
    }

    /// Record an observation, returning whether the value changed
    ///
    /// A previously-unseen field is always a change. Otherwise the new
    /// value (absent normalized to the empty string) is compared by exact
    /// string match against the stored value; on a mismatch the new value
    /// is stored and `true` is returned.
    pub fn ingest(&self, field: &str, value: Option<&str>) -> bool {
        let normalized = value.unwrap_or("");
        let mut fields = self.fields.lock();

        let changed = match fields.get(field) {
            None => true,
            Some(stored) => stored != normalized,
        };

        if changed {
            fields.insert(field.to_string(), normalized.to_string());
        }

        changed
    }

    /// Get the stored value for a field
    ///
    /// Returns `None` if the field has never been observed. An
    /// observed-but-absent value reads back as the empty string.
    pub fn get(&self, field: &str) -> Option<String> {
        self.fields.lock().get(field).cloned()
    }

    /// Force-clear a field's stored value without reporting a change
    ///
    /// The field is set to the empty string, so the next [`ingest`] of any
    /// non-empty value is treated as a change even if the device still
    /// reports the value that was stored before. Used after issuing a
    /// write command to defeat false-negative diffing.
    ///
    /// [`ingest`]: FieldStore::ingest
    pub fn invalidate(&self, field: &str) {
        self.fields.lock().insert(field.to_string(), String::new());
    }

    /// Wipe the entire cache
    ///
    /// Every field reverts to never-observed, so a full round of change
    /// notifications follows on the next poll.
    pub fn clear(&self) {
        self.fields.lock().clear();
    }

    /// Number of fields observed at least once
    pub fn len(&self) -> usize {
        self.fields.lock().len()
    }

    /// Check whether no field has been observed yet
    pub fn is_empty(&self) -> bool {
        self.fields.lock().is_empty()
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldStore")
            .field("field_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_is_a_change() {
        let store = FieldStore::new();

        assert!(store.ingest("BrowserURL", Some("http://example.org")));
        assert_eq!(store.get("BrowserURL").as_deref(), Some("http://example.org"));
    }

    #[test]
    fn test_repeated_value_is_not_a_change() {
        let store = FieldStore::new();

        assert!(store.ingest("ProgramTitle", Some("News")));
        assert!(!store.ingest("ProgramTitle", Some("News")));
        assert!(store.ingest("ProgramTitle", Some("Weather")));
    }

    #[test]
    fn test_absent_after_never_observed_is_a_change() {
        let store = FieldStore::new();

        assert!(store.ingest("ProgramTitle", None));
        // Stored as empty string; a second absent observation compares equal
        assert!(!store.ingest("ProgramTitle", None));
        assert_eq!(store.get("ProgramTitle").as_deref(), Some(""));
    }

    #[test]
    fn test_absent_equals_empty_string() {
        let store = FieldStore::new();

        assert!(store.ingest("ChannelName", Some("")));
        assert!(!store.ingest("ChannelName", None));
    }

    #[test]
    fn test_invalidate_forces_reannounce() {
        let store = FieldStore::new();

        assert!(store.ingest("CurrentExternalSource", Some("HDMI1")));
        assert!(!store.ingest("CurrentExternalSource", Some("HDMI1")));

        store.invalidate("CurrentExternalSource");

        // Same value as before the invalidation, still reported as changed
        assert!(store.ingest("CurrentExternalSource", Some("HDMI1")));
    }

    #[test]
    fn test_invalidate_unknown_field_marks_it_observed() {
        let store = FieldStore::new();

        store.invalidate("BrowserURL");
        assert_eq!(store.get("BrowserURL").as_deref(), Some(""));
        assert!(!store.ingest("BrowserURL", None));
    }

    #[test]
    fn test_clear_resets_to_never_observed() {
        let store = FieldStore::new();

        store.ingest("CurrentChannel", Some("7"));
        store.ingest("BrowserURL", Some("http://example.org"));
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(store.get("CurrentChannel").is_none());
        assert!(store.ingest("CurrentChannel", Some("7")));
    }

    #[test]
    fn test_fields_are_independent() {
        let store = FieldStore::new();

        assert!(store.ingest("CurrentChannel", Some("7")));
        assert!(store.ingest("BrowserURL", Some("http://example.org")));
        assert!(!store.ingest("CurrentChannel", Some("7")));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ingesting the same (field, value) twice yields changed then unchanged
        #[test]
        fn diff_is_idempotent(field in "[A-Za-z]{1,16}", value in ".{0,32}") {
            let store = FieldStore::new();
            prop_assert!(store.ingest(&field, Some(&value)));
            prop_assert!(!store.ingest(&field, Some(&value)));
        }

        /// After invalidation, any non-empty value is re-announced
        #[test]
        fn invalidate_defeats_diff(field in "[A-Za-z]{1,16}", value in ".{1,32}") {
            let store = FieldStore::new();
            store.ingest(&field, Some(&value));
            store.invalidate(&field);
            prop_assert!(store.ingest(&field, Some(&value)));
        }

        /// Stored value always reflects the latest changed ingest
        #[test]
        fn get_returns_last_ingested(field in "[A-Za-z]{1,16}", values in proptest::collection::vec(".{0,16}", 1..8)) {
            let store = FieldStore::new();
            for v in &values {
                store.ingest(&field, Some(v));
            }
            prop_assert_eq!(store.get(&field), values.last().cloned());
        }
    }
}
