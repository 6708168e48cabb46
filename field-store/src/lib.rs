//! Last-Observed Field Cache
//!
//! A small cache mapping protocol field names to their last observed raw
//! values, with built-in change detection. Remote devices report the same
//! fields on every poll cycle; callers use the changed flag returned by
//! [`FieldStore::ingest`] to suppress redundant downstream notifications.
//!
//! # Quick Start
//!
//! ```rust
//! use field_store::FieldStore;
//!
//! let store = FieldStore::new();
//!
//! // First observation of a field is always a change
//! assert!(store.ingest("CurrentChannel", Some("7")));
//!
//! // Re-observing the same value is not
//! assert!(!store.ingest("CurrentChannel", Some("7")));
//!
//! // Invalidation guarantees the next observation reports a change,
//! // even if the device still reports the identical value
//! store.invalidate("CurrentChannel");
//! assert!(store.ingest("CurrentChannel", Some("7")));
//! ```

mod store;

pub use store::FieldStore;
