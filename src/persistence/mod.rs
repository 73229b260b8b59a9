//! Key-value persistence
//!
//! The binder only ever needs two operations from its store:
//! - `get(key)` yielding the stored string, or `None` if the key was never written
//! - `set(key, value)` overwriting any prior value
//!
//! On the web this is LocalStorage (see `platform::web::LocalStore`). Natively and
//! in tests it is [`MemoryStore`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{AutosaveError, Result};

/// Flat string -> string store with atomic single-key writes
pub trait KeyValueStore {
    /// Read a key. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key, replacing whatever was there.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
///
/// Can be switched into an "unavailable" mode where every call fails, which is
/// how a browser behaves when storage is disabled by policy, or into a
/// read-only mode where only writes fail (quota exceeded).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    unavailable: bool,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read and write fails
    pub fn unavailable() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            unavailable: true,
            read_only: Cell::new(false),
        }
    }

    /// Make every following write fail while reads keep working
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(AutosaveError::StoreUnavailable(
                "memory store disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        if self.read_only.get() {
            return Err(AutosaveError::StoreWrite {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_key_is_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("post_title").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("post_title", "draft").unwrap();
        store.set("post_title", "final").unwrap();
        assert_eq!(store.get("post_title").unwrap().as_deref(), Some("final"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let store = MemoryStore::new();
        store.set("background_video", "").unwrap();
        assert_eq!(store.get("background_video").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_read_only_drops_writes() {
        let store = MemoryStore::new();
        store.set("post_title", "kept").unwrap();
        store.set_read_only(true);

        assert!(matches!(
            store.set("post_title", "lost"),
            Err(AutosaveError::StoreWrite { ref key, .. }) if key == "post_title"
        ));
        assert_eq!(store.get("post_title").unwrap().as_deref(), Some("kept"));

        store.set_read_only(false);
        store.set("post_title", "back").unwrap();
        assert_eq!(store.get("post_title").unwrap().as_deref(), Some("back"));
    }

    #[test]
    fn test_unavailable_store_fails_both_ways() {
        let store = MemoryStore::unavailable();
        assert!(matches!(
            store.get("post_title"),
            Err(AutosaveError::StoreUnavailable(_))
        ));
        assert!(store.set("post_title", "x").is_err());
        assert!(store.is_empty());
    }
}
