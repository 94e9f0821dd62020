//! Storage abstraction for karaoke-pal.
//!
//! - [`LocalStore`]: one JSON file per slot under the data directory (default)
//! - [`MemoryStore`]: in-process map, used by tests and when no data directory
//!   can be created
//!
//! The `App` holds a `Box<dyn KeyValueStore>` and all persistence goes through
//! [`load_collection`] / [`save_collection`].

pub mod local;
pub mod memory;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use local::LocalStore;
pub use memory::MemoryStore;

/// The named slots the app persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Setlist,
    SearchHistory,
    RecentlyViewed,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::Setlist,
        StorageKey::SearchHistory,
        StorageKey::RecentlyViewed,
    ];

    /// Name shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            StorageKey::Setlist => "setlist",
            StorageKey::SearchHistory => "search history",
            StorageKey::RecentlyViewed => "recently viewed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Setlist => "karaokePalSetlist",
            StorageKey::SearchHistory => "karaokePalSearchHistory",
            StorageKey::RecentlyViewed => "karaokePalRecentlyViewed",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string-keyed slots.
///
/// Calls are synchronous; the UI is single-threaded and slots are small.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name (e.g., "local", "memory").
    fn backend_name(&self) -> &str;

    /// Read a slot. `Ok(None)` when nothing has been written yet.
    fn read(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace a slot's contents.
    fn write(&self, key: StorageKey, value: &str) -> Result<()>;
}

/// Load a whole collection. Missing, unreadable or corrupt slots yield an
/// empty collection and a warning; this never fails.
pub fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: StorageKey) -> Vec<T> {
    let contents = match store.read(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read {} from {} store: {:#}", key, store.backend_name(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("{} is corrupt, starting fresh: {}", key, e);
            Vec::new()
        }
    }
}

/// Serialize and write a whole collection. Failures are logged and
/// returned; the in-memory collection stays authoritative either way.
pub fn save_collection<'a, T, I>(store: &dyn KeyValueStore, key: StorageKey, items: I) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items: Vec<&T> = items.into_iter().collect();
    let contents = serde_json::to_string(&items)
        .with_context(|| format!("Failed to serialize {}", key))?;

    if let Err(e) = store.write(key, &contents) {
        tracing::warn!("Failed to save {} to {} store: {:#}", key, store.backend_name(), e);
        return Err(e);
    }
    tracing::debug!("Saved {} ({} items)", key, items.len());
    Ok(())
}
