//! Local storage backend: one JSON file per slot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{KeyValueStore, StorageKey};

pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    /// Default location: `<data dir>/karaoke-pal`
    pub fn default_dir() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Failed to get data directory")?
            .join("karaoke-pal"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn slot_path(&self, key: StorageKey) -> PathBuf {
        self.data_dir.join(format!("{}.json", key.as_str()))
    }
}

impl KeyValueStore for LocalStore {
    fn backend_name(&self) -> &str {
        "local"
    }

    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<()> {
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::song;
    use crate::model::Song;
    use crate::storage::{load_collection, save_collection};

    #[test]
    fn test_unwritten_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        assert!(store.read(StorageKey::SearchHistory).unwrap().is_none());
    }

    #[test]
    fn test_write_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        store.write(StorageKey::Setlist, "[]").unwrap();

        let path = dir.path().join("karaokePalSetlist.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
        assert!(!dir.path().join("karaokePalSetlist.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = LocalStore::new(&nested).unwrap();

        store.write(StorageKey::RecentlyViewed, "[]").unwrap();
        assert!(nested.join("karaokePalRecentlyViewed.json").exists());
    }

    #[test]
    fn test_collections_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let songs = vec![song("Livin' on a Prayer", "Bon Jovi")];

        {
            let store = LocalStore::new(dir.path()).unwrap();
            save_collection(&store, StorageKey::RecentlyViewed, &songs).unwrap();
        }

        let store = LocalStore::new(dir.path()).unwrap();
        let loaded: Vec<Song> = load_collection(&store, StorageKey::RecentlyViewed);
        assert_eq!(loaded, songs);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("karaokePalSetlist.json"), "garbage").unwrap();

        let store = LocalStore::new(dir.path()).unwrap();
        let loaded: Vec<Song> = load_collection(&store, StorageKey::Setlist);
        assert!(loaded.is_empty());
    }
}
