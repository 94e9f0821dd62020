use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use super::{KeyValueStore, StorageKey};

/// Non-durable store; contents vanish with the process
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let slots = self.slots.lock().map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?;
        Ok(slots.get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?;
        slots.insert(key, value.to_string());
        Ok(())
    }
}
