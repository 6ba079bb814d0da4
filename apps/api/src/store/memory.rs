use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::store::{snapshot_file_name, ContentStore, StoreError};

/// In-memory store for tests. `fail_file_saves` simulates a broken remote save.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Value>>,
    files: Mutex<HashMap<String, Value>>,
    fail_file_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(self, key: &str, value: Value) -> Self {
        self.data.lock().unwrap().insert(key.to_string(), value);
        self
    }

    pub fn with_file(self, section: &str, suffix: &str, value: Value) -> Self {
        let name = snapshot_file_name(section, suffix).unwrap();
        self.files.lock().unwrap().insert(name, value);
        self
    }

    pub fn set_fail_file_saves(&self, fail: bool) {
        self.fail_file_saves.store(fail, Ordering::SeqCst);
    }

    pub fn file(&self, section: &str, suffix: &str) -> Option<Value> {
        let name = snapshot_file_name(section, suffix).ok()?;
        self.files.lock().unwrap().get(&name).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn get_data(&self, key: &str) -> Option<Value> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn save_data(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn save_to_file(
        &self,
        section: &str,
        suffix: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        if self.fail_file_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("simulated failure")));
        }
        let name = snapshot_file_name(section, suffix)?;
        self.files.lock().unwrap().insert(name, value.clone());
        Ok(())
    }

    async fn load_file(&self, section: &str, suffix: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.file(section, suffix))
    }
}
