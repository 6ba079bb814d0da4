use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn};

use crate::store::{snapshot_file_name, ContentStore, StoreError};

const LOCAL_STORE_FILE: &str = "local-store.json";

/// Durable content store rooted at a directory.
///
/// Layout:
/// - `local-store.json`: the whole key-value map, rewritten on every `save_data`
/// - `<section><Suffix>.json`: one pretty-printed snapshot per `save_to_file` target
///
/// All writes go through a temp file in the same directory and are renamed
/// into place, so readers never observe a half-written file.
pub struct FileStore {
    dir: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl FileStore {
    /// Opens (creating if needed) the store at `dir` and loads the key-value map.
    /// A corrupt map file is logged and replaced on the next write.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create content dir {}", dir.display()))?;

        let entries = match std::fs::read(dir.join(LOCAL_STORE_FILE)) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, Value>>(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Ignoring unreadable {LOCAL_STORE_FILE}: {e}");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e).context("Failed to read local store"),
        };

        info!(
            "Content store opened at {} ({} keys)",
            dir.display(),
            entries.len()
        );

        Ok(Self {
            dir,
            entries: RwLock::new(entries),
        })
    }
}

#[async_trait]
impl ContentStore for FileStore {
    fn get_data(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// The map only keeps the new value once it is on disk. The write lock is
    /// held throughout so concurrent saves hit disk in order.
    fn save_data(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let previous = entries.insert(key.to_string(), value.clone());
        let written = serde_json::to_vec(&*entries)
            .map_err(StoreError::from)
            .and_then(|bytes| blocking(|| write_atomic(&self.dir, LOCAL_STORE_FILE, &bytes)));

        if let Err(e) = written {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        debug!("Saved key '{key}'");
        Ok(())
    }

    async fn save_to_file(
        &self,
        section: &str,
        suffix: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        let name = snapshot_file_name(section, suffix)?;
        let bytes = serde_json::to_vec_pretty(value)?;
        let dir = self.dir.clone();
        let target = name.clone();

        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &bytes))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))??;

        info!("Wrote snapshot {name}");
        Ok(())
    }

    async fn load_file(&self, section: &str, suffix: &str) -> Result<Option<Value>, StoreError> {
        let name = snapshot_file_name(section, suffix)?;
        match tokio::fs::read(self.dir.join(&name)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Runs disk work without stalling the other tasks on a multi-threaded
/// runtime's worker. Elsewhere it simply runs inline.
fn blocking<T>(work: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(work)
        }
        _ => work(),
    }
}

fn write_atomic(dir: &Path, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dir.join(name)).map_err(|e| e.error)?;
    Ok(())
}
