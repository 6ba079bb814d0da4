//! Content store: the key-value persistence sections write through.
//!
//! `get_data`/`save_data` are the fast local layer every edit writes to.
//! `save_to_file` writes a durable snapshot of a section that later becomes
//! that section's defaults.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod file;
pub mod handlers;
#[cfg(test)]
pub mod memory;

pub use file::FileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot target '{0}'")]
    InvalidTarget(String),
}

/// Persistence seam for section content.
///
/// Carried in `AppState` as `Arc<dyn ContentStore>`. The store is
/// last-write-wins; nothing here versions or locks across writers.
#[async_trait]
pub trait ContentStore: Send + Sync {
    fn get_data(&self, key: &str) -> Option<Value>;

    fn save_data(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    async fn save_to_file(&self, section: &str, suffix: &str, value: &Value)
        -> Result<(), StoreError>;

    async fn load_file(&self, section: &str, suffix: &str) -> Result<Option<Value>, StoreError>;
}

/// File name for a section snapshot, e.g. `("projects", "Info")` → `projectsInfo.json`.
/// Only ASCII alphanumerics, `-` and `_` are accepted so the name cannot escape
/// the content directory.
pub fn snapshot_file_name(section: &str, suffix: &str) -> Result<String, StoreError> {
    let stem = format!("{section}{suffix}");
    let valid = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(StoreError::InvalidTarget(stem));
    }
    Ok(format!("{stem}.json"))
}
