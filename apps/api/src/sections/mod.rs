//! Editable page sections.
//!
//! A section owns its content for as long as it is mounted. Reads take an
//! `EditContext`; writes take an `EditGrant`, which only an editing context
//! hands out, so view-mode callers cannot reach a mutation by construction.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::store::{ContentStore, StoreError};

pub mod about;
pub mod disclosure;
pub mod handlers;
pub mod projects;

pub use about::AboutSection;
pub use projects::ProjectsSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditContext {
    pub edit_mode: bool,
}

impl EditContext {
    pub const VIEWING: EditContext = EditContext { edit_mode: false };
    pub const EDITING: EditContext = EditContext { edit_mode: true };

    pub fn new(edit_mode: bool) -> Self {
        Self { edit_mode }
    }

    pub fn is_editing(self) -> bool {
        self.edit_mode
    }

    pub fn grant(self) -> Option<EditGrant> {
        self.edit_mode.then_some(EditGrant(()))
    }

    /// The grant, or `Forbidden` for handlers that must refuse in view mode.
    pub fn require(self) -> Result<EditGrant, AppError> {
        self.grant().ok_or(AppError::Forbidden)
    }
}

/// Proof that the caller is in edit mode. Cannot be built outside this module.
#[derive(Debug, Clone, Copy)]
pub struct EditGrant(());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message the editor shows the owner after a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Turns a snapshot write result into the owner-facing message.
    pub fn from_file_save(result: Result<(), StoreError>, success: &str) -> Self {
        match result {
            Ok(()) => Notice::success(success),
            Err(e) => {
                warn!("Saving to file failed: {e}");
                Notice::error("Failed to save to file")
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionResponse<V> {
    pub view: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Writes through the local layer. A failure is logged and the edit stands.
pub(crate) fn persist_local<T: Serialize>(store: &dyn ContentStore, key: &str, value: &T) {
    let result = serde_json::to_value(value)
        .map_err(StoreError::from)
        .and_then(|json| store.save_data(key, &json));
    if let Err(e) = result {
        warn!("Local save of '{key}' failed: {e}");
    }
}

/// Section defaults: the built-in record, replaced by the section's snapshot
/// file when one has been written.
pub(crate) async fn load_defaults<T>(store: &dyn ContentStore, section: &str, suffix: &str) -> T
where
    T: Default + Clone + Serialize + serde::de::DeserializeOwned,
{
    let builtin = T::default();
    match store.load_file(section, suffix).await {
        Ok(Some(snapshot)) => crate::content::merge::overlay(&builtin, &snapshot),
        Ok(None) => builtin,
        Err(e) => {
            warn!("Could not read {section}{suffix} snapshot, using built-in defaults: {e}");
            builtin
        }
    }
}
