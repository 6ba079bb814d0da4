//! Uploaded media: size and type rules, the storage seam, and aspect sniffing.
//!
//! `AppState` carries an `Arc<dyn MediaStore>`: `LocalMediaStore` writes under
//! the public directory, `HttpMediaStore` forwards to another site's upload
//! endpoints. Both enforce the same limits before moving any bytes.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aspect;
pub mod handlers;
pub mod local;
pub mod remote;
pub mod resolver;

pub use local::LocalMediaStore;
pub use remote::HttpMediaStore;
pub use resolver::AspectResolver;

const MB: usize = 1024 * 1024;

/// Marks a path as something this site uploaded (and may therefore delete).
pub const UPLOADS_SEGMENT: &str = "/uploads/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Image,
    Video,
    Document,
}

impl UploadKind {
    pub fn max_bytes(self) -> usize {
        match self {
            UploadKind::Image => 5 * MB,
            UploadKind::Video => 20 * MB,
            UploadKind::Document => 10 * MB,
        }
    }

    pub fn limit_label(self) -> &'static str {
        match self {
            UploadKind::Image => "5MB",
            UploadKind::Video => "20MB",
            UploadKind::Document => "10MB",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            UploadKind::Image => "/api/upload-image",
            UploadKind::Video => "/api/upload-video",
            UploadKind::Document => "/api/upload-file",
        }
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["png", "jpg", "jpeg", "gif", "webp", "svg"],
            UploadKind::Video => &["mp4", "webm"],
            UploadKind::Document => &["pdf", "doc", "docx", "hwp", "zip"],
        }
    }

    pub fn check_size(self, len: usize) -> Result<(), MediaError> {
        if len > self.max_bytes() {
            return Err(MediaError::TooLarge {
                limit: self.limit_label(),
            });
        }
        Ok(())
    }

    /// Returns the lowercased extension of `file_name` if this kind accepts it.
    pub fn check_extension(self, file_name: &str) -> Result<String, MediaError> {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !self.allowed_extensions().contains(&ext.as_str()) {
            return Err(MediaError::UnsupportedType {
                kind: self,
                ext,
            });
        }
        Ok(ext)
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("File must be {limit} or smaller")]
    TooLarge { limit: &'static str },

    #[error("Unsupported {kind:?} type '.{ext}'")]
    UnsupportedType { kind: UploadKind, ext: String },

    #[error("Invalid media path '{0}'")]
    InvalidPath(String),

    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media backend rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// A file handed to `MediaStore::upload`. `purpose` becomes the stored name's prefix.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub kind: UploadKind,
    pub purpose: String,
    pub file_name: String,
    pub bytes: Bytes,
}

/// Body of every upload endpoint response, local or remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores the file and returns its site path, e.g. `/uploads/project-1-1700000000000.png`.
    async fn upload(&self, req: UploadRequest) -> Result<String, MediaError>;

    async fn delete(&self, path: &str) -> Result<(), MediaError>;
}

pub fn is_uploaded_path(path: &str) -> bool {
    path.contains(UPLOADS_SEGMENT)
}

pub fn looks_like_video(path: &str) -> bool {
    path.contains(".mp4") || path.contains(".webm")
}

/// Builds `<purpose>-<millis>.<ext>` with the purpose reduced to `[A-Za-z0-9_-]`.
pub fn upload_file_name(purpose: &str, ext: &str, millis: i64) -> String {
    let cleaned: String = purpose
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let prefix = if cleaned.is_empty() { "upload" } else { &cleaned };
    format!("{prefix}-{millis}.{ext}")
}
