use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::media::{
    upload_file_name, MediaError, MediaStore, UploadRequest, UPLOADS_SEGMENT,
};

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Stores uploads as plain files in `<public_dir>/uploads`, served back as `/uploads/<name>`.
pub struct LocalMediaStore {
    uploads_dir: PathBuf,
}

impl LocalMediaStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: public_dir.into().join("uploads"),
        }
    }

    /// Maps `/uploads/<name>` to a file in the uploads dir. Nested paths and
    /// traversal are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, MediaError> {
        let name = path
            .strip_prefix(UPLOADS_SEGMENT)
            .ok_or_else(|| MediaError::InvalidPath(path.to_string()))?;
        if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') || name.contains("..") {
            return Err(MediaError::InvalidPath(path.to_string()));
        }
        Ok(self.uploads_dir.join(name))
    }

    /// Writes `bytes` under `base`, or under `<stem>-<n>.<ext>` when that name
    /// is already taken. Existing files are never overwritten.
    async fn write_new(&self, base: &str, ext: &str, bytes: &[u8]) -> Result<String, MediaError> {
        let stem = base.strip_suffix(&format!(".{ext}")).unwrap_or(base);
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                base.to_string()
            } else {
                format!("{stem}-{attempt}.{ext}")
            };
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.uploads_dir.join(&name))
                .await;
            let mut file = match opened {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(bytes).await?;
            file.flush().await?;
            return Ok(name);
        }
        Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("No free upload name for {base}"),
        )
        .into())
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, req: UploadRequest) -> Result<String, MediaError> {
        req.kind.check_size(req.bytes.len())?;
        let ext = req.kind.check_extension(&req.file_name)?;

        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        let base = upload_file_name(&req.purpose, &ext, Utc::now().timestamp_millis());
        let name = self.write_new(&base, &ext, &req.bytes).await?;

        info!(
            "Stored {:?} upload {name} ({} bytes)",
            req.kind,
            req.bytes.len()
        );
        Ok(format!("{UPLOADS_SEGMENT}{name}"))
    }

    async fn delete(&self, path: &str) -> Result<(), MediaError> {
        let file = self.resolve(path)?;
        match tokio::fs::remove_file(&file).await {
            Ok(()) => {
                info!("Deleted upload {path}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
