use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{info, warn};

use crate::media::{MediaError, MediaStore, UploadRequest, UploadResponse};

const DELETE_ENDPOINT: &str = "/api/delete-image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody<'a> {
    image_path: &'a str,
}

/// Forwards uploads and deletes to another site's media endpoints.
///
/// Size and type checks run before the request is built, so a rejected file
/// never leaves the process. Requests are not retried.
#[derive(Clone)]
pub struct HttpMediaStore {
    client: Client,
    base_url: String,
}

impl HttpMediaStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MediaError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, req: UploadRequest) -> Result<String, MediaError> {
        req.kind.check_size(req.bytes.len())?;
        req.kind.check_extension(&req.file_name)?;

        let part = Part::bytes(req.bytes.to_vec()).file_name(req.file_name.clone());
        let form = Form::new()
            .part("file", part)
            .text("purpose", req.purpose.clone());

        let response = self
            .client
            .post(self.url(req.kind.endpoint()))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<UploadResponse>(&body).ok();

        match parsed {
            Some(UploadResponse {
                success: true,
                path: Some(path),
                ..
            }) => {
                info!("Remote stored {} as {path}", req.file_name);
                Ok(path)
            }
            Some(UploadResponse { error, .. }) => Err(MediaError::Rejected {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| "upload failed".to_string()),
            }),
            None => {
                warn!("Media backend returned {status} with unreadable body: {body}");
                Err(MediaError::Rejected {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    async fn delete(&self, path: &str) -> Result<(), MediaError> {
        let response = self
            .client
            .delete(self.url(DELETE_ENDPOINT))
            .json(&DeleteBody { image_path: path })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("Remote deleted {path}");
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(MediaError::NotFound(path.to_string()));
        }
        Err(MediaError::Rejected {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::UploadKind;
    use bytes::Bytes;

    // Port 9 (discard) on a reserved TEST-NET address: any request that got
    // this far would fail with an HTTP error, not a size error.
    const UNREACHABLE: &str = "http://192.0.2.1:9";

    #[tokio::test]
    async fn test_oversized_video_is_blocked_before_network() {
        let store = HttpMediaStore::new(UNREACHABLE, Duration::from_millis(50)).unwrap();
        let err = store
            .upload(UploadRequest {
                kind: UploadKind::Video,
                purpose: "project-9".to_string(),
                file_name: "clip.mp4".to_string(),
                bytes: Bytes::from(vec![0u8; 20 * 1024 * 1024 + 1]),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::TooLarge { limit: "20MB" }));
    }

    #[tokio::test]
    async fn test_wrong_type_is_blocked_before_network() {
        let store = HttpMediaStore::new(UNREACHABLE, Duration::from_millis(50)).unwrap();
        let err = store
            .upload(UploadRequest {
                kind: UploadKind::Document,
                purpose: "project-file".to_string(),
                file_name: "malware.exe".to_string(),
                bytes: Bytes::from_static(b"MZ"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedType { .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = HttpMediaStore::new("https://site.example/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            store.url(DELETE_ENDPOINT),
            "https://site.example/api/delete-image"
        );
    }
}
