use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::media::{MediaError, UploadKind, UploadRequest, UploadResponse};
use crate::state::AppState;

type UploadResult = (StatusCode, Json<UploadResponse>);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub image_path: String,
}

/// POST /api/upload-image
pub async fn handle_upload_image(state: State<AppState>, multipart: Multipart) -> UploadResult {
    handle_upload(UploadKind::Image, state, multipart).await
}

/// POST /api/upload-video
pub async fn handle_upload_video(state: State<AppState>, multipart: Multipart) -> UploadResult {
    handle_upload(UploadKind::Video, state, multipart).await
}

/// POST /api/upload-file
pub async fn handle_upload_file(state: State<AppState>, multipart: Multipart) -> UploadResult {
    handle_upload(UploadKind::Document, state, multipart).await
}

/// DELETE /api/delete-image
pub async fn handle_delete(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> UploadResult {
    if let Err(refused) = require_edit_mode(&state) {
        return refused;
    }
    match state.media.delete(&req.image_path).await {
        Ok(()) => (
            StatusCode::OK,
            Json(UploadResponse {
                success: true,
                path: None,
                error: None,
            }),
        ),
        Err(e) => failure(media_status(&e), e.to_string()),
    }
}

/// Reads the `file` and `purpose` fields, checks the size limit before the
/// store sees anything, and answers in the `{success, path, error}` shape
/// the editor expects from every upload endpoint.
async fn handle_upload(
    kind: UploadKind,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> UploadResult {
    if let Err(refused) = require_edit_mode(&state) {
        return refused;
    }
    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut purpose = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_failure(e),
        };
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                match field.bytes().await {
                    Ok(data) => file = Some((file_name, data)),
                    Err(e) => return multipart_failure(e),
                }
            }
            "purpose" => match field.text().await {
                Ok(text) => purpose = text,
                Err(e) => return multipart_failure(e),
            },
            _ => {} // ignore unknown fields
        }
    }

    let Some((file_name, bytes)) = file else {
        return failure(
            StatusCode::BAD_REQUEST,
            "Missing required 'file' field".to_string(),
        );
    };

    if let Err(e) = kind.check_size(bytes.len()) {
        return failure(media_status(&e), e.to_string());
    }

    let request = UploadRequest {
        kind,
        purpose,
        file_name,
        bytes,
    };
    match state.media.upload(request).await {
        Ok(path) => (
            StatusCode::OK,
            Json(UploadResponse {
                success: true,
                path: Some(path),
                error: None,
            }),
        ),
        Err(e) => {
            warn!("Upload failed: {e}");
            failure(media_status(&e), e.to_string())
        }
    }
}

fn require_edit_mode(state: &AppState) -> Result<(), UploadResult> {
    match state.edit_context().grant() {
        Some(_) => Ok(()),
        None => Err(failure(
            StatusCode::FORBIDDEN,
            "Edit mode must be enabled to change media".to_string(),
        )),
    }
}

fn media_status(e: &MediaError) -> StatusCode {
    match e {
        MediaError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        MediaError::UnsupportedType { .. } | MediaError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        MediaError::NotFound(_) => StatusCode::NOT_FOUND,
        MediaError::Io(_) | MediaError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        MediaError::Http(_) | MediaError::Rejected { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn multipart_failure(e: MultipartError) -> UploadResult {
    failure(e.status(), e.body_text())
}

fn failure(status: StatusCode, error: String) -> UploadResult {
    (
        status,
        Json(UploadResponse {
            success: false,
            path: None,
            error: Some(error),
        }),
    )
}
