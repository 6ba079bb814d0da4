pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::media::{self, UploadKind};
use crate::sections::handlers as sections;
use crate::state::AppState;
use crate::store;

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let uploads_dir = state.config.public_dir.join("uploads");

    // Oversized files must reach the handler to get the JSON rejection.
    let uploads = Router::new()
        .route("/api/upload-image", post(media::handlers::handle_upload_image))
        .route("/api/upload-video", post(media::handlers::handle_upload_video))
        .route("/api/upload-file", post(media::handlers::handle_upload_file))
        .layer(DefaultBodyLimit::max(
            UploadKind::Video.max_bytes() + MULTIPART_OVERHEAD,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(uploads)
        .route("/api/delete-image", delete(media::handlers::handle_delete))
        // Content store
        .route(
            "/api/data/:key",
            get(store::handlers::handle_get_data).put(store::handlers::handle_put_data),
        )
        .route("/api/save-to-file", post(store::handlers::handle_save_to_file))
        // Edit mode
        .route(
            "/api/v1/edit-mode",
            get(sections::handle_get_edit_mode).put(sections::handle_put_edit_mode),
        )
        // About section
        .route(
            "/api/v1/sections/about",
            get(sections::handle_get_about).patch(sections::handle_patch_about),
        )
        .route(
            "/api/v1/sections/about/background",
            put(sections::handle_put_about_background),
        )
        .route("/api/v1/sections/about/save", post(sections::handle_save_about))
        .route(
            "/api/v1/sections/about/experience-cards",
            post(sections::handle_add_experience_card),
        )
        .route(
            "/api/v1/sections/about/experience-cards/:index",
            patch(sections::handle_update_experience_card)
                .delete(sections::handle_remove_experience_card),
        )
        .route("/api/v1/sections/about/skills", post(sections::handle_add_skill))
        .route(
            "/api/v1/sections/about/skills/:index",
            patch(sections::handle_update_skill).delete(sections::handle_remove_skill),
        )
        .route("/api/v1/sections/about/story", post(sections::handle_add_paragraph))
        .route(
            "/api/v1/sections/about/story/:index",
            patch(sections::handle_update_paragraph).delete(sections::handle_remove_paragraph),
        )
        .route("/api/v1/sections/about/hobbies", post(sections::handle_add_hobby))
        .route(
            "/api/v1/sections/about/hobbies/:index",
            patch(sections::handle_update_hobby).delete(sections::handle_remove_hobby),
        )
        // Projects section
        .route(
            "/api/v1/sections/projects",
            get(sections::handle_get_projects).patch(sections::handle_patch_projects),
        )
        .route(
            "/api/v1/sections/projects/background",
            put(sections::handle_put_projects_background),
        )
        .route("/api/v1/sections/projects/items", post(sections::handle_add_project))
        .route(
            "/api/v1/sections/projects/items/:index",
            patch(sections::handle_update_project).delete(sections::handle_remove_project),
        )
        .route(
            "/api/v1/sections/projects/drafts/discard",
            post(sections::handle_discard_draft),
        )
        .route("/api/v1/sections/projects/load-more", post(sections::handle_load_more))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::path::Path;
    use tower::ServiceExt;

    const BOUNDARY: &str = "portfolio-test-boundary";

    async fn test_app(dir: &Path) -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            content_dir: dir.join("content"),
            public_dir: dir.join("public"),
            media_backend_url: None,
            media_timeout_secs: 1,
        };
        let state = AppState::from_config(config).await.unwrap();
        build_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn enable_edit_mode(app: &Router) {
        let response = send(app, Method::PUT, "/api/v1/edit-mode", Some(json!({ "enabled": true }))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    fn multipart_upload(uri: &str, file_name: &str, purpose: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"purpose\"\r\n\r\n{purpose}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_mutation_outside_edit_mode_is_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/sections/about",
            Some(json!({ "field": "title", "value": "Nope" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");

        let response = send(&app, Method::DELETE, "/api/v1/sections/projects/items/0", None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_edit_mode_toggle_reports_reload() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let response = send(&app, Method::PUT, "/api/v1/edit-mode", Some(json!({ "enabled": true }))).await;
        assert_eq!(body_json(response).await["reloaded"], true);

        let response = send(&app, Method::PUT, "/api/v1/edit-mode", Some(json!({ "enabled": true }))).await;
        assert_eq!(body_json(response).await["reloaded"], false);

        let response = send(&app, Method::GET, "/api/v1/edit-mode", None).await;
        assert_eq!(body_json(response).await["editMode"], true);
    }

    #[tokio::test]
    async fn test_about_edits_persist_locally_until_saved() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/sections/about",
            Some(json!({ "field": "title", "value": "Who I am" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["view"]["title"], "Who I am");
        assert!(body.get("notice").is_none());

        let response = send(&app, Method::POST, "/api/v1/sections/about/hobbies", None).await;
        let body = body_json(response).await;
        assert_eq!(body["view"]["hobbies"].as_array().unwrap().len(), 3);

        let stored = body_json(send(&app, Method::GET, "/api/data/about-info", None).await).await;
        assert_eq!(stored["title"], "Who I am");
        assert!(!dir.path().join("content/aboutInfo.json").exists());

        let response = send(&app, Method::POST, "/api/v1/sections/about/save", None).await;
        let body = body_json(response).await;
        assert_eq!(body["notice"]["level"], "success");
        assert!(dir.path().join("content/aboutInfo.json").exists());
    }

    #[tokio::test]
    async fn test_about_list_update_and_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/sections/about/skills/1",
            Some(json!({ "field": "icon", "value": "no-such-icon" })),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["view"]["skills"][1]["icon"], "no-such-icon");
        assert_eq!(body["view"]["skills"][1]["resolvedIcon"], "trophy");

        let response = send(&app, Method::DELETE, "/api/v1/sections/about/story/5", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_projects_add_saves_file_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;

        let response = send(
            &app,
            Method::POST,
            "/api/v1/sections/projects/items",
            Some(json!({ "title": "", "description": "d" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::POST,
            "/api/v1/sections/projects/items",
            Some(json!({ "title": "Thesis", "description": "Final paper" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["notice"]["message"], "Project added and saved to file");
        assert_eq!(body["view"]["total"], 3);

        let snapshot: Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("content/projectsInfo.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(snapshot["projects"][2]["title"], "Thesis");
    }

    #[tokio::test]
    async fn test_load_more_and_view_mode_window() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        let projects: Vec<Value> = (0..10)
            .map(|i| json!({ "title": format!("P{i}"), "description": "d" }))
            .collect();
        enable_edit_mode(&app).await;
        let response = send(
            &app,
            Method::PUT,
            "/api/data/projects-info",
            Some(json!({ "projects": projects })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        send(&app, Method::PUT, "/api/v1/edit-mode", Some(json!({ "enabled": false }))).await;

        let body = body_json(send(&app, Method::GET, "/api/v1/sections/projects", None).await).await;
        assert_eq!(body["view"]["projects"].as_array().unwrap().len(), 6);
        assert_eq!(body["view"]["hasMore"], true);

        let body = body_json(send(&app, Method::POST, "/api/v1/sections/projects/load-more", None).await).await;
        assert_eq!(body["view"]["projects"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_upload_then_delete_image() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;

        let request = multipart_upload("/api/upload-image", "photo.png", "project-1", b"png-bytes");
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let path = body["path"].as_str().unwrap().to_string();
        assert!(path.starts_with("/uploads/project-1-"));
        assert!(path.ends_with(".png"));

        let served = send(&app, Method::GET, &path, None).await;
        assert_eq!(served.status(), StatusCode::OK);

        let response = send(&app, Method::DELETE, "/api/delete-image", Some(json!({ "imagePath": path }))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, Method::DELETE, "/api/delete-image", Some(json!({ "imagePath": path }))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_image_rejected_with_json() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;

        let bytes = vec![0u8; UploadKind::Image.max_bytes() + 1];
        let request = multipart_upload("/api/upload-image", "big.png", "bg", &bytes);
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("5MB"));
        assert!(!dir.path().join("public/uploads").exists());
    }

    #[tokio::test]
    async fn test_delete_rejects_paths_outside_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;
        let response = send(
            &app,
            Method::DELETE,
            "/api/delete-image",
            Some(json!({ "imagePath": "/uploads/../content/local-store.json" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_raw_writes_outside_edit_mode_are_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        enable_edit_mode(&app).await;
        let request = multipart_upload("/api/upload-image", "photo.png", "project-1", b"png-bytes");
        let body = body_json(app.clone().oneshot(request).await.unwrap()).await;
        let path = body["path"].as_str().unwrap().to_string();
        send(&app, Method::PUT, "/api/v1/edit-mode", Some(json!({ "enabled": false }))).await;

        let response = send(&app, Method::DELETE, "/api/delete-image", Some(json!({ "imagePath": path }))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["success"], false);
        assert_eq!(send(&app, Method::GET, &path, None).await.status(), StatusCode::OK);

        let request = multipart_upload("/api/upload-image", "other.png", "bg", b"png-bytes");
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let uploads = std::fs::read_dir(dir.path().join("public/uploads")).unwrap().count();
        assert_eq!(uploads, 1);

        let response = send(&app, Method::PUT, "/api/data/about-info", Some(json!({ "title": "Nope" }))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");
        let response = send(&app, Method::GET, "/api/data/about-info", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            Method::POST,
            "/api/save-to-file",
            Some(json!({ "section": "about", "suffix": "Info", "data": { "title": "Nope" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(!dir.path().join("content/aboutInfo.json").exists());
    }

    #[tokio::test]
    async fn test_section_key_write_shows_up_in_section() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        enable_edit_mode(&app).await;

        let response = send(&app, Method::PUT, "/api/data/about-info", Some(json!({ "title": "Written raw" }))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let body = body_json(send(&app, Method::GET, "/api/v1/sections/about", None).await).await;
        assert_eq!(body["view"]["title"], "Written raw");
    }

    #[tokio::test]
    async fn test_missing_data_key_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        let response = send(&app, Method::GET, "/api/data/nothing-here", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
