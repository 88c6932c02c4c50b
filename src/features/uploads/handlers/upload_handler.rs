use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{UploadImageDto, UploadResponseDto};
use crate::features::uploads::services::UploadService;
use crate::shared::types::MessageResponse;

/// Upload an icon or logo image
///
/// Accepts multipart/form-data with a single file in the `icon` or `logo`
/// field. The file is served afterwards from the returned `url`.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "File stored", body = UploadResponseDto),
        (status = 400, description = "Missing, extra or disallowed file", body = MessageResponse)
    )
)]
pub async fn upload_image(
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponseDto>)> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("Ignoring non-file field: {}", name);
            continue;
        };

        if upload.is_some() {
            return Err(AppError::BadRequest(
                "Only one file can be uploaded per request.".to_string(),
            ));
        }

        let extension = service.accept(&name, &file_name)?;
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some((name, extension, data.to_vec()));
    }

    let (field, extension, data) =
        upload.ok_or_else(|| AppError::BadRequest("No file was uploaded.".to_string()))?;

    let response = service.store(&field, &extension, &data).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::features::uploads::routes;
    use crate::features::uploads::services::UploadService;
    use crate::modules::storage::LocalStorage;
    use crate::shared::test_helpers::temp_dir;

    async fn server(max_upload_size: usize) -> (TestServer, std::path::PathBuf) {
        let public = temp_dir("upload-handler");
        let storage = LocalStorage::new(&public, "uploads");
        storage.ensure_dir_exists().await.unwrap();
        let root = storage.root().to_path_buf();
        let service = Arc::new(UploadService::new(Arc::new(storage), max_upload_size));
        (TestServer::new(routes::routes(service)).unwrap(), root)
    }

    fn image(name: &str, bytes: &'static [u8]) -> Part {
        Part::bytes(bytes).file_name(name).mime_type("image/png")
    }

    #[tokio::test]
    async fn test_upload_logo_returns_201_and_stores_file() {
        let (server, root) = server(1024).await;

        let response = server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_part("logo", image("Logo.PNG", b"\x89PNG")))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("logo-"));
        assert!(filename.ends_with(".PNG"));
        assert_eq!(body["url"], format!("/public/uploads/{}", filename));
        assert_eq!(std::fs::read(root.join(filename)).unwrap(), b"\x89PNG");
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected() {
        let (server, root) = server(1024).await;

        let response = server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_part("icon", image("shell.php", b"<?php")))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Only image files are allowed (ico, png, jpg, jpeg)."
        );
        assert_eq!(std::fs::read_dir(root).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_second_file_rejected() {
        let (server, root) = server(1024).await;

        let response = server
            .post("/api/upload")
            .multipart(
                MultipartForm::new()
                    .add_part("icon", image("a.ico", b"a"))
                    .add_part("logo", image("b.png", b"b")),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(root).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_field_and_missing_file_rejected() {
        let (server, _) = server(1024).await;

        server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_part("avatar", image("a.png", b"a")))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_text("note", "hello"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "No file was uploaded.");
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let (server, _) = server(4).await;

        let response = server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_part("logo", image("big.png", b"0123456789")))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
