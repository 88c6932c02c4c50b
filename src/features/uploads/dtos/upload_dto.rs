use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form accepted by the upload endpoint; exactly one of the
/// fields carries the file
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// Site icon (`.ico`, `.png`, `.jpg`, `.jpeg`)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub icon: Option<String>,
    /// Site logo (`.ico`, `.png`, `.jpg`, `.jpeg`)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub logo: Option<String>,
}

/// Response DTO for a stored upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub message: String,
    /// Name of the stored file
    #[schema(example = "logo-1718000000000.png")]
    pub filename: String,
    /// Public URL of the stored file
    #[schema(example = "/public/uploads/logo-1718000000000.png")]
    pub url: String,
}
