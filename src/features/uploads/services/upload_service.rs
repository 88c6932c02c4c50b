use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::modules::storage::LocalStorage;
use crate::shared::constants::{ALLOWED_IMAGE_EXTENSIONS, UPLOAD_FIELDS};

pub const IMAGES_ONLY: &str = "Only image files are allowed (ico, png, jpg, jpeg).";

/// Service storing uploaded images in the public directory
pub struct UploadService {
    storage: Arc<LocalStorage>,
    max_upload_size: usize,
}

impl UploadService {
    pub fn new(storage: Arc<LocalStorage>, max_upload_size: usize) -> Self {
        Self {
            storage,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Check the form field and original file name before reading the body.
    /// Returns the extension as the client spelled it.
    pub fn accept(&self, field: &str, file_name: &str) -> Result<String> {
        if !UPLOAD_FIELDS.contains(&field) {
            return Err(AppError::BadRequest(format!(
                "Unexpected file field '{}'. Expected one of: {}",
                field,
                UPLOAD_FIELDS.join(", ")
            )));
        }

        image_extension(file_name).ok_or_else(|| AppError::BadRequest(IMAGES_ONLY.to_string()))
    }

    /// Store an accepted file as `<field>-<unix millis>.<extension>`
    pub async fn store(&self, field: &str, extension: &str, data: &[u8]) -> Result<UploadResponseDto> {
        if data.len() > self.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes",
                self.max_upload_size
            )));
        }

        let stem = format!("{}-{}", field, Utc::now().timestamp_millis());
        let stored = self.storage.store(&stem, extension, data).await?;
        tracing::debug!("Upload from field '{}' saved to {}", field, stored.path.display());

        Ok(UploadResponseDto {
            message: "File uploaded successfully.".to_string(),
            filename: stored.file_name,
            url: stored.url,
        })
    }
}

/// Extension of `file_name`, original case kept, when it is an allowed image
/// type. The allow-list check ignores case.
pub fn image_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name).extension()?.to_str()?;

    ALLOWED_IMAGE_EXTENSIONS
        .contains(&extension.to_ascii_lowercase().as_str())
        .then(|| extension.to_string())
}
