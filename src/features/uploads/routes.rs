use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::uploads::handlers::upload_image;
use crate::features::uploads::services::UploadService;

/// Room for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create routes for the uploads feature
pub fn routes(service: Arc<UploadService>) -> Router {
    let body_limit = service.max_upload_size() + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/api/upload",
            post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(service)
}
