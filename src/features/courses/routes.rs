use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::courses::handlers;
use crate::features::courses::services::CourseService;

/// Create routes for the course lifecycle
pub fn routes(service: Arc<CourseService>) -> Router {
    Router::new()
        .route("/api/create-course", post(handlers::create_course))
        .route("/api/close-course", post(handlers::close_course))
        .with_state(service)
}
