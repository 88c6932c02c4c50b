use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportPdfService;

/// Create routes for report export
pub fn routes(service: Arc<ReportPdfService>) -> Router {
    Router::new()
        .route("/api/generate-report-pdf", post(handlers::generate_report_pdf))
        .with_state(service)
}
