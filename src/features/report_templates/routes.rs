use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::report_templates::handlers;
use crate::features::report_templates::services::ReportTemplateService;

/// Create routes for the report templates feature
pub fn routes(service: Arc<ReportTemplateService>) -> Router {
    Router::new()
        .route(
            "/api/create-report-template",
            post(handlers::create_report_template),
        )
        .with_state(service)
}
