use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, handler::HandlerWithoutStateExt, http::StatusCode,
    middleware::from_fn, routing::get, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::courses::{routes as courses_routes, CourseService};
use crate::features::report_templates::{routes as report_templates_routes, ReportTemplateService};
use crate::features::reports::{routes as reports_routes, ReportPdfService};
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::shared::constants::PUBLIC_URL_PREFIX;

/// Services shared by the HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub courses: Arc<CourseService>,
    pub report_templates: Arc<ReportTemplateService>,
    pub report_pdf: Arc<ReportPdfService>,
    pub uploads: Arc<UploadService>,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_routes(config: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = config.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        swagger
    }
}

/// Build the application router: API routes, static files under `/public`,
/// Swagger UI and the plain-text 404/500 fallbacks.
pub fn create_app(services: AppServices, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    let api_routes = Router::new()
        .merge(courses_routes::routes(services.courses))
        .merge(report_templates_routes::routes(services.report_templates))
        .merge(reports_routes::routes(services.report_pdf))
        .merge(uploads_routes::routes(services.uploads));

    let static_files = ServeDir::new(&app.public_dir)
        .not_found_service(middleware::not_found_fallback.into_service());

    Router::new()
        .merge(swagger_routes(swagger))
        .merge(api_routes)
        .route("/health", get(health_check))
        .nest_service(PUBLIC_URL_PREFIX, static_files)
        .fallback(middleware::not_found_fallback)
        .layer(DefaultBodyLimit::max(app.max_request_body_size))
        .layer(middleware::cors_layer(app.cors_allowed_origins.clone()))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
