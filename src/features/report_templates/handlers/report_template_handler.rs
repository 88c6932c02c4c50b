use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppBody;
use crate::features::report_templates::dtos::{
    CreateReportTemplateDto, CreateReportTemplateResponseDto,
};
use crate::features::report_templates::services::ReportTemplateService;
use crate::shared::types::ValidationErrorResponse;

/// Store a named HTML report template
#[utoipa::path(
    post,
    path = "/api/create-report-template",
    request_body = CreateReportTemplateDto,
    responses(
        (status = 201, description = "Template created", body = CreateReportTemplateResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorResponse)
    ),
    tag = "report-templates"
)]
pub async fn create_report_template(
    State(service): State<Arc<ReportTemplateService>>,
    AppBody(dto): AppBody<CreateReportTemplateDto>,
) -> Result<(StatusCode, Json<CreateReportTemplateResponseDto>)> {
    dto.validate()?;

    let response = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
