use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppBody;
use crate::features::courses::dtos::{CreateCourseDto, CreateCourseResponseDto};
use crate::features::courses::services::CourseService;
use crate::shared::types::{MessageResponse, ValidationErrorResponse};

/// Open a new course
///
/// Only one course may be open at a time. When `import_previous_course` is
/// true, teams and reports of `previous_course_id` are copied into the new
/// course.
#[utoipa::path(
    post,
    path = "/api/create-course",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CreateCourseResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorResponse),
        (status = 400, description = "A course is already open", body = MessageResponse)
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(service): State<Arc<CourseService>>,
    AppBody(dto): AppBody<CreateCourseDto>,
) -> Result<(StatusCode, Json<CreateCourseResponseDto>)> {
    dto.validate()?;

    let response = service.create_course(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Close and archive the open course
#[utoipa::path(
    post,
    path = "/api/close-course",
    responses(
        (status = 200, description = "Course closed", body = MessageResponse),
        (status = 400, description = "No open course", body = MessageResponse)
    ),
    tag = "courses"
)]
pub async fn close_course(
    State(service): State<Arc<CourseService>>,
) -> Result<Json<MessageResponse>> {
    let response = service.close_course().await?;
    Ok(Json(response))
}
