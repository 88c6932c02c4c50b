use utoipa::{Modify, OpenApi};

use crate::features::courses::{dtos as courses_dtos, handlers as courses_handlers};
use crate::features::report_templates::{
    dtos as report_templates_dtos, handlers as report_templates_handlers,
};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{FieldError, MessageResponse, ValidationErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Courses
        courses_handlers::course_handler::create_course,
        courses_handlers::course_handler::close_course,
        // Report templates
        report_templates_handlers::report_template_handler::create_report_template,
        // Reports
        reports_handlers::report_pdf_handler::generate_report_pdf,
        // Uploads
        uploads_handlers::upload_handler::upload_image,
    ),
    components(
        schemas(
            // Shared
            MessageResponse,
            FieldError,
            ValidationErrorResponse,
            // Courses
            courses_dtos::CreateCourseDto,
            courses_dtos::CreateCourseResponseDto,
            // Report templates
            report_templates_dtos::CreateReportTemplateDto,
            report_templates_dtos::CreateReportTemplateResponseDto,
            // Reports
            reports_dtos::GenerateReportPdfDto,
            // Uploads
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadResponseDto,
        )
    ),
    tags(
        (name = "courses", description = "Course lifecycle (open, close, import)"),
        (name = "report-templates", description = "HTML templates for report export"),
        (name = "reports", description = "Report export to PDF"),
        (name = "uploads", description = "Icon and logo uploads"),
    ),
    info(
        title = "Course Manager API",
        version = "0.1.0",
        description = "API documentation for Course Manager",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
