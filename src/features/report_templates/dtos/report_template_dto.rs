use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::features::report_templates::models::NewReportTemplate;
use crate::shared::validation::{as_integer, validate_integer};

/// Request body for storing a report template
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportTemplateDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Quarterly summary")]
    pub name: String,

    pub description: Option<String>,

    /// HTML body; `{{title}}` and `{{description}}` are filled from the report
    #[serde(default)]
    #[validate(length(min = 1, message = "template_html is required"))]
    #[schema(example = "<h1>{{title}}</h1><p>{{description}}</p>")]
    pub template_html: String,

    /// Id of the authoring user
    #[validate(custom(function = "validate_integer"))]
    #[schema(value_type = Option<i64>)]
    pub created_by: Option<Value>,
}

impl From<CreateReportTemplateDto> for NewReportTemplate {
    fn from(dto: CreateReportTemplateDto) -> Self {
        Self {
            created_by: dto.created_by.as_ref().and_then(as_integer),
            name: dto.name,
            description: dto.description,
            template_html: dto.template_html,
        }
    }
}

/// Response DTO for template creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportTemplateResponseDto {
    pub message: String,
    pub template_id: i64,
}
