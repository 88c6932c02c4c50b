use std::sync::Arc;

use crate::core::error::Result;
use crate::features::report_templates::dtos::{
    CreateReportTemplateDto, CreateReportTemplateResponseDto,
};
use crate::features::report_templates::models::NewReportTemplate;
use crate::features::report_templates::repositories::ReportTemplateRepository;

/// Service for managing report templates
pub struct ReportTemplateService {
    repository: Arc<dyn ReportTemplateRepository>,
}

impl ReportTemplateService {
    pub fn new(repository: Arc<dyn ReportTemplateRepository>) -> Self {
        Self { repository }
    }

    /// Store a new template
    pub async fn create(
        &self,
        dto: CreateReportTemplateDto,
    ) -> Result<CreateReportTemplateResponseDto> {
        let template = NewReportTemplate::from(dto);
        let id = self.repository.insert(&template).await?;

        tracing::info!(
            "Report template created: id={}, name={:?}, created_by={:?}",
            id,
            template.name,
            template.created_by
        );

        Ok(CreateReportTemplateResponseDto {
            message: "Report template created successfully.".to_string(),
            template_id: id,
        })
    }
}
