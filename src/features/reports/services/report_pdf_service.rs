use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::report_templates::repositories::ReportTemplateRepository;
use crate::features::reports::dtos::RenderedPdf;
use crate::features::reports::models::Report;
use crate::features::reports::repositories::ReportRepository;
use crate::modules::pdf::PdfRenderer;
use crate::shared::constants::{DESCRIPTION_PLACEHOLDER, TITLE_PLACEHOLDER};

pub const REPORT_NOT_FOUND: &str = "Report not found.";
pub const TEMPLATE_NOT_FOUND: &str = "Template not found.";

/// Service exporting reports through HTML templates
pub struct ReportPdfService {
    reports: Arc<dyn ReportRepository>,
    templates: Arc<dyn ReportTemplateRepository>,
    renderer: Arc<dyn PdfRenderer>,
}

impl ReportPdfService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        templates: Arc<dyn ReportTemplateRepository>,
        renderer: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            reports,
            templates,
            renderer,
        }
    }

    /// Fill `template_id` with the content of `report_id` and render it as PDF
    pub async fn generate(&self, report_id: i64, template_id: i64) -> Result<RenderedPdf> {
        let report = self
            .reports
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND.to_string()))?;

        let template = self
            .templates
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| AppError::NotFound(TEMPLATE_NOT_FOUND.to_string()))?;

        let html = fill_placeholders(&template.template_html, &report);
        let bytes = self.renderer.render_pdf(html).await?;

        tracing::info!(
            "Rendered report {} with template {} ({} bytes)",
            report.id,
            template.id,
            bytes.len()
        );

        Ok(RenderedPdf {
            file_name: pdf_file_name(&report.title),
            bytes,
        })
    }
}

/// Replace the first `{{title}}` and then the first `{{description}}`.
/// Values are inserted verbatim.
pub fn fill_placeholders(template_html: &str, report: &Report) -> String {
    template_html
        .replacen(TITLE_PLACEHOLDER, &report.title, 1)
        .replacen(
            DESCRIPTION_PLACEHOLDER,
            report.description.as_deref().unwrap_or_default(),
            1,
        )
}

pub fn pdf_file_name(title: &str) -> String {
    format!("report_{}.pdf", title)
}
