use serde::Serialize;
use sqlx::FromRow;

/// Database model for report template
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// HTML containing `{{title}}` / `{{description}}` placeholders
    pub template_html: String,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReportTemplate {
    pub name: String,
    pub description: Option<String>,
    pub template_html: String,
    pub created_by: Option<i64>,
}
