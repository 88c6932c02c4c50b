use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::report_templates::models::{NewReportTemplate, ReportTemplate};

#[async_trait]
pub trait ReportTemplateRepository: Send + Sync {
    /// Insert a template and return its id
    async fn insert(&self, template: &NewReportTemplate) -> Result<i64>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportTemplate>>;
}

pub struct PgReportTemplateRepository {
    pool: PgPool,
}

impl PgReportTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportTemplateRepository for PgReportTemplateRepository {
    async fn insert(&self, template: &NewReportTemplate) -> Result<i64> {
        sqlx::query_scalar(
            r#"
            INSERT INTO report_templates (name, description, template_html, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.template_html)
        .bind(template.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report template: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportTemplate>> {
        sqlx::query_as::<_, ReportTemplate>(
            r#"
            SELECT id, name, description, template_html, created_by
            FROM report_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report template by id: {:?}", e);
            AppError::Database(e)
        })
    }
}
