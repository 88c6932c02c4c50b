use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::Report;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Report>>;
}

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, title, description, course_id, created_by
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report by id: {:?}", e);
            AppError::Database(e)
        })
    }
}
