pub mod report_template_repository;

pub use report_template_repository::{PgReportTemplateRepository, ReportTemplateRepository};
