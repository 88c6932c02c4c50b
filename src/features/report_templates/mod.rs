//! Named HTML templates used to export reports as PDF.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgReportTemplateRepository;
pub use services::ReportTemplateService;
