//! Report export: a report's title and description are merged into a stored
//! HTML template and printed to PDF.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgReportRepository;
pub use services::ReportPdfService;
