pub mod report_pdf_service;

pub use report_pdf_service::ReportPdfService;
