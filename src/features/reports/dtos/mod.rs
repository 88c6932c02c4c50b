pub mod report_pdf_dto;

pub use report_pdf_dto::{GenerateReportPdfDto, RenderedPdf};
