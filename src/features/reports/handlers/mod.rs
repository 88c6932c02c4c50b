pub mod report_pdf_handler;

pub use report_pdf_handler::generate_report_pdf;
