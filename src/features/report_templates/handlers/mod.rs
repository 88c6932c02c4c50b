pub mod report_template_handler;

pub use report_template_handler::create_report_template;
