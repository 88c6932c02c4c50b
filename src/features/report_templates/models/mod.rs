pub mod report_template;

pub use report_template::{NewReportTemplate, ReportTemplate};
