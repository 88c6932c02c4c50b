//! Features layer - one module per API area
//!
//! Each feature follows the same layout: `dtos`, `handlers`, `models`,
//! `repositories`, `services` and a `routes` builder.

pub mod courses;
pub mod report_templates;
pub mod reports;
pub mod uploads;
