pub mod course_handler;

pub use course_handler::{close_course, create_course};
