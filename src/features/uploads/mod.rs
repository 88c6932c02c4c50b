//! Image uploads (`icon` / `logo`) stored under the public directory.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::UploadService;
