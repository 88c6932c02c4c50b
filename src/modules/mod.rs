//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the upload store and the headless browser used for PDF rendering.

pub mod pdf;
pub mod storage;
