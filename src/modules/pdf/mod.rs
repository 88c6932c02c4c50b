//! PDF rendering module
//!
//! Turns an HTML document into PDF bytes. The production implementation
//! drives headless Chrome; handlers only see the [`PdfRenderer`] trait.

mod chrome_renderer;

use async_trait::async_trait;
use thiserror::Error;

pub use chrome_renderer::ChromeRenderer;

/// Errors that can occur while producing a PDF
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Failed to render page: {0}")]
    Page(String),

    #[error("Rendering timed out after {0}s")]
    Timeout(u64),

    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Render a complete HTML document to PDF bytes
    async fn render_pdf(&self, html: String) -> Result<Vec<u8>, RenderError>;
}
