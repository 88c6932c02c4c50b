//! HTML to PDF rendering through a shared headless Chrome process.
//!
//! One browser is launched lazily and reused by every request; each render
//! opens its own blank tab and loads the document with
//! `Page.setDocumentContent`. Concurrent renders are bounded by a semaphore
//! and every render is subject to a timeout. A browser that fails is
//! discarded so the next render launches a fresh one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::core::config::RendererConfig;
use crate::modules::pdf::{PdfRenderer, RenderError};

/// A4 paper size in inches
const A4_WIDTH_INCHES: f64 = 8.27;
const A4_HEIGHT_INCHES: f64 = 11.69;

const BLANK_PAGE: &str = "about:blank";

pub struct ChromeRenderer {
    config: RendererConfig,
    browser: Arc<Mutex<Option<Browser>>>,
    permits: Arc<Semaphore>,
}

impl ChromeRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrency));
        Self {
            config,
            browser: Arc::new(Mutex::new(None)),
            permits,
        }
    }

    /// Drop the shared browser, terminating the Chrome process.
    pub fn shutdown(&self) {
        if let Ok(mut slot) = self.browser.lock() {
            if slot.take().is_some() {
                info!("Headless Chrome shut down");
            }
        }
    }
}

#[async_trait]
impl PdfRenderer for ChromeRenderer {
    async fn render_pdf(&self, html: String) -> Result<Vec<u8>, RenderError> {
        let timeout = self.config.render_timeout;

        let render = async {
            let permit = Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .map_err(|_| RenderError::Unavailable("renderer is shut down".to_string()))?;

            let slot = Arc::clone(&self.browser);
            let config = self.config.clone();

            tokio::task::spawn_blocking(move || {
                // Held until Chrome is done, even if the caller timed out
                let _permit = permit;
                render_with_relaunch(&slot, &config, &html)
            })
            .await
            .map_err(|e| RenderError::Unavailable(format!("render task failed: {}", e)))?
        };

        match tokio::time::timeout(timeout, render).await {
            Ok(result) => result,
            Err(_) => {
                warn!("PDF render exceeded {}s", timeout.as_secs());
                Err(RenderError::Timeout(timeout.as_secs()))
            }
        }
    }
}

fn launch_options(config: &RendererConfig) -> Result<LaunchOptions<'static>, RenderError> {
    LaunchOptions::default_builder()
        .headless(true)
        .sandbox(config.sandbox)
        .path(config.chrome_path.clone())
        .idle_browser_timeout(config.idle_browser_timeout)
        .build()
        .map_err(|e| RenderError::Launch(e.to_string()))
}

/// Returns the shared browser, launching it if needed. The flag is true when
/// the browser was launched by this call.
fn acquire_browser(
    slot: &Mutex<Option<Browser>>,
    config: &RendererConfig,
) -> Result<(Browser, bool), RenderError> {
    let mut guard = slot
        .lock()
        .map_err(|_| RenderError::Unavailable("browser lock poisoned".to_string()))?;

    if let Some(browser) = guard.as_ref() {
        return Ok((browser.clone(), false));
    }

    let browser =
        Browser::new(launch_options(config)?).map_err(|e| RenderError::Launch(e.to_string()))?;
    info!(
        "Launched headless Chrome (pid={:?})",
        browser.get_process_id()
    );
    *guard = Some(browser.clone());

    Ok((browser, true))
}

fn discard_browser(slot: &Mutex<Option<Browser>>) {
    if let Ok(mut guard) = slot.lock() {
        guard.take();
    }
}

fn render_with_relaunch(
    slot: &Mutex<Option<Browser>>,
    config: &RendererConfig,
    html: &str,
) -> Result<Vec<u8>, RenderError> {
    let (browser, fresh) = acquire_browser(slot, config)?;

    match render_in_new_tab(&browser, html, config.render_timeout) {
        Ok(pdf) => Ok(pdf),
        Err(e) if !fresh => {
            // The cached browser may have idled out or crashed
            warn!("Render failed on cached browser, relaunching: {}", e);
            discard_browser(slot);
            let (browser, _) = acquire_browser(slot, config)?;
            render_in_new_tab(&browser, html, config.render_timeout).inspect_err(|_| {
                discard_browser(slot);
            })
        }
        Err(e) => {
            discard_browser(slot);
            Err(e)
        }
    }
}

fn render_in_new_tab(browser: &Browser, html: &str, timeout: Duration) -> Result<Vec<u8>, RenderError> {
    let tab = browser
        .new_tab()
        .map_err(|e| RenderError::Page(format!("failed to open tab: {}", e)))?;
    tab.set_default_timeout(timeout);

    let result = print_page(&tab, html);

    if let Err(e) = tab.close(true) {
        debug!("Failed to close render tab: {}", e);
    }

    result
}

fn print_page(tab: &Tab, html: &str) -> Result<Vec<u8>, RenderError> {
    tab.navigate_to(BLANK_PAGE)
        .map_err(|e| RenderError::Page(format!("failed to open blank page: {}", e)))?;
    tab.wait_until_navigated()
        .map_err(|e| RenderError::Page(format!("blank page did not load: {}", e)))?;

    let frame_tree = tab
        .call_method(Page::GetFrameTree(None))
        .map_err(|e| RenderError::Page(format!("failed to read frame tree: {}", e)))?
        .frame_tree;
    tab.call_method(set_content(frame_tree.frame.id, html))
        .map_err(|e| RenderError::Page(format!("failed to load content: {}", e)))?;

    let pdf = tab
        .print_to_pdf(Some(a4_options()))
        .map_err(|e| RenderError::Page(format!("failed to print page: {}", e)))?;

    debug!("Rendered PDF ({} bytes)", pdf.len());
    Ok(pdf)
}

/// Replace the document of `frame_id` in place; unlike a `data:` URL this
/// has no length limit
fn set_content(frame_id: String, html: &str) -> Page::SetDocumentContent {
    Page::SetDocumentContent {
        frame_id,
        html: html.to_string(),
    }
}

fn a4_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        paper_width: Some(A4_WIDTH_INCHES),
        paper_height: Some(A4_HEIGHT_INCHES),
        print_background: Some(true),
        ..Default::default()
    }
}
