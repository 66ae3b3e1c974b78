//! Browser control for headless verification runs.
//!
//! Real browser control goes through the Chrome DevTools Protocol. When
//! compiled with the `browser` feature, chromiumoxide provides full CDP
//! support; without it, an in-memory mock stands in so the script machinery
//! can be unit tested without a chromium install.

use crate::locator::Selector;
use crate::result::{VerifyError, VerifyResult};
use crate::wait::WaitOptions;
use std::time::Duration;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::*;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::{
        DispatchKeyEventParams, DispatchKeyEventType,
    };
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::sync::Mutex;

    /// Browser instance with a real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if the browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> VerifyResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| VerifyError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| VerifyError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Drive the CDP message loop until the connection drops
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            tracing::debug!(headless = config.headless, "browser launched");

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Create a new page
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created
        pub async fn new_page(&self) -> VerifyResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| VerifyError::Page {
                    message: e.to_string(),
                })?;

            Ok(Page {
                width: self.config.viewport_width,
                height: self.config.viewport_height,
                url: String::from("about:blank"),
                inner: Arc::new(Mutex::new(cdp_page)),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> VerifyResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| VerifyError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            tracing::debug!("browser closed");
            Ok(())
        }
    }

    /// A browser page with a real CDP connection
    #[derive(Debug)]
    pub struct Page {
        /// Page width
        pub width: u32,
        /// Page height
        pub height: u32,
        /// Current URL
        url: String,
        inner: Arc<Mutex<CdpPage>>,
    }

    impl Page {
        /// Navigate to a URL and wait for the load event
        ///
        /// # Errors
        ///
        /// Returns error if navigation fails
        pub async fn goto(&mut self, url: &str) -> VerifyResult<()> {
            {
                let page = self.inner.lock().await;
                page.goto(url).await.map_err(|e| VerifyError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                page.wait_for_navigation()
                    .await
                    .map_err(|e| VerifyError::Navigation {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
            }
            self.url = url.to_string();
            tracing::debug!(url, "navigated");
            Ok(())
        }

        /// Evaluate a JavaScript expression to a boolean
        async fn eval_bool(&self, expr: &str) -> VerifyResult<bool> {
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| VerifyError::Page {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| VerifyError::Page {
                message: e.to_string(),
            })
        }

        /// Check whether an element matching the selector is visible
        ///
        /// # Errors
        ///
        /// Returns error if the visibility probe cannot be evaluated
        pub async fn is_visible(&self, selector: &Selector) -> VerifyResult<bool> {
            self.eval_bool(&selector.to_visible_query()).await
        }

        /// Poll until an element matching the selector is visible
        ///
        /// # Errors
        ///
        /// Returns `VerifyError::Timeout` if the deadline passes first
        pub async fn wait_for_visible(
            &self,
            selector: &Selector,
            options: &WaitOptions,
        ) -> VerifyResult<()> {
            let deadline = Instant::now() + options.timeout();
            loop {
                if self.is_visible(selector).await? {
                    return Ok(());
                }
                if Instant::now() >= deadline {
                    return Err(VerifyError::Timeout {
                        ms: options.timeout_ms,
                        what: selector.describe(),
                    });
                }
                tokio::time::sleep(options.poll_interval()).await;
            }
        }

        /// Click the element matching the selector
        ///
        /// # Errors
        ///
        /// Returns error if no matching element exists or the click fails
        pub async fn click(&self, selector: &Selector) -> VerifyResult<()> {
            let clicked = self.eval_bool(&selector.to_click_query()).await?;
            if clicked {
                tracing::debug!(selector = %selector, "clicked");
                Ok(())
            } else {
                Err(VerifyError::input(format!(
                    "no element matching {} to click",
                    selector.describe()
                )))
            }
        }

        /// Dispatch a key press (down + up) to the page
        ///
        /// # Errors
        ///
        /// Returns error if the key events cannot be dispatched
        pub async fn press_key(&self, key: &str) -> VerifyResult<()> {
            let page = self.inner.lock().await;

            let down = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyDown)
                .key(key)
                .build()
                .map_err(|e| VerifyError::Input {
                    message: e.to_string(),
                })?;
            page.execute(down).await.map_err(|e| VerifyError::Input {
                message: e.to_string(),
            })?;

            let up = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyUp)
                .key(key)
                .build()
                .map_err(|e| VerifyError::Input {
                    message: e.to_string(),
                })?;
            page.execute(up).await.map_err(|e| VerifyError::Input {
                message: e.to_string(),
            })?;

            Ok(())
        }

        /// Block for a fixed duration
        pub async fn pause(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }

        /// Take a PNG screenshot of the viewport or the full page
        ///
        /// # Errors
        ///
        /// Returns error if the screenshot fails
        pub async fn screenshot(&self, full_page: bool) -> VerifyResult<Vec<u8>> {
            let page = self.inner.lock().await;
            let mut builder =
                CaptureScreenshotParams::builder().format(CaptureScreenshotFormat::Png);
            if full_page {
                builder = builder.capture_beyond_viewport(true);
            }
            let params = builder.build();

            let screenshot = page
                .execute(params)
                .await
                .map_err(|e| VerifyError::Screenshot {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| VerifyError::Screenshot {
                    message: e.to_string(),
                })
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::*;

    /// Browser instance (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
    }

    impl Browser {
        /// Launch a new browser instance (mock)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn launch(config: BrowserConfig) -> VerifyResult<Self> {
            Ok(Self { config })
        }

        /// Create a new page
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn new_page(&self) -> VerifyResult<Page> {
            Ok(Page::new(
                self.config.viewport_width,
                self.config.viewport_height,
            ))
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> VerifyResult<()> {
            Ok(())
        }
    }

    /// A browser page (mock when `browser` feature disabled).
    ///
    /// Visibility is decided against a registered set of needles so executor
    /// behavior can be tested without a DOM.
    #[derive(Debug)]
    pub struct Page {
        /// Page width
        pub width: u32,
        /// Page height
        pub height: u32,
        url: String,
        present: Vec<String>,
        clicks: Vec<String>,
        keys: Vec<String>,
    }

    impl Page {
        /// Create a new mock page
        #[must_use]
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                url: String::from("about:blank"),
                present: Vec::new(),
                clicks: Vec::new(),
                keys: Vec::new(),
            }
        }

        /// Register content the mock page "renders"
        pub fn register_present(&mut self, needle: impl Into<String>) {
            self.present.push(needle.into());
        }

        /// Selectors clicked so far
        #[must_use]
        pub fn clicks(&self) -> &[String] {
            &self.clicks
        }

        /// Keys pressed so far
        #[must_use]
        pub fn keys(&self) -> &[String] {
            &self.keys
        }

        fn matches(&self, selector: &Selector) -> bool {
            self.present.iter().any(|p| p.contains(selector.needle()))
        }

        /// Navigate to a URL
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn goto(&mut self, url: &str) -> VerifyResult<()> {
            self.url = url.to_string();
            Ok(())
        }

        /// Check whether registered content matches the selector
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn is_visible(&self, selector: &Selector) -> VerifyResult<bool> {
            Ok(self.matches(selector))
        }

        /// Wait for registered content; times out immediately when absent
        ///
        /// # Errors
        ///
        /// Returns `VerifyError::Timeout` when the selector has no match
        pub async fn wait_for_visible(
            &self,
            selector: &Selector,
            options: &WaitOptions,
        ) -> VerifyResult<()> {
            if self.matches(selector) {
                Ok(())
            } else {
                Err(VerifyError::Timeout {
                    ms: options.timeout_ms,
                    what: selector.describe(),
                })
            }
        }

        /// Click the element matching the selector
        ///
        /// # Errors
        ///
        /// Returns error when the selector has no registered match
        pub async fn click(&mut self, selector: &Selector) -> VerifyResult<()> {
            if self.matches(selector) {
                self.clicks.push(selector.describe());
                Ok(())
            } else {
                Err(VerifyError::input(format!(
                    "no element matching {} to click",
                    selector.describe()
                )))
            }
        }

        /// Record a key press
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn press_key(&mut self, key: &str) -> VerifyResult<()> {
            self.keys.push(key.to_string());
            Ok(())
        }

        /// No-op pause (mock runs instantly)
        pub async fn pause(&self, _duration: Duration) {}

        /// Take a screenshot (mock returns empty bytes)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn screenshot(&self, _full_page: bool) -> VerifyResult<Vec<u8>> {
            Ok(vec![])
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }

    #[cfg(test)]
    #[allow(clippy::unwrap_used, clippy::expect_used)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_goto_tracks_url() {
            let browser = Browser::launch(BrowserConfig::default()).await.unwrap();
            let mut page = browser.new_page().await.unwrap();
            page.goto("http://localhost:3000").await.unwrap();
            assert_eq!(page.current_url(), "http://localhost:3000");
            browser.close().await.unwrap();
        }

        #[tokio::test]
        async fn test_mock_visibility_requires_registration() {
            let mut page = Page::new(800, 600);
            let sel = Selector::text("Connect Wallet");
            assert!(!page.is_visible(&sel).await.unwrap());
            page.register_present("Connect Wallet");
            assert!(page.is_visible(&sel).await.unwrap());
        }

        #[tokio::test]
        async fn test_mock_click_missing_element_fails() {
            let mut page = Page::new(800, 600);
            let err = page.click(&Selector::button("Add Tracking")).await.unwrap_err();
            assert!(err.to_string().contains("Add Tracking"));
        }

        #[tokio::test]
        async fn test_mock_wait_times_out_when_absent() {
            let page = Page::new(800, 600);
            let err = page
                .wait_for_visible(&Selector::text("SupplyChain"), &WaitOptions::default())
                .await
                .unwrap_err();
            assert!(matches!(err, VerifyError::Timeout { .. }));
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, Page};
