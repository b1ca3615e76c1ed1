//! Browser control for driving the transliteration page.
//!
//! With the `browser` feature enabled this wraps chromiumoxide (Chrome
//! DevTools Protocol). The driver itself only sees the [`TranslationPage`]
//! trait, so the case pipeline runs unchanged against the scripted mock page
//! used in unit tests.

use crate::result::{HarnessError, HarnessResult};
use crate::selectors::Selector;
use async_trait::async_trait;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            sandbox: true,
            viewport_width: 1280,
            viewport_height: 800,
        }
    }
}

impl BrowserConfig {
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

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

/// A live page session the driver can interact with.
///
/// One implementation per backend: the CDP page under the `browser` feature,
/// and [`mock::ScriptedPage`] for tests.
#[async_trait]
pub trait TranslationPage: Send {
    /// Navigate to a URL and wait for the page to load
    async fn navigate(&mut self, url: &str) -> HarnessResult<()>;

    /// Whether the selected element exists and is rendered
    async fn is_visible(&self, selector: &Selector) -> HarnessResult<bool>;

    /// Fill the selected element with text (empty string supported)
    async fn fill(&mut self, selector: &Selector, text: &str) -> HarnessResult<()>;

    /// Rendered text of the selected element; `None` when the element is
    /// absent from the DOM
    async fn text(&self, selector: &Selector) -> HarnessResult<Option<String>>;
}

// ============================================================================
// Real CDP implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{async_trait, BrowserConfig, HarnessError, HarnessResult, Selector, TranslationPage};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Browser instance with a real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns [`HarnessError::BrowserLaunch`] if the browser cannot be
        /// launched.
        pub async fn launch(config: BrowserConfig) -> HarnessResult<Self> {
            let mut builder =
                CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| HarnessError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                HarnessError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            // Drive the CDP message loop until the connection drops
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a fresh page (one per test case, no state shared between
        /// cases)
        ///
        /// # Errors
        ///
        /// Returns [`HarnessError::Page`] if the page cannot be created.
        pub async fn new_page(&self) -> HarnessResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| HarnessError::Page {
                        message: e.to_string(),
                    })?;
            Ok(Page {
                inner: Arc::new(Mutex::new(cdp_page)),
            })
        }

        /// Close the browser
        pub async fn close(self) -> HarnessResult<()> {
            let mut browser = self.inner.lock().await;
            browser.close().await.map_err(|e| HarnessError::Page {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    /// A browser page backed by CDP
    #[derive(Debug, Clone)]
    pub struct Page {
        inner: Arc<Mutex<CdpPage>>,
    }

    impl Page {
        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> HarnessResult<T> {
            let page = self.inner.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| HarnessError::Evaluation {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| HarnessError::Evaluation {
                message: e.to_string(),
            })
        }
    }

    #[async_trait]
    impl TranslationPage for Page {
        async fn navigate(&mut self, url: &str) -> HarnessResult<()> {
            let page = self.inner.lock().await;
            page.goto(url)
                .await
                .map_err(|e| HarnessError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            page.wait_for_navigation()
                .await
                .map_err(|e| HarnessError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn is_visible(&self, selector: &Selector) -> HarnessResult<bool> {
            self.eval(&selector.to_visibility_query()).await
        }

        async fn fill(&mut self, selector: &Selector, text: &str) -> HarnessResult<()> {
            let filled: bool = self.eval(&selector.to_fill_query(text)).await?;
            if filled {
                Ok(())
            } else {
                Err(HarnessError::Setup {
                    message: format!("input control not found for {selector:?}"),
                })
            }
        }

        async fn text(&self, selector: &Selector) -> HarnessResult<Option<String>> {
            self.eval(&selector.to_text_query()).await
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

// ============================================================================
// Scripted mock page (always available; the only backend without `browser`)
// ============================================================================

/// Scripted page for exercising the case pipeline without a browser.
pub mod mock {
    use super::{async_trait, HarnessError, HarnessResult, Selector, TranslationPage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A page whose output region replays a scripted sequence of text
    /// samples, one per poll.
    #[derive(Debug, Default)]
    pub struct ScriptedPage {
        /// Whether the input control renders after navigation
        pub input_visible: bool,
        /// Text samples returned by successive output polls; the last one
        /// repeats once the script is exhausted
        pub output_script: Vec<Option<String>>,
        /// URL from the last navigation
        pub navigated_to: Option<String>,
        /// Text from the last fill
        pub filled_with: Option<String>,
        polls: AtomicUsize,
    }

    impl ScriptedPage {
        /// Page whose output settles immediately on `text`
        #[must_use]
        pub fn with_output(text: impl Into<String>) -> Self {
            Self {
                input_visible: true,
                output_script: vec![Some(text.into())],
                ..Self::default()
            }
        }

        /// Page that replays `script` across successive polls
        #[must_use]
        pub fn with_script(script: Vec<Option<String>>) -> Self {
            Self {
                input_visible: true,
                output_script: script,
                ..Self::default()
            }
        }

        /// Page whose output region never produces text
        #[must_use]
        pub fn silent() -> Self {
            Self::with_script(vec![Some(String::new())])
        }

        /// Page whose input control never renders
        #[must_use]
        pub fn without_input() -> Self {
            Self {
                input_visible: false,
                output_script: vec![None],
                ..Self::default()
            }
        }

        /// Number of output polls observed so far
        #[must_use]
        pub fn poll_count(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationPage for ScriptedPage {
        async fn navigate(&mut self, url: &str) -> HarnessResult<()> {
            self.navigated_to = Some(url.to_string());
            Ok(())
        }

        async fn is_visible(&self, _selector: &Selector) -> HarnessResult<bool> {
            Ok(self.input_visible)
        }

        async fn fill(&mut self, _selector: &Selector, text: &str) -> HarnessResult<()> {
            if !self.input_visible {
                return Err(HarnessError::Setup {
                    message: "input control not found".to_string(),
                });
            }
            self.filled_with = Some(text.to_string());
            Ok(())
        }

        async fn text(&self, _selector: &Selector) -> HarnessResult<Option<String>> {
            let index = self.polls.fetch_add(1, Ordering::SeqCst);
            let sample = self
                .output_script
                .get(index)
                .or_else(|| self.output_script.last())
                .cloned()
                .flatten();
            Ok(sample)
        }
    }
}
