//! Wait options and the output stability check.
//!
//! The output region of the page renders from a debounced/streaming
//! translation, so "first non-empty text" is not a completion signal. The
//! settle step therefore requires the text to hold unchanged for a stability
//! window instead of sleeping a fixed amount after first detection.

use std::time::{Duration, Instant};

/// Bound on waiting for non-empty output (10 seconds)
pub const OUTPUT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default stability window: output must hold unchanged this long (1 second)
pub const DEFAULT_STABILITY_WINDOW_MS: u64 = 1_000;

/// Options for polled waits
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: OUTPUT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Options for the settle step
#[derive(Debug, Clone)]
pub struct StabilityOptions {
    /// How long the text must hold unchanged, in milliseconds
    pub window_ms: u64,
}

impl Default for StabilityOptions {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_STABILITY_WINDOW_MS,
        }
    }
}

impl StabilityOptions {
    /// Create stability options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stability window in milliseconds
    #[must_use]
    pub const fn with_window(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    /// Get the window as Duration
    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Tracks successive output samples and reports when the text has held
/// unchanged for the stability window.
///
/// Pure state machine over caller-supplied timestamps, so the settle logic is
/// testable without a clock or a browser.
#[derive(Debug, Clone)]
pub struct TextStabilizer {
    window: Duration,
    last_text: Option<String>,
    unchanged_since: Option<Instant>,
}

impl TextStabilizer {
    /// Create a stabilizer with the given window
    #[must_use]
    pub fn new(options: &StabilityOptions) -> Self {
        Self {
            window: options.window(),
            last_text: None,
            unchanged_since: None,
        }
    }

    /// Feed one sample; returns `true` once the text has held unchanged for
    /// the full window. A changed sample restarts the window.
    pub fn observe(&mut self, text: &str, now: Instant) -> bool {
        match self.last_text.as_deref() {
            Some(last) if last == text => {}
            _ => {
                self.last_text = Some(text.to_string());
                self.unchanged_since = Some(now);
                return self.window.is_zero();
            }
        }
        self.unchanged_since
            .is_some_and(|since| now.duration_since(since) >= self.window)
    }

    /// The last observed text, if any
    #[must_use]
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }
}
