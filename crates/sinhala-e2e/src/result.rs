//! Result and error types for the harness.

use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving the transliteration page
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Fixture file missing or unparseable. Fatal: aborts the whole suite
    /// before any case executes.
    #[error("Failed to load fixture {path}: {message}")]
    FixtureLoad {
        /// Fixture path
        path: String,
        /// Error message
        message: String,
    },

    /// Expected page structure was not present on navigate. Fails one case,
    /// distinct from an assertion failure.
    #[error("Page setup failed: {message}")]
    Setup {
        /// Error message
        message: String,
    },

    /// Output never became non-empty (or never stabilized) within the bound
    #[error("Translation output did not appear within {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Non-empty input produced empty/whitespace output
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page creation or interaction error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Evaluation failed: {message}")]
    Evaluation {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Whether this error aborts the whole suite rather than a single case
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::FixtureLoad { .. } | Self::BrowserLaunch { .. })
    }
}
