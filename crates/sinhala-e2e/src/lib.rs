//! End-to-end harness for Singlish-to-Sinhala transliteration pages.
//!
//! Drives a live transliteration page through the Chrome DevTools Protocol:
//! for each fixture sentence it opens the page, fills the Singlish input
//! control, waits for the Sinhala output to become non-empty and stable,
//! captures it, and asserts it is non-empty whenever the input was.
//!
//! The transliteration engine itself, the web server hosting the page, and
//! the browser engine are external collaborators; this crate only exercises
//! them through the UI.
//!
//! # Layers
//!
//! - [`fixture`] — ordered JSON test cases, loaded explicitly up front
//! - [`selectors`] — the brittle UI coupling, isolated behind a trait
//! - [`browser`] — chromiumoxide session behind the `browser` feature, plus
//!   the page trait and a scripted mock
//! - [`driver`] — the per-case navigate/fill/poll/settle/extract pipeline
//! - [`runner`] — assertion policy, failure classification, suite execution
//! - [`report`] — per-case outcomes, annotations, run summary
//!
//! # Example
//!
//! ```ignore
//! use sinhala_e2e::{load_fixtures, RunnerConfig, SuiteRunner};
//!
//! let cases = load_fixtures("data/singlish_sentences.json")?;
//! let runner = SuiteRunner::new(RunnerConfig::new("http://localhost:3000/"));
//! let report = runner.run(&cases).await?;
//! assert!(report.all_passed());
//! ```

pub mod browser;
pub mod driver;
pub mod fixture;
pub mod report;
pub mod result;
pub mod runner;
pub mod selectors;
pub mod wait;

pub use browser::{BrowserConfig, TranslationPage};
pub use driver::{TranslationDriver, TranslationResult};
pub use fixture::{load_fixtures, TestCase};
pub use report::{Annotation, CaseOutcome, CaseStatus, FailureKind, RunReport};
pub use result::{HarnessError, HarnessResult};
pub use runner::{execute_case, RunnerConfig};
pub use selectors::{Selector, SelectorProvider, SinglishPageSelectors};
pub use wait::{StabilityOptions, WaitOptions, OUTPUT_TIMEOUT_MS};

#[cfg(feature = "browser")]
pub use browser::Browser;
#[cfg(feature = "browser")]
pub use runner::SuiteRunner;
