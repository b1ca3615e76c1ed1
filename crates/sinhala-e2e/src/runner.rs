//! Suite execution: assertion policy, failure classification, case isolation.
//!
//! Fixtures are loaded explicitly before anything else; a load failure aborts
//! the suite. Each case then runs against its own fresh page with no state
//! shared between cases, so case N's outcome never depends on case N-1.

use crate::browser::{BrowserConfig, TranslationPage};
use crate::driver::TranslationDriver;
use crate::fixture::TestCase;
use crate::report::{CaseOutcome, FailureKind};
#[cfg(any(test, feature = "browser"))]
use crate::report::RunReport;
use crate::result::HarnessError;
use crate::selectors::SelectorProvider;
#[cfg(any(test, feature = "browser"))]
use crate::selectors::SinglishPageSelectors;
use crate::wait::{StabilityOptions, WaitOptions};
use std::time::Instant;

/// Configuration for a suite run
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Application root URL
    pub base_url: String,
    /// Browser configuration
    pub browser: BrowserConfig,
    /// Output wait bounds
    pub wait: WaitOptions,
    /// Settle stability window
    pub stability: StabilityOptions,
    /// Pages driven concurrently (0 or 1 = serial)
    pub parallel: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            browser: BrowserConfig::default(),
            wait: WaitOptions::default(),
            stability: StabilityOptions::default(),
            parallel: 1,
        }
    }
}

impl RunnerConfig {
    /// Create a config for the given application root
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set browser configuration
    #[must_use]
    pub fn with_browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    /// Set wait options
    #[must_use]
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Set stability options
    #[must_use]
    pub fn with_stability(mut self, stability: StabilityOptions) -> Self {
        self.stability = stability;
        self
    }

    /// Set page concurrency
    #[must_use]
    pub const fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective number of concurrently driven pages
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        self.parallel.max(1)
    }
}

/// Run one case end to end and classify the outcome.
///
/// Assertion policy: if the trimmed input is non-empty, the trimmed output
/// must be non-empty. Empty/whitespace input gets no output assertion. Driver
/// errors classify as Setup (page plumbing, missing control) or Timeout;
/// neither affects sibling cases.
pub async fn execute_case<S: SelectorProvider, P: TranslationPage>(
    driver: &TranslationDriver<S>,
    page: &mut P,
    base_url: &str,
    case: &TestCase,
) -> CaseOutcome {
    let started = Instant::now();
    let label = case.label();

    let outcome = match driver.run_case(page, base_url, case).await {
        Ok(result) => {
            if case.has_input() && result.output.trim().is_empty() {
                CaseOutcome::failed(
                    case.id,
                    &case.case_type,
                    label,
                    &case.input,
                    &result.output,
                    FailureKind::Assertion,
                    "non-empty input produced empty/whitespace output",
                    started.elapsed(),
                )
            } else {
                CaseOutcome::passed(&case.case_type, label, &result, started.elapsed())
            }
        }
        Err(e) => {
            let kind = match e {
                HarnessError::Timeout { .. } => FailureKind::Timeout,
                HarnessError::Assertion { .. } => FailureKind::Assertion,
                _ => FailureKind::Setup,
            };
            CaseOutcome::failed(
                case.id,
                &case.case_type,
                label,
                &case.input,
                "",
                kind,
                e.to_string(),
                started.elapsed(),
            )
        }
    };

    outcome.log();
    outcome
}

/// Browser-backed suite runner (requires the `browser` feature).
#[cfg(feature = "browser")]
#[derive(Debug)]
pub struct SuiteRunner<S: SelectorProvider = SinglishPageSelectors> {
    config: RunnerConfig,
    driver: TranslationDriver<S>,
}

#[cfg(feature = "browser")]
impl SuiteRunner<SinglishPageSelectors> {
    /// Create a runner with the default page selectors
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        let driver = TranslationDriver::new(SinglishPageSelectors)
            .with_wait(config.wait.clone())
            .with_stability(config.stability.clone());
        Self { config, driver }
    }
}

#[cfg(feature = "browser")]
impl<S: SelectorProvider> SuiteRunner<S> {
    /// Create a runner with a custom selector provider
    #[must_use]
    pub fn with_selectors(config: RunnerConfig, selectors: S) -> Self {
        let driver = TranslationDriver::new(selectors)
            .with_wait(config.wait.clone())
            .with_stability(config.stability.clone());
        Self { config, driver }
    }

    /// Run all cases against the configured target.
    ///
    /// Launches one browser; every case gets a fresh page. Cases may run
    /// concurrently up to the configured bound, but the report preserves
    /// fixture order.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::BrowserLaunch`] when the browser cannot be
    /// started; per-case failures are recorded in the report, not returned.
    pub async fn run(&self, cases: &[TestCase]) -> crate::result::HarnessResult<RunReport> {
        use futures::stream::{self, StreamExt};

        let browser = crate::browser::Browser::launch(self.config.browser.clone()).await?;
        let start = Instant::now();

        tracing::info!(
            cases = cases.len(),
            base_url = %self.config.base_url,
            jobs = self.config.effective_jobs(),
            "starting translation suite"
        );

        let mut indexed: Vec<(usize, CaseOutcome)> = stream::iter(cases.iter().enumerate())
            .map(|(index, case)| {
                let browser = &browser;
                let driver = &self.driver;
                let base_url = self.config.base_url.as_str();
                async move {
                    let outcome = match browser.new_page().await {
                        Ok(mut page) => execute_case(driver, &mut page, base_url, case).await,
                        Err(e) => CaseOutcome::failed(
                            case.id,
                            &case.case_type,
                            case.label(),
                            &case.input,
                            "",
                            FailureKind::Setup,
                            e.to_string(),
                            std::time::Duration::ZERO,
                        ),
                    };
                    (index, outcome)
                }
            })
            .buffer_unordered(self.config.effective_jobs())
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);

        let mut report = RunReport::new();
        for (_, outcome) in indexed {
            report.record(outcome);
        }
        report.duration = start.elapsed();

        browser.close().await?;

        tracing::info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            elapsed_ms = report.duration.as_millis() as u64,
            "translation suite finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::ScriptedPage;
    use crate::report::CaseStatus;

    fn fast_driver() -> TranslationDriver<SinglishPageSelectors> {
        TranslationDriver::new(SinglishPageSelectors)
            .with_wait(WaitOptions::new().with_timeout(300).with_poll_interval(5))
            .with_stability(StabilityOptions::new().with_window(15))
    }

    fn case(id: u32, input: &str, case_type: &str) -> TestCase {
        TestCase {
            id,
            input: input.to_string(),
            case_type: case_type.to_string(),
        }
    }

    #[test]
    fn test_effective_jobs_floors_at_one() {
        assert_eq!(RunnerConfig::default().effective_jobs(), 1);
        assert_eq!(RunnerConfig::default().with_parallel(0).effective_jobs(), 1);
        assert_eq!(RunnerConfig::default().with_parallel(4).effective_jobs(), 4);
    }

    #[tokio::test]
    async fn test_non_empty_input_with_output_passes() {
        let driver = fast_driver();
        let mut page = ScriptedPage::with_output("මම ගෙදර යනවා");
        let outcome = execute_case(
            &driver,
            &mut page,
            "http://localhost:3000/",
            &case(1, "mama gedara yanawa", "basic"),
        )
        .await;

        assert_eq!(outcome.status, CaseStatus::Passed);
        assert_eq!(outcome.output, "මම ගෙදර යනවා");
        assert_eq!(outcome.annotation.kind, "Translation Result");
    }

    #[tokio::test]
    async fn test_whitespace_output_is_assertion_failure() {
        let driver = fast_driver();
        let mut page = ScriptedPage::with_output("\n  ");
        let outcome = execute_case(
            &driver,
            &mut page,
            "http://localhost:3000/",
            &case(2, "api yamu", "basic"),
        )
        .await;

        assert_eq!(outcome.status, CaseStatus::Failed);
        assert_eq!(outcome.failure, Some(FailureKind::Assertion));
        // Captured output stays attached for diagnosis
        assert_eq!(outcome.output, "\n  ");
    }

    #[tokio::test]
    async fn test_silent_output_is_timeout_failure() {
        let driver = fast_driver();
        let mut page = ScriptedPage::silent();
        let outcome = execute_case(
            &driver,
            &mut page,
            "http://localhost:3000/",
            &case(3, "kohomada", "basic"),
        )
        .await;

        assert_eq!(outcome.status, CaseStatus::Failed);
        assert_eq!(outcome.failure, Some(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn test_missing_input_control_is_setup_failure() {
        let driver = fast_driver();
        let mut page = ScriptedPage::without_input();
        let outcome = execute_case(
            &driver,
            &mut page,
            "http://localhost:3000/",
            &case(4, "mama", "basic"),
        )
        .await;

        assert_eq!(outcome.status, CaseStatus::Failed);
        assert_eq!(outcome.failure, Some(FailureKind::Setup));
    }

    #[tokio::test]
    async fn test_empty_input_passes_regardless_of_output() {
        let driver = fast_driver();
        let mut page = ScriptedPage::silent();
        let outcome = execute_case(
            &driver,
            &mut page,
            "http://localhost:3000/",
            &case(5, "", "edge"),
        )
        .await;

        assert_eq!(outcome.status, CaseStatus::Passed);
        assert_eq!(outcome.output, "");
    }

    #[tokio::test]
    async fn test_case_failures_are_isolated() {
        let driver = fast_driver();
        let mut report = RunReport::new();

        // First case fails on a broken page, second runs on a fresh one
        let mut broken = ScriptedPage::without_input();
        report.record(
            execute_case(
                &driver,
                &mut broken,
                "http://localhost:3000/",
                &case(1, "mama", "basic"),
            )
            .await,
        );

        let mut healthy = ScriptedPage::with_output("මම");
        report.record(
            execute_case(
                &driver,
                &mut healthy,
                "http://localhost:3000/",
                &case(2, "mama", "basic"),
            )
            .await,
        );

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.outcomes[1].status, CaseStatus::Passed);
    }
}
