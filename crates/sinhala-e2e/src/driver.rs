//! Per-case page interaction.
//!
//! One strictly sequential pipeline per test case: navigate, check the input
//! control renders, fill it verbatim, poll the output region until its text
//! is non-empty and stable, extract. Failure classification is left to the
//! runner; this layer surfaces Setup/Timeout conditions as errors.

use crate::browser::TranslationPage;
use crate::fixture::TestCase;
use crate::result::{HarnessError, HarnessResult};
use crate::selectors::SelectorProvider;
use crate::wait::{StabilityOptions, TextStabilizer, WaitOptions};
use std::time::Instant;

/// Captured output of one executed test case. Ephemeral; attached to the
/// run report and discarded with it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TranslationResult {
    /// Id of the fixture case
    pub case_id: u32,
    /// Input text as submitted
    pub input: String,
    /// Output text as extracted from the page
    pub output: String,
    /// How long the output took to stabilize
    pub elapsed_wait_ms: u64,
}

/// Drives one page session through a single test case.
#[derive(Debug, Clone)]
pub struct TranslationDriver<S: SelectorProvider> {
    selectors: S,
    wait: WaitOptions,
    stability: StabilityOptions,
}

impl<S: SelectorProvider> TranslationDriver<S> {
    /// Create a driver with default wait bounds
    #[must_use]
    pub fn new(selectors: S) -> Self {
        Self {
            selectors,
            wait: WaitOptions::default(),
            stability: StabilityOptions::default(),
        }
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

    /// Run one case against a fresh page session.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::Setup`] when the input control is not visible after
    ///   navigation
    /// - [`HarnessError::Timeout`] when the output never becomes non-empty
    ///   and stable within the bound
    /// - navigation/evaluation errors from the page backend
    pub async fn run_case<P: TranslationPage>(
        &self,
        page: &mut P,
        base_url: &str,
        case: &TestCase,
    ) -> HarnessResult<TranslationResult> {
        tracing::debug!(case = case.id, url = base_url, "navigating");
        page.navigate(base_url).await?;

        let input_selector = self.selectors.input();
        if !page.is_visible(&input_selector).await? {
            return Err(HarnessError::Setup {
                message: "Singlish input control not visible after navigation".to_string(),
            });
        }

        tracing::debug!(case = case.id, input = %case.input, "filling input");
        page.fill(&input_selector, &case.input).await?;

        // Whitespace-only input gets no output wait: the engine legitimately
        // produces nothing, and no assertion will be applied either way.
        if !case.has_input() {
            let output = page
                .text(&self.selectors.output())
                .await?
                .unwrap_or_default();
            return Ok(TranslationResult {
                case_id: case.id,
                input: case.input.clone(),
                output,
                elapsed_wait_ms: 0,
            });
        }

        let (output, elapsed_wait_ms) = self.await_stable_output(page, case.id).await?;
        Ok(TranslationResult {
            case_id: case.id,
            input: case.input.clone(),
            output,
            elapsed_wait_ms,
        })
    }

    /// Poll the output region until its text is non-empty and has held
    /// unchanged for the stability window, bounded by the wait timeout.
    async fn await_stable_output<P: TranslationPage>(
        &self,
        page: &P,
        case_id: u32,
    ) -> HarnessResult<(String, u64)> {
        let output_selector = self.selectors.output();
        let start = Instant::now();
        let mut stabilizer = TextStabilizer::new(&self.stability);

        loop {
            let now = Instant::now();
            let sample = page.text(&output_selector).await?.unwrap_or_default();

            // Emptiness here is the raw text, not trimmed: a whitespace-only
            // render counts as output and is left for the assertion layer.
            if sample.is_empty() {
                stabilizer = TextStabilizer::new(&self.stability);
            } else if stabilizer.observe(&sample, now) {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                tracing::debug!(case = case_id, elapsed_ms, "output stabilized");
                return Ok((sample, elapsed_ms));
            }

            if start.elapsed() >= self.wait.timeout() {
                return Err(HarnessError::Timeout {
                    ms: self.wait.timeout_ms,
                });
            }
            tokio::time::sleep(self.wait.poll_interval()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::ScriptedPage;
    use crate::selectors::SinglishPageSelectors;

    fn fast_driver(window_ms: u64) -> TranslationDriver<SinglishPageSelectors> {
        TranslationDriver::new(SinglishPageSelectors)
            .with_wait(WaitOptions::new().with_timeout(500).with_poll_interval(5))
            .with_stability(StabilityOptions::new().with_window(window_ms))
    }

    fn basic_case() -> TestCase {
        TestCase {
            id: 1,
            input: "mama gedara yanawa".to_string(),
            case_type: "basic".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_case_extracts_stable_output() {
        let driver = fast_driver(20);
        let mut page = ScriptedPage::with_script(vec![
            Some(String::new()),
            Some("මම".to_string()),
            Some("මම ගෙදර යනවා".to_string()),
        ]);

        let result = driver
            .run_case(&mut page, "http://localhost:3000/", &basic_case())
            .await
            .unwrap();

        assert_eq!(result.case_id, 1);
        assert_eq!(result.output, "මම ගෙදර යනවා");
        assert_eq!(page.navigated_to.as_deref(), Some("http://localhost:3000/"));
        assert_eq!(page.filled_with.as_deref(), Some("mama gedara yanawa"));
    }

    #[tokio::test]
    async fn test_run_case_times_out_on_silent_output() {
        let driver = fast_driver(20);
        let mut page = ScriptedPage::silent();

        let err = driver
            .run_case(&mut page, "http://localhost:3000/", &basic_case())
            .await
            .unwrap_err();

        match err {
            HarnessError::Timeout { ms } => assert_eq!(ms, 500),
            other => panic!("Expected Timeout, got {other}"),
        }
        // The page was actually polled, not failed eagerly
        assert!(page.poll_count() > 1);
    }

    #[tokio::test]
    async fn test_run_case_missing_input_control_is_setup_failure() {
        let driver = fast_driver(20);
        let mut page = ScriptedPage::without_input();

        let err = driver
            .run_case(&mut page, "http://localhost:3000/", &basic_case())
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::Setup { .. }));
    }

    #[tokio::test]
    async fn test_run_case_empty_input_skips_output_wait() {
        let driver = fast_driver(20);
        let empty_case = TestCase {
            id: 2,
            input: "   ".to_string(),
            case_type: "edge".to_string(),
        };
        let mut page = ScriptedPage::silent();

        let result = driver
            .run_case(&mut page, "http://localhost:3000/", &empty_case)
            .await
            .unwrap();

        assert_eq!(result.output, "");
        assert_eq!(result.elapsed_wait_ms, 0);
        // Exactly one extraction read, no polling loop
        assert_eq!(page.poll_count(), 1);
    }

    #[tokio::test]
    async fn test_run_case_fills_verbatim_including_empty_string() {
        let driver = fast_driver(0);
        let empty_case = TestCase {
            id: 3,
            input: String::new(),
            case_type: "edge".to_string(),
        };
        let mut page = ScriptedPage::with_output("ignored");

        driver
            .run_case(&mut page, "http://localhost:3000/", &empty_case)
            .await
            .unwrap();
        assert_eq!(page.filled_with.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_streaming_output_waits_for_stability() {
        // Output keeps growing for the first polls; the extracted text must
        // be the settled one, not the first non-empty sample.
        let driver = fast_driver(15);
        let mut page = ScriptedPage::with_script(vec![
            Some("ම".to_string()),
            Some("මම".to_string()),
            Some("මම ගෙ".to_string()),
            Some("මම ගෙදර".to_string()),
        ]);

        let result = driver
            .run_case(&mut page, "http://localhost:3000/", &basic_case())
            .await
            .unwrap();
        assert_eq!(result.output, "මම ගෙදර");
    }
}
