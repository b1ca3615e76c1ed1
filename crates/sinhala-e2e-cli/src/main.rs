//! Singlish-to-Sinhala E2E CLI: drives the transliteration page through a
//! fixture of Singlish sentences and reports the captured Sinhala output.
//!
//! ## Usage
//!
//! ```bash
//! sinhala-e2e                                  # data/singlish_sentences.json against localhost:3000
//! sinhala-e2e --base-url https://translit.example/
//! sinhala-e2e --parallel 4 --json-report target/report.json
//! ```

mod config;
mod error;
mod logging;
mod output;

use clap::Parser;
use config::{ColorChoice, Verbosity};
use error::{CliError, CliResult};
use output::ProgressReporter;
use sinhala_e2e::{load_fixtures, RunReport};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "sinhala-e2e",
    version,
    about = "End-to-end translation checks for a Singlish-to-Sinhala page"
)]
struct Cli {
    /// Path to the fixture file (JSON array of {id, input, type})
    #[arg(long, default_value = "data/singlish_sentences.json")]
    fixture: PathBuf,

    /// Application root URL
    #[arg(long, default_value = "http://localhost:3000/")]
    base_url: String,

    /// Bound on waiting for translation output, in milliseconds
    #[arg(long, default_value_t = sinhala_e2e::OUTPUT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Output must hold unchanged this long before extraction, in milliseconds
    #[arg(long, default_value_t = 1000)]
    settle_ms: u64,

    /// Pages driven concurrently
    #[arg(long, default_value_t = 1)]
    parallel: usize,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Disable the chromium sandbox (containers/CI)
    #[arg(long)]
    no_sandbox: bool,

    /// Path to the chromium binary
    #[arg(long, env = "CHROMIUM_PATH")]
    chromium_path: Option<String>,

    /// Write the run report to this path as JSON
    #[arg(long)]
    json_report: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Color output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Debug,
            }
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    logging::init(verbosity);

    let mut reporter = ProgressReporter::new(cli.color.should_color(), verbosity.is_quiet());

    // Fixture integrity is a precondition: abort before touching the browser
    let cases = load_fixtures(&cli.fixture)?;
    reporter.header("Singlish to Sinhala Translation Accuracy Tests");

    let report = run_suite(&cli, &cases, &mut reporter).await?;

    for outcome in &report.outcomes {
        if outcome.status.is_passed() {
            reporter.success(&outcome.label);
        } else {
            let reason = outcome.error.as_deref().unwrap_or("failed");
            reporter.failure(&format!("{} - {reason}", outcome.label));
        }
    }
    reporter.summary(
        report.passed_count(),
        report.failed_count(),
        report.duration,
    );

    if let Some(ref path) = cli.json_report {
        let json = report
            .to_json()
            .map_err(|e| CliError::report_generation(e.to_string()))?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "report written");
    }

    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::suite_failed(format!(
            "{} case(s) failed",
            report.failed_count()
        )))
    }
}

#[cfg(feature = "browser")]
async fn run_suite(
    cli: &Cli,
    cases: &[sinhala_e2e::TestCase],
    reporter: &mut ProgressReporter,
) -> CliResult<RunReport> {
    use sinhala_e2e::{BrowserConfig, RunnerConfig, StabilityOptions, SuiteRunner, WaitOptions};

    let mut browser = BrowserConfig::default().with_headless(!cli.headed);
    if cli.no_sandbox {
        browser = browser.with_no_sandbox();
    }
    if let Some(ref path) = cli.chromium_path {
        browser = browser.with_chromium_path(path);
    }

    let config = RunnerConfig::new(cli.base_url.clone())
        .with_browser(browser)
        .with_wait(WaitOptions::new().with_timeout(cli.timeout_ms))
        .with_stability(StabilityOptions::new().with_window(cli.settle_ms))
        .with_parallel(cli.parallel);

    reporter.start_spinner(&format!("running {} translation case(s)", cases.len()));
    let result = SuiteRunner::new(config).run(cases).await;
    reporter.finish_spinner();
    Ok(result?)
}

#[cfg(not(feature = "browser"))]
async fn run_suite(
    _cli: &Cli,
    _cases: &[sinhala_e2e::TestCase],
    _reporter: &mut ProgressReporter,
) -> CliResult<RunReport> {
    Err(CliError::suite_failed(
        "browser support not enabled; rebuild with --features browser",
    ))
}
