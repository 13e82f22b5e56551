#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitecheck::config::{self, SuiteConfig};
use sitecheck::errors::CheckError;
use sitecheck::session::BrowserType;
use sitecheck::suite;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CHECKS_FAILED: i32 = 1;

#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(about = "Browser-driven functional checks for useinsider.com", long_about = None)]
struct Cli {
    /// Base URL of the site under verification
    #[arg(long)]
    base_url: Option<String>,

    /// Browser to drive (firefox or chrome)
    #[arg(short, long)]
    browser: Option<BrowserType>,

    /// Default wait budget in seconds for readiness conditions
    #[arg(long)]
    timeout_secs: Option<String>,

    /// Where to write the JSON report
    #[arg(long)]
    report: Option<String>,

    /// Show the browser window
    #[arg(long)]
    no_headless: bool,
}

impl Cli {
    fn into_config(self) -> Result<SuiteConfig> {
        let mut config = SuiteConfig::from_env()?;

        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(browser) = self.browser {
            config.browser = browser;
        }
        if let Some(secs) = self.timeout_secs {
            config.default_timeout = config::parse_timeout_secs(&secs)?;
        }
        if let Some(path) = self.report {
            config.report_path = path;
        }
        if self.no_headless {
            config.headless = false;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(summary) => {
            let all_passed = summary.all_passed();
            let summary_json = json!({
                "total": summary.total(),
                "passed": summary.passed(),
                "failed": summary.failed(),
            });
            println!(
                "{}",
                serde_json::to_string(&summary_json).unwrap_or_else(|_| "{}".to_string())
            );

            if all_passed {
                std::process::exit(EXIT_SUCCESS);
            }
            eprintln!(
                "{} of {} checks failed",
                summary.total() - summary.passed(),
                summary.total()
            );
            std::process::exit(EXIT_CHECKS_FAILED);
        }
        Err(err) => {
            // Convert to our error type to get proper exit code
            let check_err: CheckError = match err.downcast::<CheckError>() {
                Ok(check_err) => check_err,
                Err(other) => other.into(),
            };

            // JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": check_err.to_string(),
                "exit_code": check_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            eprintln!("Error: {}", check_err);
            std::process::exit(check_err.exit_code());
        }
    }
}

async fn run() -> Result<suite::SuiteSummary> {
    // Logs go to stderr so the summary on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitecheck=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let config = Cli::parse().into_config()?;
    suite::run(&config).await
}
