use anyhow::Result;
use std::time::Duration;

use crate::session::BrowserType;

/// Default readiness timeout applied when no per-call override is given
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Suite configuration, read once at process start.
///
/// Values come from the environment (`SITECHECK_*` variables) with CLI flags
/// taking precedence over both.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Base URL of the site under verification
    pub base_url: String,
    /// Browser to drive
    pub browser: BrowserType,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Default wait budget for readiness conditions
    pub default_timeout: Duration,
    /// Where the JSON report is written
    pub report_path: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfig {
            base_url: "https://useinsider.com/".to_string(),
            browser: BrowserType::Firefox,
            headless: true,
            default_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            report_path: "sitecheck-report.json".to_string(),
        }
    }
}

impl SuiteConfig {
    /// Build configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = SuiteConfig::default();

        if let Ok(url) = std::env::var("SITECHECK_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(browser) = std::env::var("SITECHECK_BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Ok(headless) = std::env::var("SITECHECK_HEADLESS") {
            config.headless = parse_bool("SITECHECK_HEADLESS", &headless)?;
        }
        if let Ok(secs) = std::env::var("SITECHECK_TIMEOUT_SECS") {
            config.default_timeout = parse_timeout_secs(&secs)?;
        }
        if let Ok(path) = std::env::var("SITECHECK_REPORT") {
            config.report_path = path;
        }

        Ok(config)
    }

    /// Resolve a URL relative to the configured base.
    pub fn url(&self, path: &str) -> Result<String> {
        let base = url::Url::parse(&self.base_url)?;
        Ok(base.join(path)?.to_string())
    }
}

/// Parse a timeout in whole seconds; zero is rejected because a zero wait
/// budget can never observe anything.
pub fn parse_timeout_secs(s: &str) -> Result<Duration> {
    let secs = s
        .trim()
        .parse::<u64>()
        .map_err(|_| anyhow::anyhow!("Invalid timeout '{}': expected whole seconds", s))?;
    if secs == 0 {
        anyhow::bail!("Timeout must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(name: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => anyhow::bail!("Invalid boolean for {}: '{}'", name, s),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
