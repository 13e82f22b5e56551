use anyhow::{Context, Result};
use fantoccini::elements::Element;
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::locators::{Locator, Strategy};

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Get the WebDriver URL for this browser type
    pub fn webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }
}

/// The single browsing session every check runs against.
///
/// Wraps a WebDriver client and exposes exactly the capability set the suite
/// needs: navigate, find, current URL/title, script execution, and window
/// enumeration/switch/close. The page facades are the only writers; the
/// waiter and resolver only read.
pub struct Session {
    client: Client,
    browser_type: BrowserType,
}

impl Session {
    /// Connect to the WebDriver endpoint for the configured browser.
    pub async fn connect(config: &SuiteConfig) -> Result<Self> {
        let webdriver_url = config.browser.webdriver_url();
        info!("Connecting to {:?} WebDriver", config.browser);

        if !Self::is_webdriver_running(webdriver_url).await {
            let driver_name = match config.browser {
                BrowserType::Firefox => "geckodriver",
                BrowserType::Chrome => "chromedriver",
            };

            anyhow::bail!(
                "Cannot connect to {} at {}.\n\
                Please ensure {} is running:\n\
                  For Firefox: geckodriver --port 4444\n\
                  For Chrome: chromedriver --port 9515",
                driver_name,
                webdriver_url,
                driver_name
            );
        }

        let mut caps = serde_json::Map::new();

        match config.browser {
            BrowserType::Firefox => {
                let mut firefox_opts = serde_json::Map::new();
                let mut args = Vec::new();

                if config.headless {
                    args.push("--headless".to_string());
                }

                firefox_opts.insert("args".to_string(), json!(args));
                caps.insert("moz:firefoxOptions".to_string(), json!(firefox_opts));
            }
            BrowserType::Chrome => {
                let mut chrome_opts = serde_json::Map::new();
                let mut args = vec![
                    "--no-sandbox".to_string(),
                    "--disable-notifications".to_string(),
                    "--disable-popup-blocking".to_string(),
                    "--disable-blink-features=AutomationControlled".to_string(),
                ];

                if config.headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }

                // Chrome insists on an exclusive profile directory
                let profile_dir = tempfile::Builder::new()
                    .prefix("sitecheck-chrome-")
                    .tempdir()?;
                #[allow(deprecated)]
                let profile_path = profile_dir.into_path();
                args.push(format!("--user-data-dir={}", profile_path.display()));

                chrome_opts.insert("args".to_string(), json!(args));
                caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
            }
        }

        debug!("Connecting to WebDriver at {}", webdriver_url);

        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        Ok(Session {
            client,
            browser_type: config.browser,
        })
    }

    async fn is_webdriver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::get(&status_url).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    /// Navigate to a URL.
    ///
    /// Waits for the document to finish loading but deliberately nothing
    /// more; callers wait for whatever readiness condition matters to them
    /// next.
    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);

        self.client.goto(url).await?;

        let wait_script = "return document.readyState === 'complete';";
        for _ in 0..20 {
            // Max 2 seconds
            match self.client.execute(wait_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => break,
                _ => tokio::time::sleep(std::time::Duration::from_millis(100)).await,
            }
        }

        Ok(())
    }

    pub async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    pub async fn title(&self) -> Result<String> {
        let value = self
            .client
            .execute("return document.title;", vec![])
            .await
            .context("Failed to read document title")?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Find the first element matching a locator; errors when nothing matches.
    pub async fn find(&self, locator: &Locator) -> Result<Element> {
        let mut found = self
            .client
            .find_all(locator.to_fantoccini())
            .await
            .with_context(|| format!("Lookup failed for {}", locator.description))?;

        if found.is_empty() {
            anyhow::bail!(
                "No elements found matching {} ({})",
                locator.description,
                locator.selector
            );
        }
        Ok(found.remove(0))
    }

    /// Find all elements matching a locator; an empty result is not an error.
    pub async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        self.client
            .find_all(locator.to_fantoccini())
            .await
            .with_context(|| format!("Lookup failed for {}", locator.description))
    }

    /// Read an attribute off the first matching element.
    pub async fn attr(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let element = self.find(locator).await?;
        element
            .attr(name)
            .await
            .with_context(|| format!("Failed to read @{} of {}", name, locator.description))
    }

    pub async fn execute(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.client
            .execute(script, args)
            .await
            .context("Failed to execute script")
    }

    /// Scroll the first matching element into the middle of the viewport.
    pub async fn scroll_to(&self, locator: &Locator) -> Result<()> {
        debug!("Scrolling to {}", locator.description);
        self.run_on_element(locator, "el.scrollIntoView({block: 'center'});")
            .await
    }

    /// Dispatch mouse-over events to the first matching element.
    ///
    /// Script-dispatched rather than a real pointer move: every hover in this
    /// suite only needs the CSS hover state, and the script path works the
    /// same on both drivers.
    pub async fn hover(&self, locator: &Locator) -> Result<()> {
        debug!("Hovering over {}", locator.description);
        self.run_on_element(
            locator,
            "el.dispatchEvent(new MouseEvent('mouseover', {bubbles: true})); \
             el.dispatchEvent(new MouseEvent('mouseenter', {bubbles: true}));",
        )
        .await
    }

    /// Click via script. Used where an overlay intercepts native clicks.
    pub async fn script_click(&self, locator: &Locator) -> Result<()> {
        debug!("Script-clicking {}", locator.description);
        self.run_on_element(locator, "el.click();").await
    }

    async fn run_on_element(&self, locator: &Locator, body: &str) -> Result<()> {
        let lookup = match locator.strategy {
            Strategy::Css => "document.querySelector(arguments[0])",
            Strategy::XPath => {
                "document.evaluate(arguments[0], document, null, \
                 XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            }
        };
        let script = format!(
            "var el = {}; if (el) {{ {} }} return el !== null;",
            lookup, body
        );

        let found = self
            .execute(&script, vec![json!(locator.selector)])
            .await?
            .as_bool()
            .unwrap_or(false);

        if !found {
            anyhow::bail!(
                "No elements found matching {} ({})",
                locator.description,
                locator.selector
            );
        }
        Ok(())
    }

    pub async fn windows(&self) -> Result<Vec<WindowHandle>> {
        self.client
            .windows()
            .await
            .context("Failed to enumerate windows")
    }

    pub async fn current_window(&self) -> Result<WindowHandle> {
        self.client
            .window()
            .await
            .context("Failed to get current window handle")
    }

    pub async fn switch_to_window(&self, handle: WindowHandle) -> Result<()> {
        self.client
            .switch_to_window(handle)
            .await
            .context("Failed to switch window")
    }

    pub async fn close_window(&self) -> Result<()> {
        self.client
            .close_window()
            .await
            .context("Failed to close window")
    }

    /// Tear the session down.
    pub async fn close(self) -> Result<()> {
        self.client.close().await.context("Failed to close session")
    }
}
