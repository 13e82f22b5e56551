use anyhow::Result;
use std::time::Duration;

use super::common;
use crate::errors::CheckError;
use crate::locators::home;
use crate::reporter::TestContext;
use crate::session::Session;
use crate::verify::{self, MetaTags};
use crate::waiter::{ReadinessCondition, Waiter};

/// The announce banner fades in after the rest of the page settles; give it
/// more room than the suite default.
const ANNOUNCE_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HomePage<'a> {
    session: &'a Session,
    waiter: Waiter<'a>,
    test: TestContext,
}

impl<'a> HomePage<'a> {
    pub fn new(session: &'a Session, test: TestContext, timeout: Duration) -> Self {
        HomePage {
            session,
            waiter: Waiter::new(session, timeout),
            test,
        }
    }

    /// Expected social-preview tags of the home page
    pub fn expected_meta() -> MetaTags {
        MetaTags::new(
            "#1 Leader in Individualized, Cross-Channel CX — Insider",
            "Insider's CDP connects customer data, predicts behavior with AI, and individualizes experiences across channels",
            "https://useinsider.com/",
            "Insider",
        )
    }

    /// Navigate to a page. Deliberately does not wait for readiness; callers
    /// wait for whatever condition matters to them next.
    pub async fn open(&self, url: &str) -> Result<()> {
        self.session.goto(url).await
    }

    /// Accept the cookie banner if one is shown.
    pub async fn handle_cookie_banner(&self) -> Result<()> {
        let banners = self.session.find_all(&home::COOKIE_BANNER_TITLE).await?;
        if banners.is_empty() {
            self.test.info("No cookie banner displayed");
            return Ok(());
        }

        match self.waiter.wait_clickable(&home::ACCEPT_ALL_BUTTON).await {
            Ok(button) => {
                button.click().await.map_err(anyhow::Error::from)?;
                self.test.pass("Cookie banner handled: accepted all cookies");
            }
            Err(CheckError::Timeout { .. }) => {
                self.test.info("Cookie banner present but never became actionable");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    pub async fn verify_meta_tags(&self) -> Result<bool> {
        common::verify_meta_tags(self.session, &self.test, &Self::expected_meta()).await
    }

    pub async fn og_title(&self) -> Result<String> {
        let tags = common::read_meta_tags(self.session).await?;
        self.test.info(format!("OG title retrieved: {}", tags.title));
        Ok(tags.title)
    }

    /// The logo must point at the known asset and carry the expected alt text.
    pub async fn logo_correct(&self) -> Result<bool> {
        let logo = self.session.find(&home::LOGO).await?;
        let src = logo.attr("src").await?.unwrap_or_default();
        let alt = logo.attr("alt").await?.unwrap_or_default();

        let results = vec![
            verify::exact(
                "logo src",
                "https://useinsider.com/assets/img/logo-old.png",
                &src,
            ),
            verify::exact("logo alt", "insider_logo", &alt),
        ];
        common::log_results(&self.test, &results);
        Ok(verify::all_passed(&results))
    }

    pub async fn navbar_present(&self) -> Result<bool> {
        match self.waiter.wait_visible(&home::NAVBAR).await {
            Ok(_) => {
                self.test.pass("Navigation bar is visible");
                Ok(true)
            }
            Err(CheckError::Timeout { .. }) => {
                self.test.fail("Navigation bar is not visible");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn announce_info_present(&self) -> Result<bool> {
        let slow = self.waiter.with_timeout(ANNOUNCE_TIMEOUT);
        match slow.wait_visible(&home::ANNOUNCE_INFO).await {
            Ok(_) => {
                self.test.pass("Announce banner is visible");
                Ok(true)
            }
            Err(err @ CheckError::Timeout { .. }) => {
                self.test.fail(err.to_string());
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Open the Company dropdown and wait for it to report itself expanded.
    pub async fn open_company_menu(&self) -> Result<(), CheckError> {
        self.waiter.wait_clickable(&home::COMPANY_MENU).await?;
        // Script click: the sticky header intercepts native clicks here
        self.session
            .script_click(&home::COMPANY_MENU)
            .await
            .map_err(CheckError::from)?;
        self.session
            .hover(&home::COMPANY_MENU)
            .await
            .map_err(CheckError::from)?;

        self.waiter
            .wait_for(
                &home::COMPANY_MENU,
                &ReadinessCondition::AttributeEquals {
                    name: "aria-expanded".to_string(),
                    value: "true".to_string(),
                },
            )
            .await?;
        self.test.pass("'Company' menu opened");
        Ok(())
    }

    /// Navigate to the careers page through the Company dropdown.
    pub async fn click_careers(&self) -> Result<(), CheckError> {
        self.open_company_menu().await?;

        self.waiter.wait_clickable(&home::CAREERS_OPTION).await?;
        self.session
            .script_click(&home::CAREERS_OPTION)
            .await
            .map_err(CheckError::from)?;
        self.test.pass("Clicked the 'Careers' link");
        Ok(())
    }
}
