use anyhow::Result;
use std::time::Duration;

use super::common;
use crate::errors::CheckError;
use crate::locators::careers;
use crate::reporter::TestContext;
use crate::session::Session;
use crate::verify::MetaTags;
use crate::waiter::{ReadinessCondition, SCROLL_SETTLE, WaitOutcome, Waiter};

/// Collapsed teams listing shows this many items before expansion
pub const COLLAPSED_TEAM_COUNT: usize = 3;

pub struct CareersPage<'a> {
    session: &'a Session,
    waiter: Waiter<'a>,
    test: TestContext,
}

impl<'a> CareersPage<'a> {
    pub fn new(session: &'a Session, test: TestContext, timeout: Duration) -> Self {
        CareersPage {
            session,
            waiter: Waiter::new(session, timeout),
            test,
        }
    }

    pub fn expected_meta() -> MetaTags {
        MetaTags::new(
            "Ready to disrupt? | Insider Careers",
            "Learn about Insider story",
            "https://useinsider.com/careers/",
            "Insider",
        )
    }

    /// Did the navigation land on the careers page?
    pub async fn opened(&self, expected_prefix: &str) -> Result<(), CheckError> {
        let url = self.session.current_url().await?;
        if url.starts_with(expected_prefix) {
            self.test.pass(format!("Careers page opened: {}", url));
            Ok(())
        } else {
            let err = CheckError::VerificationMismatch {
                label: "careers page URL".to_string(),
                expected: format!("{}...", expected_prefix),
                actual: url,
            };
            self.test.fail(err.to_string());
            Err(err)
        }
    }

    pub async fn verify_meta_tags(&self) -> Result<bool> {
        common::verify_meta_tags(self.session, &self.test, &Self::expected_meta()).await
    }

    pub async fn teams_block_present(&self) -> Result<bool, CheckError> {
        common::check_block(
            self.session,
            &self.waiter,
            &self.test,
            "teams block",
            &[
                careers::TEAMS_BLOCK_TITLE,
                careers::JOB_ITEMS,
                careers::SEE_ALL_TEAMS_BUTTON,
            ],
        )
        .await
    }

    pub async fn locations_block_present(&self) -> Result<bool, CheckError> {
        common::check_block(
            self.session,
            &self.waiter,
            &self.test,
            "locations block",
            &[careers::LOCATIONS_BLOCK_TITLE, careers::LOCATIONS_SLIDER],
        )
        .await
    }

    pub async fn life_at_block_present(&self) -> Result<bool, CheckError> {
        common::check_block(
            self.session,
            &self.waiter,
            &self.test,
            "'Life at Insider' block",
            &[careers::LIFE_AT_BLOCK_TITLE, careers::LIFE_AT_CAROUSEL],
        )
        .await
    }

    pub async fn job_item_count(&self) -> Result<usize> {
        let count = self.session.find_all(&careers::JOB_ITEMS).await?.len();
        self.test.info(format!("Current team item count: {}", count));
        Ok(count)
    }

    /// Click 'See all teams' and wait for the listing to grow past the
    /// collapsed count. The exact post-expansion count is a content fixture,
    /// so the wait condition is count-greater-than, not equality.
    pub async fn expand_all_teams(&self) -> Result<usize, CheckError> {
        self.session
            .scroll_to(&careers::SEE_ALL_TEAMS_BUTTON)
            .await
            .map_err(CheckError::from)?;
        self.waiter.settle(SCROLL_SETTLE).await;

        let button = self
            .waiter
            .wait_clickable(&careers::SEE_ALL_TEAMS_BUTTON)
            .await?;
        button
            .click()
            .await
            .map_err(|e| CheckError::Driver(e.into()))?;
        self.test.pass("Clicked the 'See all teams' button");

        let outcome = self
            .waiter
            .wait_for(
                &careers::JOB_ITEMS,
                &ReadinessCondition::CountGreaterThan(COLLAPSED_TEAM_COUNT),
            )
            .await?;

        let count = match outcome {
            WaitOutcome::Count(count) => count,
            _ => 0,
        };
        self.test.pass(format!(
            "Teams expanded after 'See all teams': {} items",
            count
        ));
        Ok(count)
    }
}
