use anyhow::Result;
use fantoccini::wd::WindowHandle;
use std::time::Duration;

use super::common;
use crate::errors::CheckError;
use crate::locators::{Locator, open_positions, qa_listing};
use crate::reporter::TestContext;
use crate::retry::{self, RetryPolicy};
use crate::session::Session;
use crate::verify::{self, MetaTags};
use crate::waiter::{
    DEFAULT_POLL_INTERVAL, Observation, PollError, ReadinessCondition, SCROLL_SETTLE, Waiter,
    poll_until,
};

/// The option list sometimes needs several opens before it populates
const DROPDOWN_RETRY_ATTEMPTS: u32 = 10;
const DROPDOWN_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// A freshly rendered dropdown holds only the 'All' placeholder; anything
/// beyond that counts as populated. Raise to demand a fuller list.
const OPTION_PLACEHOLDER_COUNT: usize = 1;

/// How long a clicked link gets to spawn its new browsing context
const NEW_WINDOW_GRACE: Duration = Duration::from_secs(2);

/// Facade over the QA jobs listing page and the open-positions board it
/// links to.
pub struct JobsListingPage<'a> {
    session: &'a Session,
    waiter: Waiter<'a>,
    test: TestContext,
}

impl<'a> JobsListingPage<'a> {
    pub fn new(session: &'a Session, test: TestContext, timeout: Duration) -> Self {
        JobsListingPage {
            session,
            waiter: Waiter::new(session, timeout),
            test,
        }
    }

    pub fn expected_listing_meta() -> MetaTags {
        MetaTags::new(
            "Insider quality assurance job opportunities",
            "Do you have an eye for detail? Our Q&A team is committed to testing everything we build. Explore Insider quality assurance job opportunities.",
            "https://useinsider.com/careers/quality-assurance/",
            "Insider",
        )
    }

    pub fn expected_open_positions_meta() -> MetaTags {
        MetaTags::new(
            "Insider open positions | Insider",
            "Looking for your next career move? Explore all open positions at Insider and see what it's like being a part of culture.",
            "https://useinsider.com/careers/open-positions/",
            "Insider",
        )
    }

    pub async fn opened(&self, expected_prefix: &str) -> Result<(), CheckError> {
        let url = self.session.current_url().await?;
        if url.starts_with(expected_prefix) {
            self.test.pass(format!("Jobs listing page opened: {}", url));
            Ok(())
        } else {
            let err = CheckError::VerificationMismatch {
                label: "jobs listing URL".to_string(),
                expected: format!("{}...", expected_prefix),
                actual: url,
            };
            self.test.fail(err.to_string());
            Err(err)
        }
    }

    pub async fn verify_listing_meta_tags(&self) -> Result<bool> {
        common::verify_meta_tags(self.session, &self.test, &Self::expected_listing_meta()).await
    }

    pub async fn listing_block_present(&self) -> Result<bool, CheckError> {
        common::check_block(
            self.session,
            &self.waiter,
            &self.test,
            "QA listing",
            &[
                qa_listing::TITLE,
                qa_listing::DESCRIPTION,
                qa_listing::SEE_ALL_QA_JOBS_BUTTON,
            ],
        )
        .await
    }

    pub async fn click_see_all_qa_jobs(&self) -> Result<(), CheckError> {
        self.session
            .scroll_to(&qa_listing::SEE_ALL_QA_JOBS_BUTTON)
            .await
            .map_err(CheckError::from)?;
        self.waiter.settle(SCROLL_SETTLE).await;

        let button = self
            .waiter
            .wait_clickable(&qa_listing::SEE_ALL_QA_JOBS_BUTTON)
            .await?;
        button
            .click()
            .await
            .map_err(|e| CheckError::Driver(e.into()))?;
        self.test.pass("Clicked the 'See all QA jobs' button");
        Ok(())
    }

    pub async fn verify_open_positions_url(&self, expected: &str) -> Result<(), CheckError> {
        let url = self.waiter.wait_for_url(expected).await?;
        self.test.pass(format!("Open positions page URL verified: {}", url));
        Ok(())
    }

    pub async fn verify_open_positions_meta_tags(&self) -> Result<bool> {
        common::verify_meta_tags(
            self.session,
            &self.test,
            &Self::expected_open_positions_meta(),
        )
        .await
    }

    pub async fn open_positions_block_present(&self) -> Result<bool, CheckError> {
        common::check_block(
            self.session,
            &self.waiter,
            &self.test,
            "open positions",
            &[
                open_positions::TITLE,
                open_positions::DESCRIPTION,
                open_positions::FILTER_BY_LOCATION_LABEL,
                open_positions::FILTER_BY_DEPARTMENT_LABEL,
            ],
        )
        .await
    }

    /// Filter the board by location.
    ///
    /// The select2 dropdown lazy-loads its option list, and a single open
    /// does not reliably initialize it; the arrow is re-clicked through the
    /// retry resolver until more than the placeholder is present. The label
    /// match is case-insensitive.
    pub async fn filter_by_location(&self, label: &str) -> Result<(), CheckError> {
        let session = self.session;

        session
            .scroll_to(&open_positions::LOCATION_DROPDOWN)
            .await
            .map_err(CheckError::from)?;
        self.waiter.settle(SCROLL_SETTLE).await;
        self.waiter
            .wait_clickable(&open_positions::LOCATION_DROPDOWN)
            .await?;
        self.test.info("Location filter dropdown is clickable");

        let policy = RetryPolicy::new(DROPDOWN_RETRY_ATTEMPTS, DROPDOWN_RETRY_INTERVAL)
            .map_err(CheckError::Driver)?;
        let observed = retry::resolve_populated(
            &policy,
            OPTION_PLACEHOLDER_COUNT,
            || async move {
                session
                    .script_click(&open_positions::LOCATION_DROPDOWN_ARROW)
                    .await
            },
            || async move {
                Ok(session
                    .find_all(&open_positions::LOCATION_DROPDOWN_OPTIONS)
                    .await?
                    .len())
            },
        )
        .await;

        let observed = match observed {
            Ok(count) => count,
            Err(err) => {
                self.test.fail(format!("Location options never populated: {}", err));
                return Err(err);
            }
        };
        self.test.info(format!(
            "Location filter opened with {} options",
            observed
        ));

        let options = session
            .find_all(&open_positions::LOCATION_DROPDOWN_OPTIONS)
            .await
            .map_err(CheckError::from)?;
        let mut labels = Vec::with_capacity(options.len());
        for option in &options {
            labels.push(option.text().await.unwrap_or_default());
        }

        let Some(index) = verify::match_option(&labels, label) else {
            let err = CheckError::OptionNotFound {
                label: label.to_string(),
                available: labels,
            };
            self.test.fail(err.to_string());
            return Err(err);
        };
        let selected = labels[index].trim().to_string();

        options[index]
            .click()
            .await
            .map_err(|e| CheckError::Driver(e.into()))?;
        self.test.pass(format!("Selected location option '{}'", selected));

        // The control reflects the applied selection in its title attribute
        self.waiter
            .wait_for(
                &open_positions::LOCATION_DROPDOWN,
                &ReadinessCondition::AttributeEquals {
                    name: "title".to_string(),
                    value: selected.clone(),
                },
            )
            .await?;
        self.test
            .pass(format!("Dropdown selection updated to '{}'", selected));
        Ok(())
    }

    /// Every card on the filtered board belongs to `expected`.
    ///
    /// Filtering replaces the result container: the old cards detach before
    /// the new set renders. Verifying without waiting out that transition
    /// reads a result set mid-replacement, which is the main source of flaky
    /// false negatives here.
    pub async fn verify_departments(&self, expected: &str) -> Result<bool, CheckError> {
        if let Ok(card) = self.session.find(&open_positions::JOB_CARDS).await {
            match self
                .waiter
                .wait_for_staleness(&card, open_positions::JOB_CARDS.description)
                .await
            {
                Ok(()) => self.test.info("Old result set detached"),
                Err(CheckError::Timeout { .. }) => {
                    self.test.info("Result set did not detach; already refreshed")
                }
                Err(err) => return Err(err),
            }
        }
        self.waiter.wait_visible(&open_positions::JOB_CARDS).await?;

        self.check_cards(&open_positions::JOB_DEPARTMENT, "department", expected)
            .await
    }

    /// Every card on the filtered board is in `expected`.
    pub async fn verify_locations(&self, expected: &str) -> Result<bool, CheckError> {
        self.waiter.wait_visible(&open_positions::JOB_CARDS).await?;
        self.check_cards(&open_positions::JOB_LOCATION, "location", expected)
            .await
    }

    async fn check_cards(
        &self,
        field: &Locator,
        what: &str,
        expected: &str,
    ) -> Result<bool, CheckError> {
        let cards = self
            .session
            .find_all(&open_positions::JOB_CARDS)
            .await
            .map_err(CheckError::from)?;
        if cards.is_empty() {
            self.test.fail("No position cards to verify");
            return Ok(false);
        }

        let mut all_ok = true;
        for (i, card) in cards.iter().enumerate() {
            let value = match card.find(field.to_fantoccini()).await {
                Ok(element) => element.text().await.unwrap_or_default(),
                Err(_) => {
                    self.test
                        .fail(format!("Position card {} has no {} field", i + 1, what));
                    all_ok = false;
                    continue;
                }
            };
            let value = value.trim();
            if value != expected {
                self.test.fail(format!(
                    "Position card {} {}: expected '{}', actual '{}'",
                    i + 1,
                    what,
                    expected,
                    value
                ));
                all_ok = false;
            }
        }

        if all_ok {
            self.test.pass(format!(
                "All {} position cards have {} '{}'",
                cards.len(),
                what,
                expected
            ));
        }
        Ok(all_ok)
    }

    /// Hover the first position card, follow its 'View Role' link into the
    /// new browsing context, and verify the landing URL against the link's
    /// declared target.
    ///
    /// The new context is closed and focus restored to the original on every
    /// exit path, so repeated calls never accumulate leaked tabs.
    pub async fn follow_view_role(&self) -> Result<(), CheckError> {
        let session = self.session;

        session
            .scroll_to(&open_positions::JOB_CARDS)
            .await
            .map_err(CheckError::from)?;
        self.waiter.settle(SCROLL_SETTLE).await;
        session
            .hover(&open_positions::JOB_CARDS)
            .await
            .map_err(CheckError::from)?;
        self.test.info("Hovered over the first position card");

        let cards = session
            .find_all(&open_positions::JOB_CARDS)
            .await
            .map_err(CheckError::from)?;
        let Some(card) = cards.first() else {
            return Err(CheckError::ElementNotFound(
                open_positions::JOB_CARDS.description.to_string(),
            ));
        };

        let button = card
            .find(open_positions::VIEW_ROLE_BUTTON.to_fantoccini())
            .await
            .map_err(|e| {
                CheckError::ElementNotFound(format!(
                    "{} in the first position card: {}",
                    open_positions::VIEW_ROLE_BUTTON.description,
                    e
                ))
            })?;
        let expected = button
            .attr("href")
            .await
            .map_err(|e| CheckError::Driver(e.into()))?
            .ok_or_else(|| {
                CheckError::ElementNotFound("'View Role' link target (@href)".to_string())
            })?;
        self.test
            .info(format!("'View Role' declared target: {}", expected));

        let before = session.windows().await.map_err(CheckError::from)?;
        let original = session.current_window().await.map_err(CheckError::from)?;

        button
            .click()
            .await
            .map_err(|e| CheckError::Driver(e.into()))?;

        if let Some(handle) = self.new_window(&before).await? {
            session
                .switch_to_window(handle)
                .await
                .map_err(CheckError::from)?;
            self.test.info("Switched to the new browsing context");
        }

        let verification = match self.waiter.wait_for_url(&expected).await {
            Ok(actual) => {
                self.test
                    .pass(format!("Navigated to the 'View Role' page: {}", actual));
                Ok(())
            }
            Err(CheckError::Timeout { last_observed, .. }) => {
                let err = CheckError::RedirectMismatch {
                    expected: expected.clone(),
                    actual: last_observed,
                };
                self.test.fail(err.to_string());
                Err(err)
            }
            Err(err) => Err(err),
        };

        // Close-and-refocus runs regardless of the verification outcome.
        // Re-enumerate instead of trusting the pre-verification probe: a
        // context can appear after the grace period too.
        let now = session.windows().await.map_err(CheckError::from)?;
        for handle in spawned_contexts(&before, &now) {
            session
                .switch_to_window(handle)
                .await
                .map_err(CheckError::from)?;
            session.close_window().await.map_err(CheckError::from)?;
        }
        session
            .switch_to_window(original)
            .await
            .map_err(CheckError::from)?;
        self.test.info("Restored focus to the original browsing context");

        verification
    }

    /// Wait briefly for a browsing context that was not present before the
    /// click. `None` means the link navigated in place.
    async fn new_window(
        &self,
        before: &[WindowHandle],
    ) -> Result<Option<WindowHandle>, CheckError> {
        let session = self.session;

        let result = poll_until(NEW_WINDOW_GRACE, DEFAULT_POLL_INTERVAL, || async move {
            let now = session.windows().await?;
            let total = now.len();
            match spawned_contexts(before, &now).into_iter().next() {
                Some(handle) => Ok(Observation::Ready(handle)),
                None => Ok(Observation::Pending(format!(
                    "{} browsing contexts",
                    total
                ))),
            }
        })
        .await;

        match result {
            Ok(handle) => Ok(Some(handle)),
            Err(PollError::Timeout { .. }) => Ok(None),
            Err(PollError::Fault(err)) => Err(err.into()),
        }
    }
}

/// Contexts present in `now` that were not present in `before`.
fn spawned_contexts<T: PartialEq + Clone>(before: &[T], now: &[T]) -> Vec<T> {
    now.iter().filter(|h| !before.contains(h)).cloned().collect()
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod jobs_test;
