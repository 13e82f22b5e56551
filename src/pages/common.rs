//! Helpers shared by the page facades.

use anyhow::Result;

use crate::errors::CheckError;
use crate::locators::{Locator, meta};
use crate::reporter::TestContext;
use crate::session::Session;
use crate::verify::{self, MetaTags, VerificationResult};
use crate::waiter::{SCROLL_SETTLE, Waiter};

/// Read the four social-preview meta tags off the current page.
pub(crate) async fn read_meta_tags(session: &Session) -> Result<MetaTags> {
    Ok(MetaTags {
        title: meta_content(session, &meta::OG_TITLE).await?,
        description: meta_content(session, &meta::OG_DESCRIPTION).await?,
        url: meta_content(session, &meta::OG_URL).await?,
        site_name: meta_content(session, &meta::OG_SITE_NAME).await?,
    })
}

async fn meta_content(session: &Session, locator: &Locator) -> Result<String> {
    session
        .attr(locator, "content")
        .await?
        .ok_or_else(|| anyhow::anyhow!("{} has no content attribute", locator.description))
}

/// Read the page's meta tags and compare the 4-tuple against `expected`,
/// logging each field's outcome.
pub(crate) async fn verify_meta_tags(
    session: &Session,
    test: &TestContext,
    expected: &MetaTags,
) -> Result<bool> {
    let actual = read_meta_tags(session).await?;
    let results = verify::meta_tags(expected, &actual);
    log_results(test, &results);
    Ok(verify::all_passed(&results))
}

pub(crate) fn log_results(test: &TestContext, results: &[VerificationResult]) {
    for result in results {
        if result.passed {
            test.pass(result.describe());
        } else {
            test.fail(result.describe());
        }
    }
}

/// Aggregate block assertion: wait-for-visible on every locator in the batch,
/// then log each outcome individually.
pub(crate) async fn check_block(
    session: &Session,
    waiter: &Waiter<'_>,
    test: &TestContext,
    block: &str,
    locators: &[Locator],
) -> Result<bool, CheckError> {
    let mut outcomes = Vec::with_capacity(locators.len());

    for locator in locators {
        if session.scroll_to(locator).await.is_ok() {
            waiter.settle(SCROLL_SETTLE).await;
        }

        match waiter.wait_visible(locator).await {
            Ok(element) => {
                let text = element.text().await.unwrap_or_default();
                outcomes.push((locator.description, Ok(snippet(text.trim()))));
            }
            Err(err @ CheckError::Timeout { .. }) => {
                outcomes.push((locator.description, Err(err)));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(log_block_outcomes(test, block, outcomes))
}

/// Log one event per block member and aggregate the verdict. A missing
/// element fails the aggregate but never hides the state of the others.
pub(crate) fn log_block_outcomes(
    test: &TestContext,
    block: &str,
    outcomes: Vec<(&str, Result<String, CheckError>)>,
) -> bool {
    let mut all_ok = true;

    for (description, outcome) in outcomes {
        match outcome {
            Ok(text) if text.is_empty() => {
                test.pass(format!("{}: {} is visible", block, description));
            }
            Ok(text) => {
                test.pass(format!("{}: {} is visible ('{}')", block, description, text));
            }
            Err(err) => {
                test.fail(format!("{}: {}", block, err));
                all_ok = false;
            }
        }
    }

    all_ok
}

/// First line of an element's text, capped for report readability
pub(crate) fn snippet(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let mut out: String = first_line.chars().take(80).collect();
    if first_line.chars().count() > 80 {
        out.push('…');
    }
    out
}

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;
