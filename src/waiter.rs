//! Bounded polling against live DOM state.
//!
//! The atomic building block everything else composes on: given a readiness
//! condition and a timeout, poll at a sub-interval until the condition holds
//! or the budget runs out. Read-only; waits never mutate page state.

use anyhow::Result;
use fantoccini::elements::Element;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::errors::CheckError;
use crate::locators::Locator;
use crate::session::Session;

/// Polling granularity for all waits
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Named settle delay applied after programmatic scrolling, so smooth-scroll
/// animation cannot race the next visibility read. Tunable in one place
/// instead of scattered sleeps.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(300);

/// A predicate over live UI state used as a wait target
#[derive(Debug, Clone)]
pub enum ReadinessCondition {
    /// At least one matching element is displayed
    Visible,
    /// A matching element is displayed and enabled
    Clickable,
    /// The first matching element carries the attribute with this exact value
    AttributeEquals { name: String, value: String },
    /// More than `n` elements match the locator
    CountGreaterThan(usize),
    /// The locator no longer matches anything (old content detached)
    Stale,
    /// The session's current URL equals this value
    UrlEquals(String),
    /// No DOM-observable condition exists; wait out a named, tunable pause
    SettleDelay(Duration),
}

impl fmt::Display for ReadinessCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessCondition::Visible => write!(f, "visibility"),
            ReadinessCondition::Clickable => write!(f, "clickability"),
            ReadinessCondition::AttributeEquals { name, value } => {
                write!(f, "attribute {}=\"{}\"", name, value)
            }
            ReadinessCondition::CountGreaterThan(n) => write!(f, "count greater than {}", n),
            ReadinessCondition::Stale => write!(f, "detachment"),
            ReadinessCondition::UrlEquals(url) => write!(f, "url '{}'", url),
            ReadinessCondition::SettleDelay(d) => write!(f, "settle delay of {}ms", d.as_millis()),
        }
    }
}

/// What a satisfied wait produced
pub enum WaitOutcome {
    Element(Element),
    Count(usize),
    Value(String),
    Settled,
}

/// Single poll observation: either the condition holds (carrying the
/// satisfying value) or it does not, with a description of what was seen
pub(crate) enum Observation<T> {
    Ready(T),
    Pending(String),
}

pub(crate) enum PollError {
    Timeout {
        elapsed: Duration,
        last_observed: String,
    },
    Fault(anyhow::Error),
}

/// Poll `probe` at `interval` until it reports ready or `timeout` elapses.
///
/// The probe always runs at least once, and once more at the deadline, so a
/// condition that becomes true within the budget is returned and a timeout is
/// reported at approximately the budget (plus poll granularity), never
/// earlier.
pub(crate) async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<T, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Observation<T>>>,
{
    let start = Instant::now();
    let mut last_observed = String::from("not yet observed");

    loop {
        match probe().await {
            Ok(Observation::Ready(value)) => return Ok(value),
            Ok(Observation::Pending(state)) => last_observed = state,
            Err(err) => return Err(PollError::Fault(err)),
        }

        if start.elapsed() >= timeout {
            return Err(PollError::Timeout {
                elapsed: start.elapsed(),
                last_observed,
            });
        }
        sleep(interval).await;
    }
}

/// Element readiness waiter bound to one session.
///
/// Carries the suite default timeout; `with_timeout` derives a waiter for a
/// known-slow condition without touching the default.
pub struct Waiter<'a> {
    session: &'a Session,
    timeout: Duration,
    interval: Duration,
}

impl<'a> Waiter<'a> {
    pub fn new(session: &'a Session, timeout: Duration) -> Self {
        Waiter {
            session,
            timeout,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Per-call timeout override
    pub fn with_timeout(&self, timeout: Duration) -> Waiter<'a> {
        Waiter {
            session: self.session,
            timeout,
            interval: self.interval,
        }
    }

    /// Wait for a locator-scoped readiness condition.
    pub async fn wait_for(
        &self,
        locator: &Locator,
        condition: &ReadinessCondition,
    ) -> Result<WaitOutcome, CheckError> {
        debug!("Waiting for {} of {}", condition, locator.description);
        let session = self.session;
        let locator = *locator;

        let result = match condition {
            ReadinessCondition::Visible => poll_until(self.timeout, self.interval, || async move {
                let elements = session.find_all(&locator).await?;
                if elements.is_empty() {
                    return Ok(Observation::Pending("0 matching elements".to_string()));
                }
                match first_where(&elements, |displayed, _| displayed).await? {
                    Some(element) => Ok(Observation::Ready(WaitOutcome::Element(element))),
                    None => Ok(Observation::Pending(format!(
                        "{} matching elements, none displayed",
                        elements.len()
                    ))),
                }
            })
            .await,

            ReadinessCondition::Clickable => {
                poll_until(self.timeout, self.interval, || async move {
                    let elements = session.find_all(&locator).await?;
                    if elements.is_empty() {
                        return Ok(Observation::Pending("0 matching elements".to_string()));
                    }
                    match first_where(&elements, |displayed, enabled| displayed && enabled).await? {
                        Some(element) => Ok(Observation::Ready(WaitOutcome::Element(element))),
                        None => Ok(Observation::Pending(format!(
                            "{} matching elements, none clickable",
                            elements.len()
                        ))),
                    }
                })
                .await
            }

            ReadinessCondition::AttributeEquals { name, value } => {
                poll_until(self.timeout, self.interval, || {
                    let name = name.clone();
                    let value = value.clone();
                    async move {
                        let elements = session.find_all(&locator).await?;
                        let Some(element) = elements.first() else {
                            return Ok(Observation::Pending("0 matching elements".to_string()));
                        };
                        match element.attr(&name).await {
                            Ok(Some(actual)) if actual == value => {
                                Ok(Observation::Ready(WaitOutcome::Element(element.clone())))
                            }
                            Ok(Some(actual)) => {
                                Ok(Observation::Pending(format!("{}=\"{}\"", name, actual)))
                            }
                            Ok(None) => Ok(Observation::Pending(format!("@{} absent", name))),
                            Err(err) if is_stale(&err) => {
                                Ok(Observation::Pending("element went stale mid-poll".to_string()))
                            }
                            Err(err) => Err(err.into()),
                        }
                    }
                })
                .await
            }

            ReadinessCondition::CountGreaterThan(n) => {
                let n = *n;
                poll_until(self.timeout, self.interval, || async move {
                    let count = session.find_all(&locator).await?.len();
                    if count > n {
                        Ok(Observation::Ready(WaitOutcome::Count(count)))
                    } else {
                        Ok(Observation::Pending(format!("{} matching elements", count)))
                    }
                })
                .await
            }

            ReadinessCondition::Stale => poll_until(self.timeout, self.interval, || async move {
                let count = session.find_all(&locator).await?.len();
                if count == 0 {
                    Ok(Observation::Ready(WaitOutcome::Settled))
                } else {
                    Ok(Observation::Pending(format!(
                        "{} matching elements still attached",
                        count
                    )))
                }
            })
            .await,

            ReadinessCondition::UrlEquals(expected) => {
                return self.wait_for_url(expected).await.map(WaitOutcome::Value);
            }

            ReadinessCondition::SettleDelay(delay) => {
                sleep(*delay).await;
                Ok(WaitOutcome::Settled)
            }
        };

        result.map_err(|err| self.wait_error(err, &format!("{} of {}", condition, locator.description), locator.selector))
    }

    /// Wait until the session's current URL equals `expected`.
    pub async fn wait_for_url(&self, expected: &str) -> Result<String, CheckError> {
        debug!("Waiting for url '{}'", expected);
        let session = self.session;

        poll_until(self.timeout, self.interval, || {
            let expected = expected.to_string();
            async move {
                let current = session.current_url().await?;
                if current == expected {
                    Ok(Observation::Ready(current))
                } else {
                    Ok(Observation::Pending(current))
                }
            }
        })
        .await
        .map_err(|err| self.wait_error(err, &format!("url '{}'", expected), ""))
    }

    /// Wait until a previously-found element handle is detached from the DOM.
    pub async fn wait_for_staleness(
        &self,
        element: &Element,
        description: &str,
    ) -> Result<(), CheckError> {
        debug!("Waiting for detachment of {}", description);

        poll_until(self.timeout, self.interval, || async move {
            match element.tag_name().await {
                Ok(_) => Ok(Observation::Pending("still attached".to_string())),
                Err(err) if is_stale(&err) => Ok(Observation::Ready(())),
                Err(err) => Err(err.into()),
            }
        })
        .await
        .map_err(|err| self.wait_error(err, &format!("detachment of {}", description), ""))
    }

    /// Convenience: wait for visibility and hand back the element.
    pub async fn wait_visible(&self, locator: &Locator) -> Result<Element, CheckError> {
        match self.wait_for(locator, &ReadinessCondition::Visible).await? {
            WaitOutcome::Element(element) => Ok(element),
            _ => unreachable!("visibility waits yield elements"),
        }
    }

    /// Convenience: wait for clickability and hand back the element.
    pub async fn wait_clickable(&self, locator: &Locator) -> Result<Element, CheckError> {
        match self.wait_for(locator, &ReadinessCondition::Clickable).await? {
            WaitOutcome::Element(element) => Ok(element),
            _ => unreachable!("clickability waits yield elements"),
        }
    }

    /// Named pause where no DOM-observable condition exists.
    pub async fn settle(&self, delay: Duration) {
        sleep(delay).await;
    }

    fn wait_error(&self, err: PollError, condition: &str, selector: &str) -> CheckError {
        match err {
            PollError::Timeout {
                elapsed,
                last_observed,
            } => CheckError::Timeout {
                condition: if selector.is_empty() {
                    condition.to_string()
                } else {
                    format!("{} ({})", condition, selector)
                },
                elapsed,
                last_observed,
            },
            PollError::Fault(err) => err.into(),
        }
    }
}

fn is_stale(err: &fantoccini::error::CmdError) -> bool {
    let msg = err.to_string();
    msg.contains("stale element reference") || msg.contains("no such element")
}

/// First element satisfying the displayed/enabled predicate. Elements that go
/// stale between the find and the check are skipped rather than failing the
/// poll.
async fn first_where<F>(elements: &[Element], accept: F) -> Result<Option<Element>>
where
    F: Fn(bool, bool) -> bool,
{
    for element in elements {
        let displayed = match element.is_displayed().await {
            Ok(d) => d,
            Err(err) if is_stale(&err) => continue,
            Err(err) => return Err(err.into()),
        };
        let enabled = match element.is_enabled().await {
            Ok(e) => e,
            Err(err) if is_stale(&err) => continue,
            Err(err) => return Err(err.into()),
        };
        if accept(displayed, enabled) {
            return Ok(Some(element.clone()));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "waiter_test.rs"]
mod waiter_test;
