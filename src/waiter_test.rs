// Unit tests for the polling core; conditions that need a live DOM are
// exercised through the generic probe interface.

use super::*;
use std::cell::Cell;

const FAST: Duration = Duration::from_millis(5);

#[tokio::test]
async fn test_poll_until_ready_on_first_observation() {
    let polls = Cell::new(0u32);
    let result: Result<u32, PollError> = poll_until(Duration::from_secs(1), FAST, || {
        polls.set(polls.get() + 1);
        async { Ok(Observation::Ready(42)) }
    })
    .await;

    assert_eq!(result.ok(), Some(42));
    assert_eq!(polls.get(), 1);
}

#[tokio::test]
async fn test_poll_until_succeeds_once_condition_holds() {
    let polls = Cell::new(0u32);
    let result: Result<u32, PollError> = poll_until(Duration::from_secs(5), FAST, || {
        polls.set(polls.get() + 1);
        let n = polls.get();
        async move {
            if n >= 4 {
                Ok(Observation::Ready(n))
            } else {
                Ok(Observation::Pending(format!("poll {}", n)))
            }
        }
    })
    .await;

    assert_eq!(result.ok(), Some(4));
    assert_eq!(polls.get(), 4);
}

#[tokio::test]
async fn test_poll_until_times_out_with_last_observation() {
    let result: Result<(), PollError> = poll_until(Duration::from_millis(30), FAST, || async {
        Ok(Observation::Pending("0 matching elements".to_string()))
    })
    .await;

    match result {
        Err(PollError::Timeout {
            elapsed,
            last_observed,
        }) => {
            assert!(elapsed >= Duration::from_millis(30));
            // Not meaningfully later than the budget plus poll granularity
            assert!(elapsed < Duration::from_millis(500));
            assert_eq!(last_observed, "0 matching elements");
        }
        _ => panic!("expected timeout"),
    }
}

#[tokio::test]
async fn test_poll_until_never_times_out_early() {
    let started = std::time::Instant::now();
    let result: Result<(), PollError> =
        poll_until(Duration::from_millis(50), FAST, || async {
            Ok(Observation::Pending("waiting".to_string()))
        })
        .await;

    assert!(matches!(result, Err(PollError::Timeout { .. })));
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_poll_until_probe_fault_aborts() {
    let polls = Cell::new(0u32);
    let result: Result<(), PollError> = poll_until(Duration::from_secs(5), FAST, || {
        polls.set(polls.get() + 1);
        async { Err(anyhow::anyhow!("session lost")) }
    })
    .await;

    assert!(matches!(result, Err(PollError::Fault(_))));
    // A driver fault stops polling immediately instead of burning the budget
    assert_eq!(polls.get(), 1);
}

#[test]
fn test_condition_display_names() {
    assert_eq!(ReadinessCondition::Visible.to_string(), "visibility");
    assert_eq!(
        ReadinessCondition::AttributeEquals {
            name: "aria-expanded".to_string(),
            value: "true".to_string(),
        }
        .to_string(),
        "attribute aria-expanded=\"true\""
    );
    assert_eq!(
        ReadinessCondition::CountGreaterThan(3).to_string(),
        "count greater than 3"
    );
    assert_eq!(
        ReadinessCondition::UrlEquals("https://useinsider.com/".to_string()).to_string(),
        "url 'https://useinsider.com/'"
    );
    assert_eq!(
        ReadinessCondition::SettleDelay(Duration::from_millis(300)).to_string(),
        "settle delay of 300ms"
    );
}
