// Unit tests for the retry-polling resolver

use super::*;
use std::cell::Cell;

fn policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(1)).unwrap()
}

#[test]
fn test_policy_validation() {
    assert!(RetryPolicy::new(0, Duration::from_millis(10)).is_err());
    assert!(RetryPolicy::new(1, Duration::ZERO).is_err());
    assert!(RetryPolicy::new(1, Duration::from_millis(1)).is_ok());
}

#[tokio::test]
async fn test_succeeds_on_first_attempt() {
    let actions = Cell::new(0u32);
    let result = resolve_populated(
        &policy(10),
        1,
        || {
            actions.set(actions.get() + 1);
            async { Ok(()) }
        },
        || async { Ok(5) },
    )
    .await;

    assert_eq!(result.unwrap(), 5);
    assert_eq!(actions.get(), 1);
}

#[tokio::test]
async fn test_retries_until_populated() {
    let actions = Cell::new(0u32);
    // Options appear only after the third open
    let result = resolve_populated(
        &policy(10),
        1,
        || {
            actions.set(actions.get() + 1);
            async { Ok(()) }
        },
        || {
            let n = actions.get();
            async move { Ok(if n >= 3 { 4 } else { 1 }) }
        },
    )
    .await;

    assert_eq!(result.unwrap(), 4);
    assert_eq!(actions.get(), 3);
}

#[tokio::test]
async fn test_exhaustion_uses_exactly_max_attempts() {
    let actions = Cell::new(0u32);
    let result = resolve_populated(
        &policy(4),
        1,
        || {
            actions.set(actions.get() + 1);
            async { Ok(()) }
        },
        || async { Ok(1) },
    )
    .await;

    match result {
        Err(CheckError::RetryExhausted {
            attempts,
            last_count,
        }) => {
            assert_eq!(attempts, 4);
            assert_eq!(last_count, 1);
        }
        other => panic!("expected RetryExhausted, got {:?}", other),
    }
    assert_eq!(actions.get(), 4);
}

#[tokio::test]
async fn test_threshold_is_strict_greater_than() {
    // A count equal to the threshold is still only the placeholder state
    let result = resolve_populated(&policy(2), 3, || async { Ok(()) }, || async { Ok(3) }).await;
    assert!(matches!(result, Err(CheckError::RetryExhausted { .. })));

    let result = resolve_populated(&policy(2), 3, || async { Ok(()) }, || async { Ok(4) }).await;
    assert_eq!(result.unwrap(), 4);
}

#[tokio::test]
async fn test_action_error_is_a_driver_fault() {
    let result = resolve_populated(
        &policy(3),
        1,
        || async { Err(anyhow::anyhow!("session lost")) },
        || async { Ok(0) },
    )
    .await;

    match result {
        Err(err) => assert!(err.is_fatal()),
        Ok(_) => panic!("expected driver fault"),
    }
}
