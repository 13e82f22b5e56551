// Unit tests for the error taxonomy

use super::*;

#[test]
fn test_exit_codes_are_distinct() {
    let errors = vec![
        CheckError::ElementNotFound("x".to_string()),
        CheckError::OptionNotFound {
            label: "x".to_string(),
            available: vec![],
        },
        CheckError::Driver(anyhow::anyhow!("boom")),
        CheckError::Timeout {
            condition: "x".to_string(),
            elapsed: Duration::from_secs(1),
            last_observed: "y".to_string(),
        },
        CheckError::RetryExhausted {
            attempts: 3,
            last_count: 1,
        },
        CheckError::StaleReference("x".to_string()),
        CheckError::RedirectMismatch {
            expected: "a".to_string(),
            actual: "b".to_string(),
        },
        CheckError::VerificationMismatch {
            label: "l".to_string(),
            expected: "a".to_string(),
            actual: "b".to_string(),
        },
    ];

    let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_only_driver_faults_are_fatal() {
    assert!(CheckError::Driver(anyhow::anyhow!("gone")).is_fatal());
    assert!(!CheckError::ElementNotFound("logo".to_string()).is_fatal());
    assert!(
        !CheckError::Timeout {
            condition: "visibility".to_string(),
            elapsed: Duration::from_secs(10),
            last_observed: "0 elements".to_string(),
        }
        .is_fatal()
    );
}

#[test]
fn test_timeout_display_carries_diagnostic_context() {
    let err = CheckError::Timeout {
        condition: "visibility of announce banner (div.announce-info)".to_string(),
        elapsed: Duration::from_millis(10_000),
        last_observed: "0 matching elements".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("announce banner"));
    assert!(msg.contains("10.0s"));
    assert!(msg.contains("0 matching elements"));
}

#[test]
fn test_option_not_found_lists_available_options() {
    let err = CheckError::OptionNotFound {
        label: "Berlin".to_string(),
        available: vec!["All".to_string(), "Istanbul, Turkiye".to_string()],
    };
    let msg = err.to_string();
    assert!(msg.contains("'Berlin'"));
    assert!(msg.contains("Istanbul, Turkiye"));
}

#[test]
fn test_anyhow_classification() {
    let stale: CheckError = anyhow::anyhow!("stale element reference: element is not attached").into();
    assert!(matches!(stale, CheckError::StaleReference(_)));

    let missing: CheckError = anyhow::anyhow!("no such element: #nav").into();
    assert!(matches!(missing, CheckError::ElementNotFound(_)));

    let other: CheckError = anyhow::anyhow!("connection reset").into();
    assert!(matches!(other, CheckError::Driver(_)));
    assert!(other.is_fatal());
}
