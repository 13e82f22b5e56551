use std::fmt;
use std::time::Duration;

/// Custom error type that includes exit codes
#[derive(Debug)]
pub enum CheckError {
    /// Readiness condition never held within the timeout budget (exit code 5)
    Timeout {
        condition: String,
        elapsed: Duration,
        last_observed: String,
    },
    /// Act-and-check loop used all attempts without success (exit code 6)
    RetryExhausted { attempts: u32, last_count: usize },
    /// Zero matches for a required locator (exit code 2)
    ElementNotFound(String),
    /// Handle invalidated by navigation or re-render (exit code 7)
    StaleReference(String),
    /// No matching choice in a populated option list (exit code 3)
    OptionNotFound {
        label: String,
        available: Vec<String>,
    },
    /// Navigation target diverged from the declared link target (exit code 8)
    RedirectMismatch { expected: String, actual: String },
    /// Expected value did not match the observed value (exit code 9)
    VerificationMismatch {
        label: String,
        expected: String,
        actual: String,
    },
    /// Driver-level fault; unrecoverable, aborts the run (exit code 4)
    Driver(anyhow::Error),
}

impl CheckError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::ElementNotFound(_) => 2,
            CheckError::OptionNotFound { .. } => 3,
            CheckError::Driver(_) => 4,
            CheckError::Timeout { .. } => 5,
            CheckError::RetryExhausted { .. } => 6,
            CheckError::StaleReference(_) => 7,
            CheckError::RedirectMismatch { .. } => 8,
            CheckError::VerificationMismatch { .. } => 9,
        }
    }

    /// Whether this failure means the browsing session itself is unusable.
    ///
    /// Expected failure modes (timeouts, mismatches, missing options) fail the
    /// current scenario; a driver fault aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CheckError::Driver(_))
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Timeout {
                condition,
                elapsed,
                last_observed,
            } => {
                write!(
                    f,
                    "Timed out after {:.1}s waiting for {} (last observed: {})",
                    elapsed.as_secs_f64(),
                    condition,
                    last_observed
                )
            }
            CheckError::RetryExhausted {
                attempts,
                last_count,
            } => {
                write!(
                    f,
                    "Retry exhausted after {} attempts; last observed count was {}",
                    attempts, last_count
                )
            }
            CheckError::ElementNotFound(what) => {
                write!(f, "No elements found matching: {}", what)
            }
            CheckError::StaleReference(what) => {
                write!(f, "Stale element reference: {}", what)
            }
            CheckError::OptionNotFound { label, available } => {
                write!(
                    f,
                    "Option '{}' not found among {} available: {}",
                    label,
                    available.len(),
                    available.join(", ")
                )
            }
            CheckError::RedirectMismatch { expected, actual } => {
                write!(
                    f,
                    "Redirect mismatch: expected '{}', but landed on '{}'",
                    expected, actual
                )
            }
            CheckError::VerificationMismatch {
                label,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Verification '{}' failed: expected '{}', actual '{}'",
                    label, expected, actual
                )
            }
            CheckError::Driver(err) => write!(f, "Driver fault: {}", err),
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Driver(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for CheckError {
    fn from(err: anyhow::Error) -> Self {
        // Classify driver-level errors by message where the WebDriver client
        // does not give us a structured kind
        let msg = err.to_string();

        if msg.contains("stale element reference") || msg.contains("element is stale") {
            CheckError::StaleReference(msg)
        } else if msg.contains("no such element") || msg.contains("No elements found") {
            CheckError::ElementNotFound(msg)
        } else {
            CheckError::Driver(err)
        }
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
