//! Pure expected-vs-observed comparisons.
//!
//! Nothing here touches the DOM; page facades gather the observed values and
//! hand them in, so this logic is testable without a live browser.

use serde::Serialize;

/// Outcome of a single comparison. Always produced, never panics; the caller
/// decides whether a failed verification escalates into a hard test failure.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    pub label: String,
}

impl VerificationResult {
    /// One-line summary suitable for the report log
    pub fn describe(&self) -> String {
        if self.passed {
            format!("{}: ok ('{}')", self.label, self.actual)
        } else {
            format!(
                "{}: expected '{}', actual '{}'",
                self.label, self.expected, self.actual
            )
        }
    }
}

/// Exact string equality
pub fn exact(label: &str, expected: &str, actual: &str) -> VerificationResult {
    VerificationResult {
        passed: expected == actual,
        expected: expected.to_string(),
        actual: actual.to_string(),
        label: label.to_string(),
    }
}

/// Substring containment: passes when `actual` contains `expected`
pub fn contains(label: &str, expected: &str, actual: &str) -> VerificationResult {
    VerificationResult {
        passed: actual.contains(expected),
        expected: expected.to_string(),
        actual: actual.to_string(),
        label: label.to_string(),
    }
}

/// Exact count equality
pub fn count(label: &str, expected: usize, actual: usize) -> VerificationResult {
    VerificationResult {
        passed: expected == actual,
        expected: expected.to_string(),
        actual: actual.to_string(),
        label: label.to_string(),
    }
}

/// Social-preview metadata of a page (og: tags)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
}

impl MetaTags {
    pub fn new(title: &str, description: &str, url: &str, site_name: &str) -> Self {
        MetaTags {
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            site_name: site_name.to_string(),
        }
    }
}

/// Four-field social-preview comparison.
///
/// Title, URL and site name must match exactly; the description only needs to
/// contain the expected text, since the source may truncate it.
pub fn meta_tags(expected: &MetaTags, actual: &MetaTags) -> Vec<VerificationResult> {
    vec![
        exact("og:title", &expected.title, &actual.title),
        contains("og:description", &expected.description, &actual.description),
        exact("og:url", &expected.url, &actual.url),
        exact("og:site_name", &expected.site_name, &actual.site_name),
    ]
}

/// Aggregate verdict over a batch of results
pub fn all_passed(results: &[VerificationResult]) -> bool {
    results.iter().all(|r| r.passed)
}

/// Find the option whose text case-insensitively equals `label`, ignoring
/// surrounding whitespace. Returns the index into `options`.
pub fn match_option(options: &[String], label: &str) -> Option<usize> {
    let wanted = label.trim().to_lowercase();
    options
        .iter()
        .position(|o| o.trim().to_lowercase() == wanted)
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;
