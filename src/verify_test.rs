// Unit tests for verification comparisons

use super::*;
use pretty_assertions::assert_eq;

fn home_meta() -> MetaTags {
    MetaTags::new(
        "#1 Leader in Individualized, Cross-Channel CX — Insider",
        "Insider's CDP connects customer data, predicts behavior with AI, and individualizes experiences across channels",
        "https://useinsider.com/",
        "Insider",
    )
}

#[test]
fn test_exact_match() {
    let result = exact("og:title", "Insider", "Insider");
    assert!(result.passed);

    let result = exact("og:title", "Insider", "insider");
    assert!(!result.passed);
    assert_eq!(result.expected, "Insider");
    assert_eq!(result.actual, "insider");
}

#[test]
fn test_contains_match() {
    let result = contains("og:description", "Learn about Insider story", "Learn about Insider story and culture");
    assert!(result.passed);

    let result = contains("og:description", "Learn about Insider story", "Something else entirely");
    assert!(!result.passed);
}

#[test]
fn test_count_match() {
    assert!(count("job items", 3, 3).passed);
    let result = count("job items", 3, 15);
    assert!(!result.passed);
    assert_eq!(result.expected, "3");
    assert_eq!(result.actual, "15");
}

#[test]
fn test_meta_tags_pass_on_observed_fixture() {
    let expected = home_meta();
    // Observed page carries the full description; expected is a prefix of it
    let mut observed = home_meta();
    observed.description.push_str(" — all from one platform.");

    let results = meta_tags(&expected, &observed);
    assert_eq!(results.len(), 4);
    assert!(all_passed(&results));
}

#[test]
fn test_meta_tags_exact_fields_fail_individually() {
    let expected = home_meta();

    let mut wrong_title = home_meta();
    wrong_title.title = "Some other tagline".to_string();
    let results = meta_tags(&expected, &wrong_title);
    assert!(!all_passed(&results));
    assert!(!results[0].passed);
    // Unrelated fields still pass
    assert!(results[1].passed);
    assert!(results[2].passed);
    assert!(results[3].passed);

    let mut wrong_url = home_meta();
    wrong_url.url = "https://useinsider.com/careers/".to_string();
    assert!(!all_passed(&meta_tags(&expected, &wrong_url)));

    let mut wrong_site = home_meta();
    wrong_site.site_name = "insider".to_string();
    assert!(!all_passed(&meta_tags(&expected, &wrong_site)));
}

#[test]
fn test_meta_description_tolerates_unrelated_text() {
    let expected = home_meta();
    let mut observed = home_meta();
    // Extra text outside the expected substring does not matter
    observed.description = format!("Prefix text. {} Suffix text.", expected.description);
    assert!(all_passed(&meta_tags(&expected, &observed)));
}

#[test]
fn test_match_option_case_insensitive() {
    let options = vec![
        "Istanbul, Turkiye".to_string(),
        "All".to_string(),
        "Remote".to_string(),
    ];

    assert_eq!(match_option(&options, "istanbul, turkiye"), Some(0));
    assert_eq!(match_option(&options, "ISTANBUL, TURKIYE"), Some(0));
    assert_eq!(match_option(&options, "remote"), Some(2));
    assert_eq!(match_option(&options, "Berlin, Germany"), None);
}

#[test]
fn test_match_option_trims_whitespace() {
    let options = vec!["  Istanbul, Turkiye \n".to_string()];
    assert_eq!(match_option(&options, " istanbul, turkiye "), Some(0));
}

#[test]
fn test_describe_includes_values_on_failure() {
    let result = exact("og:url", "https://useinsider.com/", "https://useinsider.com/careers/");
    let msg = result.describe();
    assert!(msg.contains("og:url"));
    assert!(msg.contains("https://useinsider.com/'"));
    assert!(msg.contains("https://useinsider.com/careers/"));
}
