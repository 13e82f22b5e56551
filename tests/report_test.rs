// End-to-end reporting: log through scoped contexts, flush, and read the
// document back as JSON.

use tempfile::TempDir;

use sitecheck::Reporter;

#[test]
fn flushed_report_is_valid_json_with_verdicts() {
    let reporter = Reporter::new();

    let first = reporter.begin_test("home page branding");
    first.info("navigated to the home page");
    first.pass("logo is correct");
    first.end();

    let second = reporter.begin_test("open positions filter");
    second.info("dropdown opened with 20 options");
    second.fail("position card 2 location: expected 'Istanbul, Turkiye', actual 'Ankara, Turkiye'");
    second.end();

    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("report.json");
    reporter.flush(&path).expect("flush report");

    let raw = std::fs::read_to_string(&path).expect("read report");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("parse report");

    assert_eq!(document["suite"], "sitecheck");
    assert!(document["started_at"].is_string());
    assert!(document["finished_at"].is_string());

    let tests = document["tests"].as_array().expect("tests array");
    assert_eq!(tests.len(), 2);

    assert_eq!(tests[0]["name"], "home page branding");
    assert_eq!(tests[0]["verdict"], "pass");
    assert_eq!(tests[0]["events"].as_array().unwrap().len(), 2);

    assert_eq!(tests[1]["name"], "open positions filter");
    assert_eq!(tests[1]["verdict"], "fail");
    let events = tests[1]["events"].as_array().unwrap();
    assert_eq!(events[1]["level"], "fail");
    assert!(
        events[1]["message"]
            .as_str()
            .unwrap()
            .contains("Istanbul, Turkiye")
    );
}

#[test]
fn events_after_end_are_excluded_from_the_report() {
    let reporter = Reporter::new();

    let test = reporter.begin_test("teams block");
    test.pass("teams block is visible");
    test.end();
    test.fail("this must not appear");

    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("report.json");
    reporter.flush(&path).expect("flush report");

    let raw = std::fs::read_to_string(&path).expect("read report");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("parse report");

    assert_eq!(document["tests"][0]["verdict"], "pass");
    assert_eq!(document["tests"][0]["events"].as_array().unwrap().len(), 1);
}
