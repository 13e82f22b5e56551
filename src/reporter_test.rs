// Unit tests for the reporter and scoped test contexts

use super::*;

#[test]
fn test_events_attributed_to_their_context() {
    let reporter = Reporter::new();

    let first = reporter.begin_test("home page");
    first.info("navigated");
    first.pass("meta tags verified");
    first.end();

    let second = reporter.begin_test("careers page");
    second.fail("teams block missing");
    second.end();

    let verdicts = reporter.verdicts();
    assert_eq!(verdicts.len(), 2);
    assert_eq!(verdicts[0], ("home page".to_string(), true));
    assert_eq!(verdicts[1], ("careers page".to_string(), false));
}

#[test]
fn test_logging_after_end_is_a_noop() {
    let reporter = Reporter::new();

    let test = reporter.begin_test("filter by location");
    test.pass("filtered");
    test.end();
    test.fail("this must not land anywhere");

    let verdicts = reporter.verdicts();
    assert_eq!(verdicts[0].1, true);
}

#[test]
fn test_any_fail_event_fails_the_verdict() {
    let reporter = Reporter::new();

    let test = reporter.begin_test("aggregate block");
    test.pass("title visible");
    test.fail("count mismatch");
    test.pass("button visible");
    test.end();

    assert_eq!(reporter.verdicts()[0].1, false);
}

#[test]
fn test_cloned_context_logs_into_same_test() {
    let reporter = Reporter::new();

    let test = reporter.begin_test("shared");
    let clone = test.clone();
    clone.pass("from the clone");
    test.end();

    // Clone respects the ended flag too
    clone.fail("too late");
    assert_eq!(reporter.verdicts()[0].1, true);
}

#[test]
fn test_poisoned_lock_does_not_stop_logging() {
    let reporter = Reporter::new();
    let test = reporter.begin_test("resilience");

    // Poison the mutex by panicking while holding it
    let other = reporter.clone();
    let _ = std::thread::spawn(move || {
        let _guard = other.inner.lock().unwrap();
        panic!("interrupted mid-append");
    })
    .join();

    test.pass("recorded after the poisoning panic");
    test.end();
    assert_eq!(
        reporter.verdicts(),
        vec![("resilience".to_string(), true)]
    );
}

#[test]
fn test_flush_writes_full_event_log() {
    let reporter = Reporter::new();

    let test = reporter.begin_test("teams block");
    test.pass("title visible");
    test.pass("button visible");
    test.fail("job items count expected 3, actual 2");
    test.end();

    let dir = std::env::temp_dir();
    let path = dir.join(format!("sitecheck-report-{}.json", std::process::id()));
    reporter.flush(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["suite"], "sitecheck");
    let tests = doc["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0]["verdict"], "fail");
    // All three sub-outcomes present, not a single aggregate line
    let events = tests[0]["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["level"], "pass");
    assert_eq!(events[2]["level"], "fail");
    assert!(events[2]["timestamp"].is_string());
}
