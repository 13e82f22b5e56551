// Unit tests for suite configuration

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_defaults() {
    let config = SuiteConfig::default();
    assert_eq!(config.base_url, "https://useinsider.com/");
    assert_eq!(config.browser, BrowserType::Firefox);
    assert!(config.headless);
    assert_eq!(config.default_timeout, Duration::from_secs(10));
}

#[test]
fn test_parse_timeout_secs() {
    assert_eq!(parse_timeout_secs("10").unwrap(), Duration::from_secs(10));
    assert_eq!(parse_timeout_secs(" 25 ").unwrap(), Duration::from_secs(25));

    assert!(parse_timeout_secs("0").is_err());
    assert!(parse_timeout_secs("ten").is_err());
    assert!(parse_timeout_secs("1.5").is_err());
}

#[test]
fn test_parse_bool() {
    assert!(parse_bool("X", "true").unwrap());
    assert!(parse_bool("X", "YES").unwrap());
    assert!(parse_bool("X", "1").unwrap());
    assert!(!parse_bool("X", "false").unwrap());
    assert!(!parse_bool("X", "0").unwrap());
    assert!(parse_bool("X", "maybe").is_err());
}

#[test]
fn test_url_joins_against_base() {
    let config = SuiteConfig::default();
    assert_eq!(
        config.url("careers/").unwrap(),
        "https://useinsider.com/careers/"
    );
    assert_eq!(
        config.url("careers/quality-assurance/").unwrap(),
        "https://useinsider.com/careers/quality-assurance/"
    );
}
