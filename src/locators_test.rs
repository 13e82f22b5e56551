// Unit tests for locator descriptors

use super::*;

#[test]
fn test_css_locator_conversion() {
    let loc = Locator::css("div.announce-info", "announce banner");
    match loc.to_fantoccini() {
        fantoccini::Locator::Css(sel) => assert_eq!(sel, "div.announce-info"),
        other => panic!("expected a CSS locator, got {:?}", other),
    }
}

#[test]
fn test_xpath_locator_conversion() {
    let loc = Locator::xpath("//img[@alt='insider_logo']", "logo");
    match loc.to_fantoccini() {
        fantoccini::Locator::XPath(sel) => assert_eq!(sel, "//img[@alt='insider_logo']"),
        other => panic!("expected an XPath locator, got {:?}", other),
    }
}

#[test]
fn test_registries_carry_descriptions() {
    // Every failure message leans on the description; none may be empty
    let all = [
        home::LOGO,
        home::NAVBAR,
        home::ANNOUNCE_INFO,
        home::COOKIE_BANNER_TITLE,
        home::ACCEPT_ALL_BUTTON,
        home::COMPANY_MENU,
        home::CAREERS_OPTION,
        careers::TEAMS_BLOCK_TITLE,
        careers::JOB_ITEMS,
        careers::SEE_ALL_TEAMS_BUTTON,
        careers::LOCATIONS_BLOCK_TITLE,
        careers::LIFE_AT_BLOCK_TITLE,
        qa_listing::TITLE,
        qa_listing::DESCRIPTION,
        qa_listing::SEE_ALL_QA_JOBS_BUTTON,
        open_positions::TITLE,
        open_positions::LOCATION_DROPDOWN,
        open_positions::LOCATION_DROPDOWN_OPTIONS,
        open_positions::JOB_CARDS,
        open_positions::VIEW_ROLE_BUTTON,
    ];
    for loc in all {
        assert!(!loc.selector.is_empty());
        assert!(!loc.description.is_empty());
    }
}

#[test]
fn test_view_role_button_is_card_relative() {
    // Searched from within a job card, so the xpath must be relative
    assert!(open_positions::VIEW_ROLE_BUTTON.selector.starts_with(".//"));
}
