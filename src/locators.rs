//! Element-finding descriptors for each page of the site.
//!
//! Pure configuration data: a locator carries a strategy, a selector string
//! and a human-readable description for failure messages. Selectors mirror
//! the live markup of the site under verification.

/// How a selector string is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Css,
    XPath,
}

/// A rule for finding zero-or-more elements on a page
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    pub strategy: Strategy,
    pub selector: &'static str,
    pub description: &'static str,
}

impl Locator {
    pub const fn css(selector: &'static str, description: &'static str) -> Self {
        Locator {
            strategy: Strategy::Css,
            selector,
            description,
        }
    }

    pub const fn xpath(selector: &'static str, description: &'static str) -> Self {
        Locator {
            strategy: Strategy::XPath,
            selector,
            description,
        }
    }

    /// Convert to the WebDriver client's locator type
    pub fn to_fantoccini(&self) -> fantoccini::Locator<'static> {
        match self.strategy {
            Strategy::Css => fantoccini::Locator::Css(self.selector),
            Strategy::XPath => fantoccini::Locator::XPath(self.selector),
        }
    }
}

/// Social-preview meta tags, shared across pages
pub mod meta {
    use super::Locator;

    pub const OG_TITLE: Locator = Locator::css("meta[property='og:title']", "og:title meta tag");
    pub const OG_DESCRIPTION: Locator =
        Locator::css("meta[property='og:description']", "og:description meta tag");
    pub const OG_URL: Locator = Locator::css("meta[property='og:url']", "og:url meta tag");
    pub const OG_SITE_NAME: Locator =
        Locator::css("meta[property='og:site_name']", "og:site_name meta tag");
}

/// Home page
pub mod home {
    use super::Locator;

    pub const LOGO: Locator = Locator::xpath("//img[@alt='insider_logo']", "home page logo");
    pub const NAVBAR: Locator = Locator::css("div#navbarNavDropdown", "navigation bar");
    pub const ANNOUNCE_INFO: Locator = Locator::css("div.announce-info", "announce banner");
    pub const COOKIE_BANNER_TITLE: Locator =
        Locator::css("#wt-cli-cookie-banner-title", "cookie banner title");
    pub const ACCEPT_ALL_BUTTON: Locator =
        Locator::css("#wt-cli-accept-all-btn", "accept-all-cookies button");
    pub const COMPANY_MENU: Locator = Locator::xpath(
        "//a[contains(@class, 'nav-link dropdown-toggle') and contains(text(), 'Company')]",
        "'Company' navigation menu",
    );
    pub const CAREERS_OPTION: Locator = Locator::xpath(
        "//a[contains(@href, '/careers/') and contains(@class, 'dropdown-sub')]",
        "'Careers' dropdown entry",
    );
}

/// Careers page
pub mod careers {
    use super::Locator;

    pub const TEAMS_BLOCK_TITLE: Locator = Locator::xpath(
        "//h3[contains(@class, 'category-title-media') and contains(text(), 'Find your calling')]",
        "teams block title",
    );
    pub const JOB_ITEMS: Locator =
        Locator::css("div.job-item.col-12.col-lg-4.mt-5", "team job items");
    pub const SEE_ALL_TEAMS_BUTTON: Locator = Locator::xpath(
        "//a[contains(text(), 'See all teams') and contains(@class, 'loadmore')]",
        "'See all teams' button",
    );
    pub const LOCATIONS_BLOCK_TITLE: Locator = Locator::xpath(
        "//h3[contains(@class, 'category-title-media') and contains(text(), 'Our Locations')]",
        "locations block title",
    );
    pub const LOCATIONS_SLIDER: Locator =
        Locator::css("#location-slider", "locations slider");
    pub const LIFE_AT_BLOCK_TITLE: Locator = Locator::xpath(
        "//h2[contains(@class, 'elementor-heading-title') and contains(text(), 'Life at Insider')]",
        "'Life at Insider' block title",
    );
    pub const LIFE_AT_CAROUSEL: Locator = Locator::css(
        "div.elementor-main-swiper.swiper-container",
        "'Life at Insider' carousel",
    );
}

/// Quality Assurance jobs listing page
pub mod qa_listing {
    use super::Locator;

    pub const TITLE: Locator = Locator::xpath(
        "//h1[contains(@class, 'big-title') and contains(text(), 'Quality Assurance')]",
        "QA listing title",
    );
    pub const DESCRIPTION: Locator = Locator::xpath(
        "//p[contains(@class, 'text-medium') and contains(text(), 'Never miss a thing?')]",
        "QA listing description",
    );
    pub const SEE_ALL_QA_JOBS_BUTTON: Locator = Locator::xpath(
        "//a[contains(@href, '/careers/open-positions/') and contains(text(), 'See all QA jobs')]",
        "'See all QA jobs' button",
    );
}

/// Open positions page
pub mod open_positions {
    use super::Locator;

    pub const TITLE: Locator = Locator::xpath(
        "//h3[contains(text(), 'All open positions')]",
        "open positions title",
    );
    pub const DESCRIPTION: Locator = Locator::xpath(
        "//p[contains(text(), 'Ready to disrupt? Explore career opportunities at Insider.')]",
        "open positions description",
    );
    pub const FILTER_BY_LOCATION_LABEL: Locator = Locator::xpath(
        "//label[@for='filter-by-location']",
        "'Filter by Location' label",
    );
    pub const FILTER_BY_DEPARTMENT_LABEL: Locator = Locator::xpath(
        "//label[@for='filter-by-department']",
        "'Filter by Department' label",
    );
    pub const LOCATION_DROPDOWN: Locator = Locator::css(
        "#select2-filter-by-location-container",
        "location filter dropdown",
    );
    pub const LOCATION_DROPDOWN_ARROW: Locator =
        Locator::css(".select2-selection__arrow", "location dropdown arrow");
    pub const LOCATION_DROPDOWN_OPTIONS: Locator = Locator::css(
        "ul#select2-filter-by-location-results li",
        "location dropdown options",
    );
    pub const JOB_CARDS: Locator = Locator::css(
        "div.position-list-item-wrapper.bg-light",
        "position list items",
    );
    pub const JOB_DEPARTMENT: Locator =
        Locator::css("span.position-department", "position department span");
    pub const JOB_LOCATION: Locator =
        Locator::css("div.position-location", "position location");
    /// Relative to a job card
    pub const VIEW_ROLE_BUTTON: Locator = Locator::xpath(
        ".//a[contains(@class, 'btn btn-navy') and contains(text(), 'View Role')]",
        "'View Role' button",
    );
}

#[cfg(test)]
#[path = "locators_test.rs"]
mod locators_test;
