//! Browser-driven functional checks for the Insider marketing site.
//!
//! The suite drives a real browser over WebDriver and verifies the site's
//! user-visible behavior: page branding and social-preview tags, the careers
//! section's content blocks, and the open-positions board's location filter
//! through to an individual job posting.
//!
//! The moving parts:
//! - [`waiter`]: bounded polling against live DOM state
//! - [`retry`]: act-and-check resolver for lazily populated widgets
//! - [`pages`]: facades that encapsulate each page's locators and flows
//! - [`verify`]: pure expected/actual comparisons
//! - [`reporter`]: per-test event log and JSON report
//! - [`suite`]: the ordered scenarios themselves

pub mod config;
pub mod errors;
pub mod locators;
pub mod pages;
pub mod reporter;
pub mod retry;
pub mod session;
pub mod suite;
pub mod verify;
pub mod waiter;

pub use config::SuiteConfig;
pub use errors::CheckError;
pub use reporter::Reporter;
pub use session::{BrowserType, Session};
pub use suite::SuiteSummary;
