//! Page-level interaction facades.
//!
//! Each facade composes the readiness waiter and the retry resolver into
//! page-specific verbs and logs outcomes to its test context. Facades hold a
//! reference to the shared session rather than inheriting from a common base;
//! they are the only writers to the page, everything else observes.

mod common;

mod careers;
mod home;
mod jobs;

pub use careers::{COLLAPSED_TEAM_COUNT, CareersPage};
pub use home::HomePage;
pub use jobs::JobsListingPage;
