//! Scenario orchestration.
//!
//! Runs the ordered check scenarios against one browsing session, records
//! every observation through the reporter, and turns the per-test verdicts
//! into a run summary. A scenario failure is recorded and the run moves on;
//! only a driver fault aborts the whole run.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::config::SuiteConfig;
use crate::errors::CheckError;
use crate::pages::{CareersPage, HomePage, JobsListingPage};
use crate::reporter::{Reporter, TestContext};
use crate::session::Session;
use crate::verify;

/// Location option the job board is filtered to
pub const FILTER_LOCATION: &str = "Istanbul, Turkiye";
/// Department every filtered position must belong to
pub const FILTER_DEPARTMENT: &str = "Quality Assurance";

/// Per-test verdicts of a finished run
pub struct SuiteSummary {
    pub outcomes: Vec<(String, bool)>,
}

impl SuiteSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|(_, ok)| *ok).count()
    }

    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|(_, ok)| *ok)
    }
}

/// Run every scenario, write the report, and summarize.
///
/// The session is torn down and the report flushed on every exit path,
/// including a mid-run driver fault.
pub async fn run(config: &SuiteConfig) -> Result<SuiteSummary> {
    let session = Session::connect(config).await?;
    info!(
        "Session established against {} ({:?})",
        config.base_url,
        session.browser_type()
    );
    let reporter = Reporter::new();

    let runner = Runner {
        config,
        session: &session,
        reporter: &reporter,
    };
    let run_result = runner.run_all().await;

    if let Err(err) = session.close().await {
        warn!("Session teardown failed: {:#}", err);
    }
    reporter.flush(Path::new(&config.report_path))?;

    run_result?;

    let summary = SuiteSummary {
        outcomes: reporter.verdicts(),
    };
    for (name, ok) in &summary.outcomes {
        info!("{}: {}", name, if *ok { "PASS" } else { "FAIL" });
    }
    Ok(summary)
}

struct Runner<'a> {
    config: &'a SuiteConfig,
    session: &'a Session,
    reporter: &'a Reporter,
}

impl Runner<'_> {
    async fn run_all(&self) -> Result<()> {
        let test = self.reporter.begin_test("Home page loads with correct branding");
        let result = self.check_home_page(&test).await;
        self.conclude(test, result)?;

        let test = self
            .reporter
            .begin_test("Careers page opens through the Company menu");
        let result = self.check_careers_opening(&test).await;
        self.conclude(test, result)?;

        let test = self
            .reporter
            .begin_test("Teams block is present and expands on 'See all teams'");
        let result = self.check_teams_block(&test).await;
        self.conclude(test, result)?;

        let test = self.reporter.begin_test("Locations block is present");
        let result = self.check_locations_block(&test).await;
        self.conclude(test, result)?;

        let test = self.reporter.begin_test("'Life at Insider' block is present");
        let result = self.check_life_at_block(&test).await;
        self.conclude(test, result)?;

        let test = self.reporter.begin_test("QA jobs listing page is correct");
        let result = self.check_qa_listing(&test).await;
        self.conclude(test, result)?;

        let test = self
            .reporter
            .begin_test("'See all QA jobs' leads to the open positions board");
        let result = self.check_open_positions(&test).await;
        self.conclude(test, result)?;

        let test = self
            .reporter
            .begin_test("Filtered positions match the selected location and department");
        let result = self.check_filtered_positions(&test).await;
        self.conclude(test, result)?;

        Ok(())
    }

    /// Record a scenario's outcome. Recoverable failures close the test and
    /// let the run continue; a driver fault propagates and aborts.
    fn conclude(&self, test: TestContext, result: Result<(), CheckError>) -> Result<()> {
        match result {
            Ok(()) => {
                test.end();
                Ok(())
            }
            Err(err) if err.is_fatal() => {
                test.fail(format!("Run aborted: {}", err));
                test.end();
                Err(err.into())
            }
            Err(err) => {
                test.fail(format!("Scenario stopped: {}", err));
                test.end();
                Ok(())
            }
        }
    }

    fn timeout(&self) -> std::time::Duration {
        self.config.default_timeout
    }

    /// Navigate to `path` and dismiss the cookie banner if one appears.
    async fn open(&self, test: &TestContext, path: &str) -> Result<(), CheckError> {
        let url = self.config.url(path)?;
        let home = HomePage::new(self.session, test.clone(), self.timeout());
        home.open(&url).await?;
        home.handle_cookie_banner().await?;
        Ok(())
    }

    async fn check_home_page(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "").await?;
        let home = HomePage::new(self.session, test.clone(), self.timeout());

        let title = self.session.title().await?;
        test.info(format!("Document title: {}", title));

        home.verify_meta_tags().await?;

        let og_title = home.og_title().await?;
        let result = verify::exact("og:title", &HomePage::expected_meta().title, &og_title);
        if result.passed {
            test.pass(result.describe());
        } else {
            test.fail(result.describe());
        }

        home.logo_correct().await?;
        home.navbar_present().await?;
        home.announce_info_present().await?;
        Ok(())
    }

    async fn check_careers_opening(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "").await?;
        let home = HomePage::new(self.session, test.clone(), self.timeout());
        home.click_careers().await?;

        let careers = CareersPage::new(self.session, test.clone(), self.timeout());
        let prefix = self.config.url("careers")?;
        careers.opened(&prefix).await?;
        careers.verify_meta_tags().await?;
        Ok(())
    }

    async fn check_teams_block(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "careers/").await?;
        let careers = CareersPage::new(self.session, test.clone(), self.timeout());

        careers.teams_block_present().await?;

        let collapsed = careers.job_item_count().await?;
        let result = verify::count(
            "collapsed team items",
            crate::pages::COLLAPSED_TEAM_COUNT,
            collapsed,
        );
        if result.passed {
            test.pass(result.describe());
        } else {
            test.fail(result.describe());
        }

        careers.expand_all_teams().await?;
        Ok(())
    }

    async fn check_locations_block(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "careers/").await?;
        let careers = CareersPage::new(self.session, test.clone(), self.timeout());
        careers.locations_block_present().await?;
        Ok(())
    }

    async fn check_life_at_block(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "careers/").await?;
        let careers = CareersPage::new(self.session, test.clone(), self.timeout());
        careers.life_at_block_present().await?;
        Ok(())
    }

    async fn check_qa_listing(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "careers/quality-assurance/").await?;
        let jobs = JobsListingPage::new(self.session, test.clone(), self.timeout());

        let prefix = self.config.url("careers/quality-assurance")?;
        jobs.opened(&prefix).await?;
        jobs.verify_listing_meta_tags().await?;
        jobs.listing_block_present().await?;
        Ok(())
    }

    async fn check_open_positions(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "careers/quality-assurance/").await?;
        let jobs = JobsListingPage::new(self.session, test.clone(), self.timeout());

        jobs.click_see_all_qa_jobs().await?;

        let expected = self
            .config
            .url("careers/open-positions/?department=qualityassurance")?;
        jobs.verify_open_positions_url(&expected).await?;
        jobs.verify_open_positions_meta_tags().await?;
        jobs.open_positions_block_present().await?;
        Ok(())
    }

    async fn check_filtered_positions(&self, test: &TestContext) -> Result<(), CheckError> {
        self.open(test, "careers/open-positions/?department=qualityassurance")
            .await?;
        let jobs = JobsListingPage::new(self.session, test.clone(), self.timeout());

        jobs.filter_by_location(FILTER_LOCATION).await?;
        jobs.verify_departments(FILTER_DEPARTMENT).await?;
        jobs.verify_locations(FILTER_LOCATION).await?;
        jobs.follow_view_role().await?;
        Ok(())
    }
}
