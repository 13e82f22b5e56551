//! Structured run reporting.
//!
//! One `Reporter` per run collects `{level, message, timestamp}` events
//! grouped by test. `begin_test` hands out a scoped `TestContext` that every
//! logging call goes through explicitly; there is no process-wide "current
//! test" state. Logging on an ended context is a no-op rather than an error,
//! so a reporting gap never takes the suite down.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Severity of a report event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Pass,
    Fail,
}

/// A single structured log event
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct TestRecord {
    name: String,
    events: Vec<LogEvent>,
    ended: bool,
}

#[derive(Debug)]
struct ReporterInner {
    started_at: DateTime<Utc>,
    tests: Vec<TestRecord>,
}

/// Process-wide sink for structured run events. Created once per run,
/// flushed at the end.
#[derive(Clone)]
pub struct Reporter {
    // A poisoned lock means a panic interrupted an append; the records
    // remain usable, so poisoning is not treated as fatal.
    inner: Arc<Mutex<ReporterInner>>,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter {
            inner: Arc::new(Mutex::new(ReporterInner {
                started_at: Utc::now(),
                tests: Vec::new(),
            })),
        }
    }

    /// Open a named test; all events logged through the returned context are
    /// attributed to it until `end` is called.
    pub fn begin_test(&self, name: &str) -> TestContext {
        let index = {
            let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            inner.tests.push(TestRecord {
                name: name.to_string(),
                events: Vec::new(),
                ended: false,
            });
            inner.tests.len() - 1
        };
        info!("=== {} ===", name);

        TestContext {
            inner: Arc::clone(&self.inner),
            index,
        }
    }

    /// Verdicts per test, in execution order.
    pub fn verdicts(&self) -> Vec<(String, bool)> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner
            .tests
            .iter()
            .map(|t| {
                let passed = !t.events.iter().any(|e| e.level == Level::Fail);
                (t.name.clone(), passed)
            })
            .collect()
    }

    /// Write the JSON report document.
    pub fn flush(&self, path: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct TestReport<'a> {
            name: &'a str,
            verdict: &'static str,
            events: &'a [LogEvent],
        }

        #[derive(Serialize)]
        struct ReportDocument<'a> {
            suite: &'static str,
            started_at: DateTime<Utc>,
            finished_at: DateTime<Utc>,
            tests: Vec<TestReport<'a>>,
        }

        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let document = ReportDocument {
            suite: env!("CARGO_PKG_NAME"),
            started_at: inner.started_at,
            finished_at: Utc::now(),
            tests: inner
                .tests
                .iter()
                .map(|t| TestReport {
                    name: &t.name,
                    verdict: if t.events.iter().any(|e| e.level == Level::Fail) {
                        "fail"
                    } else {
                        "pass"
                    },
                    events: &t.events,
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped handle to the currently active named test.
#[derive(Clone)]
pub struct TestContext {
    inner: Arc<Mutex<ReporterInner>>,
    index: usize,
}

impl TestContext {
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message.into());
    }

    pub fn pass(&self, message: impl Into<String>) {
        self.log(Level::Pass, message.into());
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.log(Level::Fail, message.into());
    }

    /// Close the context. Later logging calls become no-ops.
    pub fn end(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(record) = inner.tests.get_mut(self.index) {
            record.ended = true;
        }
    }

    fn log(&self, level: Level, message: String) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(record) = inner.tests.get_mut(self.index) else {
            return;
        };
        if record.ended {
            return;
        }

        match level {
            Level::Info => info!("[{}] {}", record.name, message),
            Level::Pass => info!("[{}] PASS: {}", record.name, message),
            Level::Fail => warn!("[{}] FAIL: {}", record.name, message),
        }

        record.events.push(LogEvent {
            level,
            message,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
#[path = "reporter_test.rs"]
mod reporter_test;
