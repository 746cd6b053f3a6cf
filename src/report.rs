use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::errors::{Result, RunnerError};
use crate::execution::{ExecutionStatus, StepResult};

/// JUnit XML documents either wrap suites in a `<testsuites>` root or
/// start directly at `<testsuite>`.
#[derive(Debug, Deserialize, Default)]
struct TestSuites {
    #[serde(rename = "testsuite", default)]
    suites: Vec<TestSuite>,
}

#[derive(Debug, Deserialize, Default)]
struct TestSuite {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "testcase", default)]
    cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize, Default)]
struct TestCase {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@time", default)]
    time: Option<f64>,
    #[serde(default)]
    failure: Vec<CaseNote>,
    #[serde(default)]
    error: Vec<CaseNote>,
    #[serde(default)]
    skipped: Vec<CaseNote>,
}

#[derive(Debug, Deserialize, Default)]
struct CaseNote {
    #[serde(rename = "@message", default)]
    #[allow(dead_code)]
    message: Option<String>,
}

impl TestCase {
    /// Anything that did not plainly pass is reported as failed.
    fn status(&self) -> ExecutionStatus {
        if self.failure.is_empty() && self.error.is_empty() && self.skipped.is_empty() {
            ExecutionStatus::Passed
        } else {
            ExecutionStatus::Failed
        }
    }

    fn duration(&self) -> Duration {
        let secs = self.time.filter(|t| t.is_finite() && *t >= 0.0).unwrap_or(0.0);
        Duration::from_secs_f64(secs)
    }
}

/// Parse one JUnit XML document into step results.
pub fn parse_report(xml: &str) -> Result<Vec<StepResult>> {
    let suites = parse_suites(xml)?;
    let mut steps = Vec::new();
    for suite in &suites {
        for case in &suite.cases {
            steps.push(StepResult {
                name: format!("{} - {}", suite.name, case.name),
                duration: humantime::format_duration(case.duration()).to_string(),
                status: case.status(),
            });
        }
    }
    Ok(steps)
}

fn parse_suites(xml: &str) -> Result<Vec<TestSuite>> {
    let wrapped: TestSuites = quick_xml::de::from_str(xml)
        .map_err(|e| RunnerError::Report(e.to_string()))?;
    if !wrapped.suites.is_empty() {
        return Ok(wrapped.suites);
    }

    // No <testsuite> children found; the document may start at the
    // suite itself.
    let bare: TestSuite =
        quick_xml::de::from_str(xml).map_err(|e| RunnerError::Report(e.to_string()))?;
    if bare.cases.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(vec![bare])
    }
}

/// Walk a Gradle `build/test-results` tree and ingest every XML report.
/// A missing or unreadable directory surfaces as a walk error, as does
/// an unreadable file; a file that does not parse as JUnit XML is
/// skipped with a warning.
pub fn scan_reports(results_dir: &Path) -> Result<Vec<StepResult>> {
    let mut steps = Vec::new();

    for entry in WalkDir::new(results_dir) {
        let entry = entry.map_err(|e| RunnerError::Report(e.to_string()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "xml") {
            continue;
        }

        let content = fs::read_to_string(path)?;
        match parse_report(&content) {
            Ok(parsed) => steps.extend(parsed),
            Err(e) => log::warn!("skipping report {}: {}", path.display(), e),
        }
    }

    Ok(steps)
}
