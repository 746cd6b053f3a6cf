use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RunnerError};

/// One execution request, as handed to the runner in JSON form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Test type in `gradle/<task>` form; the suffix names the Gradle
    /// task to run, with `project` meaning the default build.
    pub test_type: String,
    pub content: Content,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub envs: BTreeMap<String, String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(rename = "type", default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub repository: Option<Repository>,
}

impl Content {
    pub fn is_file(&self) -> bool {
        self.kind == ContentKind::File
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    #[default]
    GitDir,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub working_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub secret: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Passed,
    #[default]
    Failed,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Passed => write!(f, "passed"),
            ExecutionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A single test case pulled out of the JUnit reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub name: String,
    pub duration: String,
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepResult>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl ExecutionResult {
    /// A failed result carrying only an error message.
    pub fn err(message: impl Into<String>) -> Self {
        ExecutionResult {
            status: ExecutionStatus::Failed,
            error_message: message.into(),
            ..Default::default()
        }
    }

    pub fn passed(&self) -> bool {
        self.status == ExecutionStatus::Passed
    }
}

/// Extract the Gradle task from a `gradle/<task>` test type. The
/// `project` suffix (any case) runs the default build and maps to no
/// task argument.
pub fn task_from_test_type(test_type: &str) -> Result<Option<String>> {
    let task = test_type
        .split_once('/')
        .map(|(_, task)| task)
        .ok_or_else(|| RunnerError::TestType(test_type.to_string()))?;

    if task.eq_ignore_ascii_case("project") {
        Ok(None)
    } else {
        Ok(Some(task.to_string()))
    }
}
