use chrono::Utc;

use crate::config::RunnerConfig;
use crate::env::EnvManager;
use crate::errors::{Result, RunnerError};
use crate::execution::{task_from_test_type, Execution, ExecutionResult, ExecutionStatus};
use crate::process::ProcessRunner;
use crate::project;
use crate::report;

/// Exit code Gradle uses when the build ran but failed, typically
/// because tests failed.
const GRADLE_BUILD_FAILED: i32 = 1;

/// Executes one Gradle-based test request against the checked-out
/// content in the data directory.
pub struct GradleRunner {
    config: RunnerConfig,
}

impl GradleRunner {
    pub fn new(config: RunnerConfig) -> Self {
        log::info!("preparing gradle runner");
        GradleRunner { config }
    }

    /// Run a single execution. Infrastructure problems (no data
    /// directory, unusable test type) surface as errors; everything the
    /// execution itself can fail on comes back as a failed
    /// `ExecutionResult`.
    pub fn run(&self, execution: &Execution) -> Result<ExecutionResult> {
        let datadir = self.config.datadir()?;
        if !datadir.is_dir() {
            return Err(RunnerError::MissingDatadir(datadir.to_path_buf()));
        }

        let start_time = Utc::now();

        if execution.content.is_file() {
            return Ok(ExecutionResult::err(
                "executor only supports git-dir based tests",
            ));
        }
        let repository = match &execution.content.repository {
            Some(repository) => repository,
            None => return Ok(ExecutionResult::err("execution content has no repository")),
        };

        let project_dir = project::project_dir(datadir, repository);
        if !project::has_gradle_settings(&project_dir) {
            return Ok(ExecutionResult::err(format!(
                "no settings.gradle or settings.gradle.kts found in {}",
                project_dir.display()
            )));
        }

        let mut env = EnvManager::new(execution.variables.clone());
        env.merge_envs(&execution.envs);

        let program = project::gradle_command(&project_dir);
        let run_path = project::run_path(datadir, repository);

        let mut args: Vec<String> = Vec::new();
        if !self.config.gradle_daemon {
            args.push("--no-daemon".to_string());
        }
        args.extend(self.config.gradle_args.iter().cloned());
        args.extend(execution.args.iter().cloned());
        if let Some(task) = task_from_test_type(&execution.test_type)? {
            args.push(task);
        }
        if run_path != project_dir {
            args.push("-p".to_string());
            args.push(project_dir.display().to_string());
        }

        log::info!(
            "running {} {} in {}",
            program.display(),
            args.join(" "),
            run_path.display()
        );

        let mut result = ExecutionResult {
            start_time: Some(start_time),
            ..Default::default()
        };

        match ProcessRunner::new("gradle").run(&program, &args, &run_path, &env) {
            Ok(run) if run.success() => {
                log::info!("test execution passed");
                result.status = ExecutionStatus::Passed;
                result.output = env.obfuscate(&run.output);
            }
            Ok(run) if run.exit_code() == GRADLE_BUILD_FAILED => {
                // The build ran and failed; reports are still worth
                // collecting.
                log::info!("test execution failed");
                result.status = ExecutionStatus::Failed;
                result.error_message = "build failed with an exception".to_string();
                result.output = env.obfuscate(&run.output);
            }
            Ok(run) => {
                // Gradle was unable to run the build at all.
                result.status = ExecutionStatus::Failed;
                result.error_message =
                    format!("gradle exited with status {}", run.exit_code());
                result.output = env.obfuscate(&run.output);
                result.end_time = Some(Utc::now());
                return Ok(result);
            }
            Err(e) => {
                result.status = ExecutionStatus::Failed;
                result.error_message = e.to_string();
                result.end_time = Some(Utc::now());
                return Ok(result);
            }
        }

        result.output_type = "text/plain".to_string();
        match report::scan_reports(&project_dir.join("build").join("test-results")) {
            Ok(steps) => result.steps = steps,
            Err(e) => {
                log::warn!("could not process reports: {}", e);
                result.status = ExecutionStatus::Failed;
                result.error_message = e.to_string();
            }
        }
        result.end_time = Some(Utc::now());

        Ok(result)
    }
}
