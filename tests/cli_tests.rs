use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn execution_json(path: &str, kind: &str) -> String {
    format!(
        r#"{{
            "testType": "gradle/test",
            "content": {{
                "type": "{}",
                "repository": {{ "path": "{}" }}
            }}
        }}"#,
        kind, path
    )
}

#[test]
fn missing_datadir_is_a_runner_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("gradle-runner")?;

    cmd.arg("--datadir")
        .arg("/no/such/datadir")
        .write_stdin(execution_json("hello", "git-dir"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));

    Ok(())
}

#[test]
fn unset_datadir_is_a_runner_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("gradle-runner")?;

    cmd.env_remove("RUNNER_DATADIR")
        .write_stdin(execution_json("hello", "git-dir"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("RUNNER_DATADIR"));

    Ok(())
}

#[test]
fn malformed_request_is_a_runner_error() -> Result<(), Box<dyn std::error::Error>> {
    let datadir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("gradle-runner")?;

    cmd.arg("--datadir")
        .arg(datadir.path())
        .write_stdin("{ not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid execution request"));

    Ok(())
}

#[test]
fn file_content_fails_the_execution() -> Result<(), Box<dyn std::error::Error>> {
    let datadir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("gradle-runner")?;

    cmd.arg("--datadir")
        .arg(datadir.path())
        .write_stdin(execution_json("hello", "file"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "executor only supports git-dir based tests",
        ));

    Ok(())
}

#[test]
fn project_without_settings_fails_the_execution() -> Result<(), Box<dyn std::error::Error>> {
    let datadir = tempfile::tempdir()?;
    fs::create_dir_all(datadir.path().join("repo/hello"))?;

    let request = datadir.path().join("execution.json");
    fs::write(&request, execution_json("hello", "git-dir"))?;

    let mut cmd = Command::cargo_bin("gradle-runner")?;
    cmd.arg("--datadir")
        .arg(datadir.path())
        .arg(&request)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no settings.gradle"));

    Ok(())
}

#[test]
fn pretty_output_renders_a_summary() -> Result<(), Box<dyn std::error::Error>> {
    let datadir = tempfile::tempdir()?;
    fs::create_dir_all(datadir.path().join("repo/hello"))?;

    let mut cmd = Command::cargo_bin("gradle-runner")?;
    cmd.arg("--datadir")
        .arg(datadir.path())
        .arg("--output")
        .arg("pretty")
        .write_stdin(execution_json("hello", "git-dir"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("execution"))
        .stdout(predicate::str::contains("failed"));

    Ok(())
}
