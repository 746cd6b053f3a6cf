use std::path::{Path, PathBuf};

use crate::execution::Repository;

/// Where the checked-out repository content lives under the data
/// directory.
pub fn project_dir(datadir: &Path, repository: &Repository) -> PathBuf {
    datadir.join("repo").join(&repository.path)
}

/// A Gradle project is one that carries a settings file.
pub fn has_gradle_settings(dir: &Path) -> bool {
    dir.join("settings.gradle").is_file() || dir.join("settings.gradle.kts").is_file()
}

/// Prefer the project's own wrapper over whatever `gradle` is on PATH.
pub fn gradle_command(project_dir: &Path) -> PathBuf {
    let wrapper = project_dir.join("gradlew");
    if wrapper.is_file() {
        wrapper
    } else {
        PathBuf::from("gradle")
    }
}

/// The directory Gradle is invoked from. Repositories with a separate
/// working dir run from there; the project dir is then passed via -p.
pub fn run_path(datadir: &Path, repository: &Repository) -> PathBuf {
    match repository.working_dir.as_deref() {
        Some(working_dir) if !working_dir.is_empty() => datadir.join("repo").join(working_dir),
        _ => project_dir(datadir, repository),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn repo(path: &str, working_dir: Option<&str>) -> Repository {
        Repository {
            path: path.to_string(),
            working_dir: working_dir.map(str::to_string),
        }
    }

    #[test]
    fn test_project_dir_lives_under_repo() {
        let dir = project_dir(Path::new("/data"), &repo("hello-gradle", None));
        assert_eq!(dir, Path::new("/data/repo/hello-gradle"));
    }

    #[test]
    fn test_detects_groovy_and_kotlin_settings() {
        let scratch = tempfile::tempdir().unwrap();
        assert!(!has_gradle_settings(scratch.path()));

        fs::write(scratch.path().join("settings.gradle"), "").unwrap();
        assert!(has_gradle_settings(scratch.path()));

        fs::remove_file(scratch.path().join("settings.gradle")).unwrap();
        fs::write(scratch.path().join("settings.gradle.kts"), "").unwrap();
        assert!(has_gradle_settings(scratch.path()));
    }

    #[test]
    fn test_wrapper_preferred_when_present() {
        let scratch = tempfile::tempdir().unwrap();
        assert_eq!(gradle_command(scratch.path()), Path::new("gradle"));

        let wrapper = scratch.path().join("gradlew");
        fs::write(&wrapper, "#!/bin/sh\n").unwrap();
        assert_eq!(gradle_command(scratch.path()), wrapper);
    }

    #[test]
    fn test_run_path_honors_working_dir() {
        let datadir = Path::new("/data");

        let plain = repo("hello-gradle", None);
        assert_eq!(run_path(datadir, &plain), Path::new("/data/repo/hello-gradle"));

        let nested = repo("hello-gradle", Some("workdir"));
        assert_eq!(run_path(datadir, &nested), Path::new("/data/repo/workdir"));

        let empty = repo("hello-gradle", Some(""));
        assert_eq!(run_path(datadir, &empty), Path::new("/data/repo/hello-gradle"));
    }
}
