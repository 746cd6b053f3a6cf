use std::path::Path;

use gradle_runner::project;

#[test]
fn fixture_project_is_detected() {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hello-gradle");

    assert!(project::has_gradle_settings(&fixture));
    // The fixture ships no wrapper, so the system gradle is chosen.
    assert_eq!(project::gradle_command(&fixture), Path::new("gradle"));
}

#[test]
fn unrelated_directory_is_not_a_gradle_project() {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests");
    assert!(!project::has_gradle_settings(&fixture));
}
