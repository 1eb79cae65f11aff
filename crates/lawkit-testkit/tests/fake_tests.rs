//! Tests for fake executable helpers

use lawkit_testkit::FakeInstall;
use lawkit_testkit::fake::{ECHO_ARGS, FAKE_VERSION};

#[test]
fn test_install_uses_bundled_layout() {
    let fake = FakeInstall::new();
    let path = fake.install("linux-x64", "lawkit", ECHO_ARGS);

    assert!(path.is_file());
    assert_eq!(path, fake.root().join("bin").join("linux-x64").join("lawkit"));
}

#[test]
#[cfg(unix)]
fn test_installed_fake_answers_version() {
    let fake = FakeInstall::new();
    let path = fake.install("linux-x64", "lawkit", ECHO_ARGS);

    let output = std::process::Command::new(&path)
        .arg("--version")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("lawkit {FAKE_VERSION}")
    );
}

#[test]
#[cfg(unix)]
fn test_installed_fake_echoes_args() {
    let fake = FakeInstall::new();
    let path = fake.install("linux-x64", "lawkit", ECHO_ARGS);

    let output = std::process::Command::new(&path)
        .args(["benf", "--format", "json", "data file.txt"])
        .output()
        .unwrap();

    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "benf\n--format\njson\ndata file.txt\n"
    );
}
