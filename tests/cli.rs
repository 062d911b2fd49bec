use {
    assert_cmd::cargo::cargo_bin_cmd,
    predicates::prelude::*,
    std::{fs, path::Path, process::Command},
};

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "user.name", "Release Bot"]);
    git(dir, &["config", "user.email", "release-bot@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "tag.gpgsign", "false"]);
}

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("relkeep")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Automated version management"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--category"));
}

#[test]
fn test_dry_run_previews_without_writing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("VERSION"), "0.0.0").unwrap();
    fs::write(root.join("setup.py"), "setup(version=\"0.0.0\")\n").unwrap();

    cargo_bin_cmd!("relkeep")
        .current_dir(root)
        .args(["\"Add login flow\"", "patch", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.1"))
        .stdout(predicate::str::contains("- Add login flow"))
        .stdout(predicate::str::contains("setup.py"))
        .stdout(predicate::str::contains("Nothing written."));

    assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "0.0.0");
    assert_eq!(
        fs::read_to_string(root.join("setup.py")).unwrap(),
        "setup(version=\"0.0.0\")\n"
    );
    assert!(!root.join("CHANGELOG.md").exists());
}

#[test]
fn test_dirty_tree_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    init_repo(root);
    fs::write(root.join("notes.txt"), "work in progress").unwrap();

    cargo_bin_cmd!("relkeep")
        .current_dir(root)
        .args(["Add login flow", "minor"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("working directory is not clean"));

    assert!(!root.join("VERSION").exists());
    assert!(!root.join("CHANGELOG.md").exists());
}

#[test]
fn test_outside_repository_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();

    cargo_bin_cmd!("relkeep")
        .current_dir(root)
        .env("GIT_CEILING_DIRECTORIES", root.parent().unwrap())
        .arg("Add login flow")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is this a git repository?"));

    assert!(!root.join("VERSION").exists());
}

#[test]
fn test_empty_message_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("relkeep")
        .current_dir(temp_dir.path())
        .args(["''", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("commit message cannot be empty"));
}

#[test]
fn test_invalid_bump_is_rejected() {
    cargo_bin_cmd!("relkeep")
        .args(["Add login flow", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'huge'"));
}

#[test]
fn test_release_survives_failed_push() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    init_repo(root);

    cargo_bin_cmd!("relkeep")
        .current_dir(root)
        .args(["Add login flow", "minor", "--category", "fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Released version v0.1.0"))
        .stderr(predicate::str::contains("git operation failed at `git push`"))
        .stderr(predicate::str::contains("manually resolve and push"));

    assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "0.1.0");
    let changelog = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("# Changelog\n## [0.1.0] - "));
    assert!(changelog.ends_with("### 🐞 Fixed\n- Add login flow\n"));

    let tags = Command::new("git")
        .args(["tag", "--list"])
        .current_dir(root)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&tags.stdout).trim(), "v0.1.0");
}
