use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Run issuelens without inherited backend settings.
fn issuelens() -> Command {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.env("NO_COLOR", "1")
        .env_remove("ISSUELENS_API_URL")
        .env_remove("ISSUELENS_SESSION");
    cmd
}

// ─── Offline diff ────────────────────────────────────────────────

#[test]
fn diff_reports_additions_and_removals() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["members", "diff", "--current", "1,2,3", "--desired", "2,3,4,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ add: 4, 5"))
        .stdout(predicate::str::contains("- remove: 1"));
}

#[test]
fn diff_ignores_order_and_duplicates() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["members", "diff", "--current", "3,1,2", "--desired", "2,2,1,3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already in sync"));
}

#[test]
fn diff_to_empty_removes_everyone() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["members", "diff", "--current", "7,8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ add: —"))
        .stdout(predicate::str::contains("- remove: 7, 8"));
}

#[test]
fn diff_rejects_non_numeric_ids() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["members", "diff", "--current", "1,x"])
        .assert()
        .failure();
}

// ─── Backend-bound actions ───────────────────────────────────────

#[test]
fn sync_requires_desired_list() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["members", "sync", "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--desired"));
}

#[test]
fn sync_without_backend_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["members", "sync", "p1", "--desired", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No event source"));
}

#[test]
fn list_against_unreachable_backend_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", "http://127.0.0.1:9", "members", "list", "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Request to http://127.0.0.1:9/api/projects/p1/members failed"));
}
