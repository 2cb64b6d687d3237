use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const DEAD_BACKEND: &str = "http://127.0.0.1:9";

fn issuelens() -> Command {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.env("NO_COLOR", "1")
        .env_remove("ISSUELENS_API_URL")
        .env_remove("ISSUELENS_SESSION");
    cmd
}

// ─── Projects ────────────────────────────────────────────────────

#[test]
fn project_list_needs_a_backend() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["projects", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--api-url"));
}

#[test]
fn project_list_against_unreachable_backend_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", DEAD_BACKEND, "projects", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/api/projects/ failed"));
}

#[test]
fn blank_project_title_is_rejected_offline() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", DEAD_BACKEND, "projects", "create", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project title must not be empty"));
}

#[test]
fn project_delete_checks_role_first() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", DEAD_BACKEND, "projects", "delete", "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/api/auth/me failed"));
}

// ─── Notifications ───────────────────────────────────────────────

#[test]
fn notification_url_must_be_http() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args([
            "notifications", "add", "p1", "--title", "Alerts", "--url", "hooks.example.com/x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http://"));
}

#[test]
fn channel_only_applies_to_mattermost() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args([
            "notifications",
            "add",
            "p1",
            "--title",
            "Alerts",
            "--kind",
            "slack",
            "--url",
            "https://hooks.slack.com/services/T0",
            "--channel",
            "ops",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only apply to mattermost"));
}

#[test]
fn unknown_notification_kind_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args([
            "notifications", "add", "p1", "--title", "A", "--kind", "email", "--url", "https://x",
        ])
        .assert()
        .failure();
}

#[test]
fn valid_notification_goes_through_role_check() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args([
            "--api-url",
            DEAD_BACKEND,
            "notifications",
            "add",
            "p1",
            "--title",
            "Alerts",
            "--kind",
            "mattermost",
            "--url",
            "https://chat.example.com/hooks/abc",
            "--channel",
            "ops",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/api/auth/me failed"));
}

#[test]
fn notification_remove_needs_numeric_id() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", DEAD_BACKEND, "notifications", "remove", "abc"])
        .assert()
        .failure();
}

// ─── Users ───────────────────────────────────────────────────────

#[test]
fn user_list_checks_role_first() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", DEAD_BACKEND, "members", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/api/auth/me failed"));
}
