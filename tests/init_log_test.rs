use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn issuelens() -> Command {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.env("NO_COLOR", "1")
        .env_remove("ISSUELENS_API_URL")
        .env_remove("ISSUELENS_SESSION")
        .args(["--now", "2024-01-05T12:00:00+00:00"]);
    cmd
}

fn init(dir: &assert_fs::TempDir) {
    issuelens()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

// ─── Init ────────────────────────────────────────────────────────

#[test]
fn init_writes_config_and_activity_entry() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    dir.child(".issuelens/config.toml")
        .assert(predicate::str::contains("default_window = \"14d\""));

    let log = std::fs::read_to_string(dir.path().join(".issuelens/activity.log")).unwrap();
    assert!(log.contains("\"action\":\"init\""));
}

#[test]
fn init_records_flags_in_config() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--api-url", "http://127.0.0.1:8039", "--window", "1m", "init"])
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join(".issuelens/config.toml")).unwrap();
    assert!(config.contains("base_url = \"http://127.0.0.1:8039\""));
    assert!(config.contains("default_window = \"1m\""));
}

#[test]
fn init_twice_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    issuelens()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn custom_config_dir() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--config", "conf", "init"])
        .assert()
        .success();

    dir.child("conf/config.toml").assert(predicate::path::exists());
}

#[test]
fn configured_default_window_applies() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".issuelens/config.toml")
        .write_str("[issuelens]\ndefault_window = \"all\"\n")
        .unwrap();
    dir.child("events.json")
        .write_str(r#"[{"uuid": "old", "timestamp": "2020-01-01", "project_uuid": "A"}]"#)
        .unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--events", "events.json", "stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"window\": \"all\""));
}

#[test]
fn newer_format_version_is_refused() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".issuelens/config.toml")
        .write_str("[issuelens]\nformat_version = 9\n")
        .unwrap();
    dir.child("events.json").write_str("[]").unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--events", "events.json", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("format version 9"));
}

// ─── Activity log ────────────────────────────────────────────────

#[test]
fn log_shows_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    issuelens()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"));
}

#[test]
fn export_and_import_are_logged() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    dir.child("events.json")
        .write_str(r#"[{"uuid": "e1", "timestamp": "2024-01-04", "project_uuid": "A"}]"#)
        .unwrap();
    dir.child("incoming.json")
        .write_str(r#"[{"uuid": "n1", "timestamp": "2024-01-04", "project_uuid": "B"}]"#)
        .unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--events", "events.json", "export"])
        .assert()
        .success();
    issuelens()
        .current_dir(dir.path())
        .args(["--events", "events.json", "--project", "A", "import", "incoming.json"])
        .assert()
        .success();

    issuelens()
        .current_dir(dir.path())
        .args(["log", "--action", "import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("1 imported, 0 skipped"));

    issuelens()
        .current_dir(dir.path())
        .args(["log", "--last", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("errors_export_2024-01-05.json"));
}

#[test]
fn log_since_filters_old_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    issuelens()
        .current_dir(dir.path())
        .args(["log", "--since", "2999-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity entries found"));
}

#[test]
fn log_without_init_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    issuelens()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .failure()
        .stderr(predicate::str::contains("issuelens init"));
}

#[test]
fn log_rejects_unknown_action() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    issuelens()
        .current_dir(dir.path())
        .args(["log", "--action", "encrypt"])
        .assert()
        .failure();
}

#[test]
fn read_only_use_leaves_no_config_dir() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("events.json").write_str("[]").unwrap();

    issuelens()
        .current_dir(dir.path())
        .args(["--events", "events.json", "export"])
        .assert()
        .success();

    dir.child(".issuelens").assert(predicate::path::missing());
}
