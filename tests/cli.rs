use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `expense` pointed at a scratch data dir and an API nobody listens on
fn expense(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_CLI_DATA_DIR", data_dir.path())
        .env("EXPENSE_API_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("tui"));
}

#[test]
fn add_with_missing_fields_fails_before_any_request() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .args(["add", "--title", "Lunch", "--amount", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("All fields are required"))
        .stderr(predicate::str::contains("category, date"));
}

#[test]
fn add_with_bad_amount_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .args([
            "add", "--title", "Lunch", "--amount", "lots", "--category", "Food", "--date",
            "2024-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn update_without_changes_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .args(["update", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn config_prints_paths_and_override() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("activity.log"))
        .stdout(predicate::str::contains("http://127.0.0.1:9"));
}

#[test]
fn logout_without_session() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn whoami_without_session() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn history_on_fresh_data_dir() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity recorded."));
}

#[test]
fn list_reports_unreachable_server() {
    let data_dir = TempDir::new().unwrap();

    expense(&data_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
