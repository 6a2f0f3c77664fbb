//! End-to-end CLI tests against a temporary database.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct TestEnv {
    home: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("revue").unwrap();
        cmd.env("HOME", self.home.path());
        cmd.env("REVUE_DB", self.home.path().join("test.db"));
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }
}

/// A site with an admin, an owner, and one published overdue page.
fn seeded() -> TestEnv {
    let env = TestEnv::new();

    env.run(&["user", "add", "admin"]);
    env.run(&["user", "add", "alice"]);
    env.run(&["group", "add", "admins"]);
    env.run(&["group", "add-member", "admins", "admin"]);
    env.run(&["group", "grant", "admins", "ADMIN"]);

    env.run(&["page", "add", "Home"]);
    env.run(&["page", "publish", "home", "--as", "admin"]);
    env.run(&[
        "site", "set", "--period", "7", "--owner-user", "alice", "--as", "admin",
    ]);

    env
}

#[test]
fn help_shows_quick_start() {
    TestEnv::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("content review tracker"));
}

#[test]
fn page_add_and_list() {
    let env = TestEnv::new();

    env.cmd()
        .args(["page", "add", "About Us"])
        .assert()
        .success()
        .stdout(predicate::str::contains("About Us"));

    env.cmd()
        .args(["page", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/about-us"))
        .stdout(predicate::str::contains("draft"));
}

#[test]
fn report_shows_overdue_page_after_stale_publish() {
    let env = seeded();

    // Published just now with a 7-day period: not yet due.
    env.cmd()
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 pages"));
}

#[test]
fn review_resets_the_clock() {
    let env = seeded();

    env.cmd()
        .args(["review", "home", "--as", "alice", "--note", "looks fine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked"))
        .stdout(predicate::str::contains("next review due"));

    env.cmd()
        .args(["page", "show", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("looks fine"));
}

#[test]
fn review_by_non_owner_fails() {
    let env = seeded();

    env.cmd()
        .args(["review", "home", "--as", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a content owner"));
}

#[test]
fn settings_set_requires_permission() {
    let env = seeded();

    env.cmd()
        .args([
            "settings", "set", "home", "--mode", "custom", "--period", "30", "--as", "alice",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("may not edit review settings"));

    env.cmd()
        .args([
            "settings", "set", "home", "--mode", "custom", "--period", "30", "--owner-user",
            "alice", "--as", "admin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 month"));
}

#[test]
fn settings_show_reports_provenance() {
    let env = seeded();

    env.run(&["page", "add", "Docs", "--parent", "home"]);

    env.cmd()
        .args(["settings", "show", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inherited from site settings"))
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn unknown_page_is_an_error() {
    let env = seeded();

    env.cmd()
        .args(["settings", "show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn json_output_is_parseable() {
    let env = seeded();

    let output = env
        .cmd()
        .args(["--output", "json", "report"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["count"], 0);
}

#[test]
fn job_install_is_idempotent() {
    let env = seeded();

    env.cmd()
        .args(["job", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued"));

    env.cmd()
        .args(["job", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already queued"));
}

#[test]
fn schedule_lists_frequencies() {
    TestEnv::new()
        .cmd()
        .args(["schedule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No automatic review date"))
        .stdout(predicate::str::contains("12 months"));
}
