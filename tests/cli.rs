use std::path::Path;
use std::process::{Command, Output};

fn seed_report(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seed-report"))
        .arg("--dir")
        .arg(dir)
        .args(["--as-of", "2025-10-01"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn list_prints_every_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let output = seed_report(dir.path(), &["list"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 17);
    assert!(text.lines().next().unwrap().starts_with("academic-records"));
    assert!(text.contains("store-transactions"));
}

#[test]
fn unknown_scenario_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = seed_report(dir.path(), &["run", "nope"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("unknown scenario: nope").count(), 1);
    assert!(stderr.starts_with("error: "));
}

#[test]
fn run_follows_the_given_order_into_the_given_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = seed_report(dir.path(), &["run", "staff-division", "company-records"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    let staff = text.find("=== staff-division ===").unwrap();
    let company = text.find("=== company-records ===").unwrap();
    assert!(staff < company);
    assert!(text.contains("Jessica"));

    assert!(dir.path().join("staff_division.db").exists());
    assert!(dir.path().join("company_records.db").exists());
}

#[test]
fn as_of_flag_drives_date_relative_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = seed_report(dir.path(), &["run", "clients-status"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("User status as of 2025-10-01"));
}

#[test]
fn failure_stops_the_run_with_the_cause_chain() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the output directory should be.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();

    let output = seed_report(&blocked, &["run", "staff-division"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("scenario staff-division failed: failed to reset database file"));
    assert_eq!(stderr.matches("error: ").count(), 1);
}
