use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;
use seed_report::config::Config;
use seed_report::runner::{self, RunSummary};
use seed_report::scenarios::{self, RunContext};
use seed_report::sqlite::ResultSet;
use seed_report::{Error, Value};
use tempfile::TempDir;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

fn config_in(dir: &Path) -> Config {
    Config {
        output_dir: dir.to_path_buf(),
        as_of: Some(as_of()),
        ..Config::default()
    }
}

// Runs a scenario into a fresh temp dir and returns its summary and output.
fn run_scenario(name: &str) -> (RunSummary, String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let scenario = scenarios::find(name).unwrap();
    let mut out = Vec::new();
    let summary = runner::run(scenario.as_ref(), &config_in(dir.path()), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap(), dir)
}

fn texts(result: &ResultSet, column: &str) -> Vec<String> {
    result
        .column(column)
        .unwrap_or_else(|| panic!("no column {column} in {:?}", result.columns))
        .into_iter()
        .map(Value::to_string)
        .collect()
}

fn ints(result: &ResultSet, column: &str) -> Vec<i64> {
    result
        .column(column)
        .unwrap()
        .into_iter()
        .map(|v| v.as_i64().unwrap())
        .collect()
}

fn reals(result: &ResultSet, column: &str) -> Vec<f64> {
    result
        .column(column)
        .unwrap()
        .into_iter()
        .map(|v| v.as_f64().unwrap())
        .collect()
}

#[test]
fn every_scenario_seeds_exactly_its_literal_rows() {
    let ctx = RunContext { as_of: as_of() };
    for scenario in scenarios::all() {
        let (summary, _, dir) = run_scenario(scenario.name());
        let conn = Connection::open(dir.path().join(scenario.db_file())).unwrap();

        for seed in scenario.seeds(&ctx) {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", seed.table), [], |r| r.get(0))
                .unwrap();
            assert_eq!(count as usize, seed.rows.len(), "{}.{}", scenario.name(), seed.table);

            let reported = summary.seeded.iter().find(|s| s.table == seed.table).unwrap();
            assert_eq!(reported.rows, seed.rows.len());
        }
        assert_eq!(summary.results.len(), scenario.reports(&ctx).len());
    }
}

#[test]
fn rerun_replaces_database_and_prints_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let scenario = scenarios::find("store-transactions").unwrap();

    let mut first = Vec::new();
    runner::run(scenario.as_ref(), &config, &mut first).unwrap();
    let mut second = Vec::new();
    let summary = runner::run(scenario.as_ref(), &config, &mut second).unwrap();

    assert_eq!(first, second);
    let conn = Connection::open(&summary.db_path).unwrap();
    let clients: i64 = conn
        .query_row("SELECT COUNT(*) FROM Clients", [], |r| r.get(0))
        .unwrap();
    assert_eq!(clients, 3);
}

#[test]
fn unknown_scenario_is_rejected() {
    assert!(matches!(scenarios::find("nope"), Err(Error::UnknownScenario(n)) if n == "nope"));
}

#[test]
fn academic_records_filters_by_surname() {
    let (summary, output, _dir) = run_scenario("academic-records");
    let result = &summary.results[0];
    assert_eq!(texts(result, "Surname"), ["Ivanov", "Ivanov", "Isaev", "Ilyina", "Ilyina"]);
    assert_eq!(
        texts(result, "Title"),
        ["Computer Science", "Mathematics", "Computer Science", "Computer Science", "Physics"]
    );
    assert!(output.contains("--- Pupils with surnames matching 'I%' ---"));
}

#[test]
fn accounts_and_platforms_intersect_on_shared_ids() {
    let (accounts, _, _a) = run_scenario("accounts-report");
    assert_eq!(ints(&accounts.results[0], "AccountID"), [3, 4]);

    let (platforms, output, _b) = run_scenario("service-cross-check");
    assert_eq!(ints(&platforms.results[0], "PID"), [3, 4]);
    assert_eq!(texts(&platforms.results[0], "Alias"), ["Charlie", "David"]);
    assert!(output.contains("ID: 3 | Alias: Charlie"));
}

#[test]
fn clients_status_segments_relative_to_as_of() {
    let (summary, output, _dir) = run_scenario("clients-status");
    let result = &summary.results[0];
    assert_eq!(
        texts(result, "alias_name"),
        ["Anna_K", "Phoenix", "Rider_77", "ShadowLord", "Viktoria_S"]
    );
    assert_eq!(
        texts(result, "user_segment"),
        ["Churn risk", "VIP", "Churn risk", "Regular", "Regular"]
    );
    assert!(output.contains("User status as of 2025-10-01"));
}

#[test]
fn clients_status_is_stable_across_run_dates() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = scenarios::find("clients-status").unwrap();
    let mut config = config_in(dir.path());
    config.as_of = NaiveDate::from_ymd_opt(2031, 2, 28);

    let summary = runner::run(scenario.as_ref(), &config, &mut Vec::new()).unwrap();
    assert_eq!(
        texts(&summary.results[0], "user_segment"),
        ["Churn risk", "VIP", "Churn risk", "Regular", "Regular"]
    );
}

#[test]
fn set_differences_run_both_ways() {
    let (churn, _, _a) = run_scenario("clients-churn");
    assert_eq!(ints(&churn.results[0], "UserID_PK"), [1, 2]);
    assert_eq!(ints(&churn.results[1], "UserID_PK"), [5, 6]);

    let (staff, _, _b) = run_scenario("staff-division");
    assert_eq!(ints(&staff.results[0], "StaffID"), [1, 2, 4]);
    assert_eq!(ints(&staff.results[1], "StaffID"), [5, 6]);
}

#[test]
fn company_contacts_merges_departments_without_duplicates() {
    let (summary, _, _dir) = run_scenario("company-contacts");
    let result = &summary.results[0];
    assert_eq!(result.len(), 6);
    assert_eq!(
        texts(result, "Mobile_Number"),
        ["666333", "888222", "999000", "UNKNOWN", "UNKNOWN", "444111"]
    );
}

#[test]
fn dangling_team_reference_survives_without_foreign_keys() {
    let (summary, output, _dir) = run_scenario("company-records");
    assert_eq!(texts(&summary.results[0], "Name"), ["Marina", "Ilya"]);
    assert_eq!(texts(&summary.results[1], "Name"), ["Jessica", "Timur"]);
    assert_eq!(texts(&summary.results[1], "TeamRefID"), ["5", "NULL"]);
    assert!(!output.contains("Every worker belongs to a team."));
}

#[test]
fn devops_keeps_only_multi_tool_developers() {
    let (summary, _, _dir) = run_scenario("devops-productivity");
    let result = &summary.results[0];
    assert_eq!(result.len(), 2);
    assert!(texts(result, "DevName").iter().all(|n| n.starts_with("Svetlana")));
}

#[test]
fn employees_projects_prints_none_for_missing_sides() {
    let (summary, output, _dir) = run_scenario("employees-projects");
    assert_eq!(summary.results[0].len(), 6);
    assert_eq!(summary.results[1].len(), 5);
    assert_eq!(
        texts(&summary.results[2], "employee_name"),
        ["Dmitry Vasiliev", "Elena Fedorova", "Olga Kuznetsova"]
    );

    let overview = &summary.results[3];
    assert_eq!(overview.len(), 8);
    let entities = texts(overview, "Entity1");
    assert_eq!(&entities[6..], ["NULL", "NULL"]);
    assert!(output.contains("NONE"));
    assert!(!output.contains("NULL"));
}

#[test]
fn anti_joins_find_the_unmatched() {
    let (students, _, _a) = run_scenario("hopeless-students");
    assert_eq!(ints(&students.results[0], "student_id"), [2, 4]);

    let (teachers, output, _b) = run_scenario("teachers-without-classes");
    assert_eq!(ints(&teachers.results[0], "teacher_id"), [20, 40]);
    assert_eq!(texts(&teachers.results[0], "full_name"), ["Petrov S.N.", "Vasilieva E.A."]);
    assert!(output.contains("ID: 20    | Name: Petrov S.N."));
}

#[test]
fn inventory_codes_map_to_labels() {
    let (summary, _, _dir) = run_scenario("inventory-status");
    assert_eq!(
        texts(&summary.results[0], "InventoryStatus"),
        ["In stock", "Quality check", "Ready to ship", "In transit", "Written off/Unknown"]
    );
}

#[test]
fn game_stats_reports() {
    let (summary, output, _dir) = run_scenario("game-stats");
    let r = &summary.results;

    assert_eq!(ints(&r[0], "UserID"), [1, 3, 4]);
    assert_eq!(r[1].rows[0][0], Value::Real(1412.5));
    assert_eq!(texts(&r[2], "GameName"), ["Cyber Arena", "Mystic Quest", "Space Battle"]);
    assert_eq!(ints(&r[2], "TotalSessions"), [3, 3, 3]);

    assert_eq!(texts(&r[3], "Username"), ["Phoenix"]);
    assert!((reals(&r[3], "Avg_KDRatio")[0] - 2.78125).abs() < 1e-9);

    assert_eq!(texts(&r[4], "Username"), ["Valkyrie", "Ghost"]);
    assert_eq!(texts(&r[5], "Player"), ["Ghost", "Rider", "Valkyrie"]);
    assert_eq!(texts(&r[5], "Outcome"), ["Defeat", "Victory", "Defeat"]);

    assert!(output.contains("--- 2. Average score of user 1 ---\n1412.5\n"));
    assert!(output.contains("Avg K/D: 2.78"));
}

#[test]
fn literary_archive_reports_grades_per_genre() {
    let (summary, _, _dir) = run_scenario("literary-archive");
    assert_eq!(
        texts(&summary.results[0], "entry_title"),
        ["War and Peace", "Crime and Punishment", "Eugene Onegin"]
    );

    let genres = &summary.results[1];
    assert_eq!(
        texts(genres, "category_title"),
        ["Classic Literature", "Mystery", "Science Fiction"]
    );
    assert_eq!(ints(genres, "reviews"), [3, 0, 0]);
    let averages = genres.column("avg_grade").unwrap();
    assert!((averages[0].as_f64().unwrap() - 14.0 / 3.0).abs() < 1e-9);
    assert!(averages[1].is_null() && averages[2].is_null());
}

#[test]
fn product_catalog_merges_regions_sorted_by_city() {
    let (summary, _, _dir) = run_scenario("product-catalog");
    assert_eq!(
        texts(&summary.results[0], "Mfg_City"),
        ["Kyoto", "Milan", "Munich", "Paris", "Shenzhen", "Shenzhen", "Taipei"]
    );
    assert_eq!(
        texts(&summary.results[0], "Item_Name")[4..6],
        ["Electric Kettle", "Smartwatch X5"]
    );
}

#[test]
fn store_transactions_totals() {
    let (summary, output, _dir) = run_scenario("store-transactions");
    let r = &summary.results;

    assert_eq!(texts(&r[0], "full_name"), ["Maxim Ivanov", "Viktor Smirnov"]);
    assert_eq!(ints(&r[1], "total_items_shipped"), [4, 2, 3]);
    assert_eq!(reals(&r[2], "unit_price"), [650.0, 90.0, 55.0]);
    assert_eq!(reals(&r[3], "final_transaction_amount"), [750.0, 90.0, 80.0, 685.0]);
    assert_eq!(texts(&r[4], "full_name"), ["Viktor Smirnov"]);
    assert_eq!(reals(&r[4], "total_spending"), [830.0]);

    assert!(output.contains("Client: Viktor Smirnov | Total: 830.00"));
}
