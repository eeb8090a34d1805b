#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Local, NaiveDate};
use checkrota::db;
use checkrota::models::checklist::{ChecklistDefinition, Recurrence, RecurrenceType};
use checkrota::models::employee::AttendanceStatus;
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ORG: &str = "default";

pub fn rota() -> Command {
    cargo_bin_cmd!("checkrota")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_checkrota.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Open a connection for library-level tests, creating the schema.
pub fn open_conn(db_path: &str) -> Connection {
    let conn = Connection::open(db_path).expect("open db");
    conn.busy_timeout(std::time::Duration::from_secs(5)).ok();
    checkrota::db::initialize::init_db(&conn).expect("init db");
    conn
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn add_employee(conn: &Connection, id: &str, name: &str) {
    db::employees::upsert_employee(conn, ORG, id, name, "store").expect("add employee");
}

pub fn set_status(conn: &Connection, employee: &str, date: NaiveDate, status: AttendanceStatus) {
    db::attendance::set_status(conn, ORG, employee, date, status).expect("set attendance");
}

/// Insert a definition directly, bypassing CLI validation, for tests that
/// exercise the generation/reassignment paths in isolation.
pub fn insert_checklist(
    conn: &Connection,
    title: &str,
    rtype: RecurrenceType,
    assigned: &[&str],
    backups: &[&str],
) -> i64 {
    let now = Local::now().to_rfc3339();
    let def = ChecklistDefinition {
        id: 0,
        org: ORG.to_string(),
        title: title.to_string(),
        description: String::new(),
        is_active: true,
        assigned_employee_ids: assigned.iter().map(|s| s.to_string()).collect(),
        backup_employee_ids: backups.iter().map(|s| s.to_string()).collect(),
        recurrence: Recurrence {
            rtype,
            day_of_week: None,
            day_of_month: None,
            specific_date: None,
        },
        created_by: "test".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    db::checklists::insert_checklist(conn, &def).expect("insert checklist")
}

/// All records for a date, oldest first.
pub fn records_on(conn: &Connection, date: NaiveDate) -> Vec<checkrota::models::assignment::AssignmentRecord> {
    db::assignments::load_by_date(conn, ORG, date).expect("load records")
}
