mod common;

use checkrota::core::generator;
use checkrota::core::guard::KeyedLocks;
use checkrota::db;
use checkrota::errors::AppError;
use checkrota::models::checklist::RecurrenceType;
use checkrota::models::employee::AttendanceStatus;
use common::*;

#[test]
fn check_in_generates_exactly_one_record() {
    let db_path = setup_test_db("gen_checkin_once");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    let c1 = insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);

    let outcome = generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();
    assert!(!outcome.already_exists);
    assert_eq!(outcome.primary_generated, 1);
    assert_eq!(outcome.backup_generated, 0);

    let records = records_on(&conn, date);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].checklist_id, c1);
    assert_eq!(records[0].employee_id, "E1");
    assert!(!records[0].completed);
    assert!(!records[0].is_backup_assignment);

    // second call: already_exists, no new record
    let again = generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();
    assert!(again.already_exists);
    assert_eq!(again.primary_generated, 0);
    assert_eq!(records_on(&conn, date).len(), 1);
}

#[test]
fn check_in_skips_rules_that_do_not_fire() {
    let db_path = setup_test_db("gen_rule_gate");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-04"); // Tuesday

    add_employee(&conn, "E1", "Alice");

    // weekly rule for Monday: must not generate on Tuesday
    let now = chrono::Local::now().to_rfc3339();
    let def = checkrota::models::checklist::ChecklistDefinition {
        id: 0,
        org: ORG.to_string(),
        title: "Monday stock count".to_string(),
        description: String::new(),
        is_active: true,
        assigned_employee_ids: vec!["E1".to_string()],
        backup_employee_ids: vec![],
        recurrence: checkrota::models::checklist::Recurrence {
            rtype: RecurrenceType::Weekly,
            day_of_week: Some(1),
            day_of_month: None,
            specific_date: None,
        },
        created_by: "test".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    db::checklists::insert_checklist(&conn, &def).unwrap();
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);

    let outcome = generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();
    assert_eq!(outcome.primary_generated, 0);
    assert!(records_on(&conn, date).is_empty());
}

#[test]
fn inactive_checklists_generate_nothing() {
    let db_path = setup_test_db("gen_inactive");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    let id = insert_checklist(&conn, "Old task", RecurrenceType::Daily, &["E1"], &[]);

    let mut def = db::checklists::find_by_id(&conn, ORG, id).unwrap().unwrap();
    def.is_active = false;
    db::checklists::update_checklist(&conn, &def).unwrap();

    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
    let outcome = generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();
    assert_eq!(outcome.primary_generated, 0);
}

#[test]
fn checked_in_sweep_is_idempotent() {
    let db_path = setup_test_db("gen_sweep_idem");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    add_employee(&conn, "E2", "Bob");
    insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);
    insert_checklist(&conn, "Clean the shopfloor", RecurrenceType::Daily, &["E1", "E2"], &[]);
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
    set_status(&conn, "E2", date, AttendanceStatus::CheckedIn);

    let first = generator::generate_for_checked_in(&conn, &locks, ORG, date, "manual").unwrap();
    assert_eq!(first.primary_generated, 3);

    let before: Vec<i64> = records_on(&conn, date).iter().map(|r| r.id).collect();

    let second = generator::generate_for_checked_in(&conn, &locks, ORG, date, "manual").unwrap();
    assert_eq!(second.primary_generated, 0);
    assert_eq!(second.backup_generated, 0);

    let after: Vec<i64> = records_on(&conn, date).iter().map(|r| r.id).collect();
    assert_eq!(before, after, "re-running must not alter the persisted set");
}

#[test]
fn sweep_only_covers_checked_in_employees() {
    let db_path = setup_test_db("gen_sweep_absent");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    add_employee(&conn, "E2", "Bob");
    insert_checklist(&conn, "Stock shelves", RecurrenceType::Daily, &["E1", "E2"], &[]);
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
    // E2 has no attendance row at all

    let totals = generator::generate_for_checked_in(&conn, &locks, ORG, date, "manual").unwrap();
    assert_eq!(totals.primary_generated, 1);

    let records = records_on(&conn, date);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee_id, "E1");
}

#[test]
fn manual_generate_requires_admin_role() {
    let db_path = setup_test_db("gen_manual_role");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);

    let err = generator::manual_generate(&conn, &locks, ORG, "member", date).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
    assert!(records_on(&conn, date).is_empty(), "no records on denial");

    let totals = generator::manual_generate(&conn, &locks, ORG, "admin", date).unwrap();
    assert_eq!(totals.primary_generated, 1);

    // the admin run leaves an audit entry
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'manual_generate'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn attendance_lookup_failure_is_treated_as_not_on_leave() {
    let db_path = setup_test_db("gen_attendance_error");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    add_employee(&conn, "E2", "Bob");
    insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &["E2"]);

    // the attendance source goes away entirely
    conn.execute_batch("DROP TABLE attendance;").unwrap();

    // E2's check-in trigger still completes: E1 cannot be confirmed on
    // leave, so no backup is created
    let outcome = generator::generate_on_check_in(&conn, &locks, ORG, "E2", date).unwrap();
    assert_eq!(outcome.primary_generated, 0);
    assert_eq!(outcome.backup_generated, 0);
    assert!(records_on(&conn, date).is_empty());

    let logged: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'attendance_lookup_failed'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(logged >= 1, "downgraded lookup must leave an audit trail");
}

#[test]
fn record_survives_checklist_title_rename() {
    // denormalized title: renaming the definition does not rewrite history
    let db_path = setup_test_db("gen_denorm_title");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    let id = insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
    generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();

    let mut def = db::checklists::find_by_id(&conn, ORG, id).unwrap().unwrap();
    def.title = "Open the till".to_string();
    db::checklists::update_checklist(&conn, &def).unwrap();

    let records = records_on(&conn, date);
    assert_eq!(records[0].checklist_title, "Open the register");
}
