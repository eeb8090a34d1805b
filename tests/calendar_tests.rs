mod common;

use checkrota::core::calendar;
use checkrota::core::generator;
use checkrota::core::guard::KeyedLocks;
use checkrota::db;
use checkrota::models::assignment::AssignmentRecord;
use checkrota::models::checklist::RecurrenceType;
use checkrota::models::employee::AttendanceStatus;
use common::*;

#[test]
fn month_view_groups_by_employee_checklist_and_day() {
    let db_path = setup_test_db("cal_grouping");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();

    add_employee(&conn, "E1", "Alice");
    add_employee(&conn, "E2", "Bob");
    let c1 = insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1", "E2"], &[]);

    for day in ["2024-06-03", "2024-06-04"] {
        let date = d(day);
        set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
        set_status(&conn, "E2", date, AttendanceStatus::CheckedIn);
        generator::generate_for_checked_in(&conn, &locks, ORG, date, "manual").unwrap();
    }

    // Alice completes Monday's task
    let rec = db::assignments::find_for_tuple(&conn, ORG, c1, "E1", d("2024-06-03"))
        .unwrap()
        .unwrap();
    db::assignments::set_completion(&conn, rec.id, true, None, Some("2024-06-03T12:00:00+00:00"))
        .unwrap();

    let view = calendar::get_month_view(&conn, ORG, 2024, 6).unwrap();

    assert_eq!(view.per_employee.len(), 2);
    let alice = &view.per_employee["E1"];
    assert_eq!(alice.employee_name, "Alice");
    let grid = &alice.checklists[&c1];
    assert_eq!(grid.checklist_title, "Open the register");
    assert_eq!(grid.days.len(), 2);
    assert!(grid.days["2024-06-03"].completed);
    assert!(!grid.days["2024-06-04"].completed);

    assert_eq!(view.stats.total, 4);
    assert_eq!(view.stats.completed, 1);
    assert_eq!(view.stats.pending, 3);
    assert_eq!(view.stats.per_employee_ratio["E1"], 0.5);
    assert_eq!(view.stats.per_employee_ratio["E2"], 0.0);
    assert_eq!(view.stats.per_date["2024-06-03"].total, 2);
    assert_eq!(view.stats.per_date["2024-06-03"].completed, 1);
}

#[test]
fn month_view_ignores_records_outside_the_month() {
    let db_path = setup_test_db("cal_bounds");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();

    add_employee(&conn, "E1", "Alice");
    insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);

    for day in ["2024-05-31", "2024-06-01", "2024-06-30", "2024-07-01"] {
        let date = d(day);
        set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
        generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();
    }

    let view = calendar::get_month_view(&conn, ORG, 2024, 6).unwrap();
    assert_eq!(view.stats.total, 2);
    let grid = view.per_employee["E1"].checklists.values().next().unwrap();
    assert!(grid.days.contains_key("2024-06-01"));
    assert!(grid.days.contains_key("2024-06-30"));
    assert!(!grid.days.contains_key("2024-05-31"));
    assert!(!grid.days.contains_key("2024-07-01"));
}

#[test]
fn month_view_tolerates_departed_employees() {
    // a record whose employee is gone from the directory still shows up,
    // under the denormalized name snapshot
    let db_path = setup_test_db("cal_departed");
    let conn = open_conn(&db_path);
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    let c1 = insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E9"], &[]);

    let rec = AssignmentRecord::new_pending(ORG, c1, "Open the register", "E9", "Zoe", date, "manual");
    db::assignments::insert_assignment(&conn, &rec).unwrap();

    let view = calendar::get_month_view(&conn, ORG, 2024, 6).unwrap();
    let zoe = &view.per_employee["E9"];
    assert_eq!(zoe.employee_name, "Zoe");
    assert_eq!(view.stats.total, 1);
}

#[test]
fn month_view_marks_backup_cells() {
    let db_path = setup_test_db("cal_backup_cell");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    add_employee(&conn, "E2", "Bob");
    insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &["E2"]);

    set_status(&conn, "E2", date, AttendanceStatus::CheckedIn);
    set_status(&conn, "E1", date, AttendanceStatus::OnLeave);
    checkrota::core::reassign::on_leave_declared(&conn, &locks, ORG, "E1", date).unwrap();

    let view = calendar::get_month_view(&conn, ORG, 2024, 6).unwrap();
    let bob = &view.per_employee["E2"];
    let grid = bob.checklists.values().next().unwrap();
    assert!(grid.days["2024-06-03"].is_backup);
}

#[test]
fn december_view_does_not_overflow_the_year() {
    let db_path = setup_test_db("cal_december");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();

    add_employee(&conn, "E1", "Alice");
    insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);
    let date = d("2024-12-31");
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
    generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();

    let view = calendar::get_month_view(&conn, ORG, 2024, 12).unwrap();
    assert_eq!(view.stats.total, 1);
}
