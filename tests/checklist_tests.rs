mod common;

use checkrota::core::checklist as checklist_ops;
use checkrota::core::generator;
use checkrota::core::guard::KeyedLocks;
use checkrota::db;
use checkrota::errors::AppError;
use checkrota::models::assignment::AssignmentRecord;
use checkrota::models::checklist::RecurrenceType;
use checkrota::models::employee::AttendanceStatus;
use common::*;

#[test]
fn deleting_an_unknown_id_touches_nothing() {
    let db_path = setup_test_db("chk_delete_unknown");
    let conn = open_conn(&db_path);
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");

    // a stale record pointing at a definition id that never existed
    let stray = AssignmentRecord::new_pending(ORG, 999, "Ghost task", "E1", "Alice", date, "manual");
    db::assignments::insert_assignment(&conn, &stray).unwrap();

    let err = checklist_ops::delete_checklist(&conn, ORG, 999).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(records_on(&conn, date).len(), 1, "failed delete removed nothing");
}

#[test]
fn delete_cascades_only_the_definitions_records() {
    let db_path = setup_test_db("chk_delete_cascade");
    let conn = open_conn(&db_path);
    let locks = KeyedLocks::new();
    let date = d("2024-06-03");

    add_employee(&conn, "E1", "Alice");
    let c1 = insert_checklist(&conn, "Open the register", RecurrenceType::Daily, &["E1"], &[]);
    let c2 = insert_checklist(&conn, "Close the store", RecurrenceType::Daily, &["E1"], &[]);
    set_status(&conn, "E1", date, AttendanceStatus::CheckedIn);
    generator::generate_on_check_in(&conn, &locks, ORG, "E1", date).unwrap();
    assert_eq!(records_on(&conn, date).len(), 2);

    let removed = checklist_ops::delete_checklist(&conn, ORG, c1).unwrap();
    assert_eq!(removed, 1);

    let records = records_on(&conn, date);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].checklist_id, c2);
    assert!(db::checklists::find_by_id(&conn, ORG, c1).unwrap().is_none());
}
