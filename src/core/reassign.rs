//! Backup reassignment: reacts to leave-declared and leave-cancelled events.
//! Callers persist the attendance mutation before invoking these entry
//! points, so the statuses read here are durable.

use crate::core::generator::create_assignment;
use crate::core::guard::KeyedLocks;
use crate::core::recurrence::applies_on;
use crate::db;
use crate::errors::AppResult;
use crate::models::assignment::AssignmentRecord;
use chrono::NaiveDate;
use rusqlite::Connection;

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ReassignOutcome {
    pub primaries_removed: u32,
    pub backups_created: u32,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct RestoreOutcome {
    pub backups_removed: u32,
    pub primaries_restored: u32,
}

/// Candidate eligibility for substitution. A status lookup error means we
/// cannot confirm the candidate is present, so they are skipped (logged,
/// not fatal).
fn is_checked_in_safe(conn: &Connection, org: &str, employee_id: &str, date: NaiveDate) -> bool {
    match db::attendance::get_status(conn, org, employee_id, date) {
        Ok(status) => status.is_checked_in(),
        Err(e) => {
            let _ = db::log::audit(
                conn,
                "attendance_lookup_failed",
                employee_id,
                &format!("Skipping backup candidate: {}", e),
            );
            false
        }
    }
}

/// Leave declared for `employee_id` on `date`.
///
/// For every active definition where the employee is a primary owner and the
/// rule fires on the date: the employee's record is deleted if present
/// (completed records included), and the first backup candidate in listed
/// order who is checked in and has no record for the checklist gets exactly
/// one backup record. Never more than one backup per checklist per day.
pub fn on_leave_declared(
    conn: &Connection,
    locks: &KeyedLocks,
    org: &str,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<ReassignOutcome> {
    let defs = db::checklists::load_active(conn, org)?;
    let original_name = db::employees::name_of(conn, org, employee_id)?;

    let mut outcome = ReassignOutcome::default();

    for def in &defs {
        if !def.is_primary(employee_id) || !applies_on(&def.recurrence, date) {
            continue;
        }

        let removed = db::assignments::delete_for_tuple(conn, org, def.id, employee_id, date)?;
        outcome.primaries_removed += removed as u32;

        for candidate in &def.backup_employee_ids {
            if !is_checked_in_safe(conn, org, candidate, date) {
                continue;
            }
            if db::assignments::exists_for_tuple(conn, org, def.id, candidate, date)? {
                continue;
            }

            let candidate_name = db::employees::name_of(conn, org, candidate)?;
            let rec = AssignmentRecord::new_pending(
                org,
                def.id,
                &def.title,
                candidate,
                &candidate_name,
                date,
                "backup_reassignment",
            )
            .into_backup(employee_id, &original_name);

            if create_assignment(conn, locks, &rec)? {
                outcome.backups_created += 1;
                break; // first success wins
            }
        }
    }

    db::log::audit(
        conn,
        "leave_declared",
        employee_id,
        &format!(
            "{}: removed {} primary, created {} backup assignment(s)",
            date,
            outcome.primaries_removed, outcome.backups_created
        ),
    )?;

    Ok(outcome)
}

/// Leave cancelled for `employee_id` on `date`.
///
/// Every uncompleted backup record substituting for the employee is deleted;
/// the original primary record is recreated only when the employee is
/// currently checked in. Completed backups are left untouched: the work was
/// already done by the substitute.
pub fn on_leave_cancelled(
    conn: &Connection,
    locks: &KeyedLocks,
    org: &str,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<RestoreOutcome> {
    let backups = db::assignments::backups_for_original(conn, org, employee_id, date)?;
    let checked_in = db::attendance::get_status(conn, org, employee_id, date)?.is_checked_in();
    let name = db::employees::name_of(conn, org, employee_id)?;

    let mut outcome = RestoreOutcome::default();

    for backup in backups {
        if backup.completed {
            continue;
        }

        db::assignments::delete_by_id(conn, backup.id)?;
        outcome.backups_removed += 1;

        if checked_in {
            let rec = AssignmentRecord::new_pending(
                org,
                backup.checklist_id,
                &backup.checklist_title,
                employee_id,
                &name,
                date,
                "leave_cancelled_restore",
            );
            if create_assignment(conn, locks, &rec)? {
                outcome.primaries_restored += 1;
            }
        }
    }

    db::log::audit(
        conn,
        "leave_cancelled",
        employee_id,
        &format!(
            "{}: removed {} backup, restored {} primary assignment(s)",
            date,
            outcome.backups_removed, outcome.primaries_restored
        ),
    )?;

    Ok(outcome)
}
