//! Assignment generation: the check-in trigger, the checked-in-set sweep
//! used by manual generation and checklist creation, and the guarded
//! single-record create path shared with the reassignment engine.

use crate::core::guard::{self, KeyedLocks};
use crate::core::recurrence::applies_on;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentRecord;
use crate::models::checklist::ChecklistDefinition;
use chrono::NaiveDate;
use rusqlite::Connection;

pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct GenerationOutcome {
    pub already_exists: bool,
    pub primary_generated: u32,
    pub backup_generated: u32,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct GenerationTotals {
    pub primary_generated: u32,
    pub backup_generated: u32,
}

/// The single guarded create path. Every assignment write in the crate goes
/// through here.
///
/// Returns Ok(true) when the record was persisted, Ok(false) when it was
/// suppressed: either the key lock is held by a racing caller (layer 1) or
/// the persisted re-check found an existing record for the tuple (layer 2).
pub fn create_assignment(
    conn: &Connection,
    locks: &KeyedLocks,
    rec: &AssignmentRecord,
) -> AppResult<bool> {
    let _guard = match locks.acquire(&rec.assignment_key) {
        Some(g) => g,
        None => return Ok(false),
    };

    if db::assignments::exists_for_tuple(conn, &rec.org, rec.checklist_id, &rec.employee_id, rec.date)? {
        return Ok(false);
    }

    db::assignments::insert_assignment(conn, rec)?;
    Ok(true)
}

/// Attendance status downgraded per the failure policy: a lookup error
/// during a backup check is logged and treated as "not on leave".
fn is_on_leave_safe(conn: &Connection, org: &str, employee_id: &str, date: NaiveDate) -> bool {
    match db::attendance::get_status(conn, org, employee_id, date) {
        Ok(status) => status.is_on_leave(),
        Err(e) => {
            let _ = db::log::audit(
                conn,
                "attendance_lookup_failed",
                employee_id,
                &format!("Treating as not on leave: {}", e),
            );
            false
        }
    }
}

/// First primary owner of `def` who is on leave on `date`, has no record of
/// their own, and is not already covered by a backup record for this
/// checklist on this date. At most one backup per checklist per day.
fn primary_needing_backup(
    conn: &Connection,
    org: &str,
    def: &ChecklistDefinition,
    date: NaiveDate,
) -> AppResult<Option<String>> {
    let existing = db::assignments::load_by_date(conn, org, date)?;
    let backup_covered = existing
        .iter()
        .any(|r| r.checklist_id == def.id && r.is_backup_assignment);
    if backup_covered {
        return Ok(None);
    }

    for primary in &def.assigned_employee_ids {
        if !is_on_leave_safe(conn, org, primary, date) {
            continue;
        }
        if db::assignments::exists_for_tuple(conn, org, def.id, primary, date)? {
            continue;
        }
        return Ok(Some(primary.clone()));
    }
    Ok(None)
}

/// Check-in trigger: generate the employee's primary assignments for the
/// date, then any backup assignment they are eligible for, then sweep.
pub fn generate_on_check_in(
    conn: &Connection,
    locks: &KeyedLocks,
    org: &str,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<GenerationOutcome> {
    if db::assignments::exists_for_employee_date(conn, org, employee_id, date)? {
        return Ok(GenerationOutcome {
            already_exists: true,
            ..Default::default()
        });
    }

    let name = db::employees::name_of(conn, org, employee_id)?;
    let defs = db::checklists::load_active(conn, org)?;

    let mut outcome = GenerationOutcome::default();

    for def in &defs {
        if !applies_on(&def.recurrence, date) || !def.is_primary(employee_id) {
            continue;
        }
        let rec = AssignmentRecord::new_pending(
            org, def.id, &def.title, employee_id, &name, date, "check_in",
        );
        // A failed write loses only this assignment; siblings proceed.
        match create_assignment(conn, locks, &rec) {
            Ok(true) => outcome.primary_generated += 1,
            Ok(false) => {}
            Err(e) => {
                let _ = db::log::audit(conn, "generate_failed", &rec.assignment_key, &e.to_string());
            }
        }
    }

    for def in &defs {
        if !applies_on(&def.recurrence, date) || !def.is_backup(employee_id) {
            continue;
        }
        if let Some(original) = primary_needing_backup(conn, org, def, date)? {
            let original_name = db::employees::name_of(conn, org, &original)?;
            let rec = AssignmentRecord::new_pending(
                org, def.id, &def.title, employee_id, &name, date, "check_in",
            )
            .into_backup(&original, &original_name);
            if create_assignment(conn, locks, &rec)? {
                outcome.backup_generated += 1;
            }
        }
    }

    guard::cleanup_duplicates(conn, org, date)?;

    Ok(outcome)
}

/// Sweep over the whole checked-in set: primaries for every checked-in
/// assigned member, one backup per checklist whose primary is on leave.
/// Idempotent: re-running adds zero records.
pub fn generate_for_checked_in(
    conn: &Connection,
    locks: &KeyedLocks,
    org: &str,
    date: NaiveDate,
    generated_by: &str,
) -> AppResult<GenerationTotals> {
    let checked_in = db::attendance::checked_in_set(conn, org, date)?;
    let defs = db::checklists::load_active(conn, org)?;

    let mut totals = GenerationTotals::default();

    for def in &defs {
        if !applies_on(&def.recurrence, date) {
            continue;
        }

        for employee_id in &def.assigned_employee_ids {
            if !checked_in.contains(employee_id) {
                continue;
            }
            let name = db::employees::name_of(conn, org, employee_id)?;
            let rec = AssignmentRecord::new_pending(
                org, def.id, &def.title, employee_id, &name, date, generated_by,
            );
            match create_assignment(conn, locks, &rec) {
                Ok(true) => totals.primary_generated += 1,
                Ok(false) => {}
                Err(e) => {
                    let _ = db::log::audit(conn, "generate_failed", &rec.assignment_key, &e.to_string());
                }
            }
        }

        if let Some(original) = primary_needing_backup(conn, org, def, date)? {
            let original_name = db::employees::name_of(conn, org, &original)?;
            for candidate in &def.backup_employee_ids {
                if !checked_in.contains(candidate) {
                    continue;
                }
                if db::assignments::exists_for_tuple(conn, org, def.id, candidate, date)? {
                    continue;
                }
                let name = db::employees::name_of(conn, org, candidate)?;
                let rec = AssignmentRecord::new_pending(
                    org, def.id, &def.title, candidate, &name, date, generated_by,
                )
                .into_backup(&original, &original_name);
                if create_assignment(conn, locks, &rec)? {
                    totals.backup_generated += 1;
                    break; // one backup per checklist per day
                }
            }
        }
    }

    guard::cleanup_duplicates(conn, org, date)?;

    Ok(totals)
}

/// Admin-only manual trigger. Writes an audit entry with the totals.
pub fn manual_generate(
    conn: &Connection,
    locks: &KeyedLocks,
    org: &str,
    actor_role: &str,
    date: NaiveDate,
) -> AppResult<GenerationTotals> {
    if actor_role != ROLE_ADMIN {
        return Err(AppError::PermissionDenied(format!(
            "manual generation requires the admin role, got '{}'",
            actor_role
        )));
    }

    let totals = generate_for_checked_in(conn, locks, org, date, "manual")?;

    db::log::audit(
        conn,
        "manual_generate",
        &date.format("%Y-%m-%d").to_string(),
        &format!(
            "Generated {} primary and {} backup assignment(s)",
            totals.primary_generated, totals.backup_generated
        ),
    )?;

    Ok(totals)
}
