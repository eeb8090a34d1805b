//! Checklist definition operations: validated create/update/delete, plus
//! the same-day generation trigger on creation.

use crate::core::generator::{self, GenerationTotals};
use crate::core::guard::KeyedLocks;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::checklist::{ChecklistDefinition, RecurrenceType};
use crate::utils::date;
use chrono::Local;
use rusqlite::Connection;

/// Pre-write validation. Rejected definitions never reach the store.
pub fn validate_definition(def: &ChecklistDefinition) -> AppResult<()> {
    if def.title.trim().is_empty() {
        return Err(AppError::Validation("checklist title is required".into()));
    }

    match def.recurrence.rtype {
        RecurrenceType::Daily => {}
        RecurrenceType::Weekly => match def.recurrence.day_of_week {
            Some(0..=6) => {}
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "day_of_week must be 0..6 (0=Sunday), got {}",
                    other
                )));
            }
            None => {
                return Err(AppError::Validation(
                    "weekly recurrence requires day_of_week".into(),
                ));
            }
        },
        RecurrenceType::Monthly => match def.recurrence.day_of_month {
            Some(1..=31) => {}
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "day_of_month must be 1..31, got {}",
                    other
                )));
            }
            None => {
                return Err(AppError::Validation(
                    "monthly recurrence requires day_of_month".into(),
                ));
            }
        },
        RecurrenceType::Once => match def.recurrence.specific_date {
            Some(d) if d < date::today() => {
                return Err(AppError::Validation(format!(
                    "specific_date {} is in the past",
                    d
                )));
            }
            Some(_) => {}
            None => {
                return Err(AppError::Validation(
                    "'once' recurrence requires specific_date".into(),
                ));
            }
        },
    }

    Ok(())
}

/// Create a definition and immediately generate today's assignments for the
/// employees that already checked in. The generation sweep is idempotent,
/// so records other checklists already produced stay untouched.
pub fn create_checklist(
    conn: &Connection,
    locks: &KeyedLocks,
    def: &mut ChecklistDefinition,
    actor: &str,
) -> AppResult<(i64, GenerationTotals)> {
    validate_definition(def)?;

    let now = Local::now().to_rfc3339();
    def.created_by = actor.to_string();
    def.created_at = now.clone();
    def.updated_at = now;

    let id = db::checklists::insert_checklist(conn, def)?;
    def.id = id;

    db::log::audit(
        conn,
        "checklist_create",
        &id.to_string(),
        &format!("'{}' created by {}", def.title, actor),
    )?;

    let totals =
        generator::generate_for_checked_in(conn, locks, &def.org, date::today(), "checklist_created")?;

    Ok((id, totals))
}

pub fn update_checklist(conn: &Connection, def: &mut ChecklistDefinition) -> AppResult<()> {
    validate_definition(def)?;
    def.updated_at = Local::now().to_rfc3339();
    db::checklists::update_checklist(conn, def)?;
    Ok(())
}

/// Flip is_active. Inactive definitions stop generating; existing records
/// are kept.
pub fn toggle_active(conn: &Connection, org: &str, id: i64) -> AppResult<bool> {
    let mut def = db::checklists::find_by_id(conn, org, id)?
        .ok_or_else(|| AppError::NotFound(format!("checklist {}", id)))?;

    def.is_active = !def.is_active;
    def.updated_at = Local::now().to_rfc3339();
    db::checklists::update_checklist(conn, &def)?;
    Ok(def.is_active)
}

/// Delete a definition; cascades to every assignment record it generated.
pub fn delete_checklist(conn: &Connection, org: &str, id: i64) -> AppResult<usize> {
    let removed_records = db::checklists::delete_checklist(conn, org, id)?;

    db::log::audit(
        conn,
        "checklist_delete",
        &id.to_string(),
        &format!("Cascaded to {} assignment record(s)", removed_records),
    )?;

    Ok(removed_records)
}
