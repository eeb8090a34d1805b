//! Completion recording: upserts the single record for a
//! (checklist, employee, date) tuple.

use crate::core::generator::create_assignment;
use crate::core::guard::KeyedLocks;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentRecord;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct CompletionInput {
    pub checklist_id: i64,
    pub employee_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub reason: Option<String>,
}

/// Upsert the completion state of the tuple's single record. Marking a task
/// not-completed requires a non-empty reason.
pub fn record_completion(
    conn: &Connection,
    locks: &KeyedLocks,
    org: &str,
    input: &CompletionInput,
) -> AppResult<AssignmentRecord> {
    if !input.completed
        && input
            .reason
            .as_deref()
            .map(|r| r.trim().is_empty())
            .unwrap_or(true)
    {
        return Err(AppError::Validation(
            "a reason is required when a task is not completed".into(),
        ));
    }

    if db::assignments::find_for_tuple(conn, org, input.checklist_id, &input.employee_id, input.date)?
        .is_none()
    {
        // No record yet: materialize one through the guarded create path,
        // then fall through to the completion update.
        let def = db::checklists::find_by_id(conn, org, input.checklist_id)?
            .ok_or_else(|| AppError::NotFound(format!("checklist {}", input.checklist_id)))?;
        let name = db::employees::name_of(conn, org, &input.employee_id)?;

        let rec = AssignmentRecord::new_pending(
            org,
            def.id,
            &def.title,
            &input.employee_id,
            &name,
            input.date,
            "completion",
        );
        // Ok(false) means a racing caller created the row first; either way
        // the tuple now has its record.
        create_assignment(conn, locks, &rec)?;
    }

    let existing = db::assignments::find_for_tuple(
        conn,
        org,
        input.checklist_id,
        &input.employee_id,
        input.date,
    )?
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "assignment ({}, {}, {})",
            input.checklist_id, input.employee_id, input.date
        ))
    })?;

    let completed_at = if input.completed {
        Some(Local::now().to_rfc3339())
    } else {
        None
    };
    let reason = if input.completed {
        None
    } else {
        input.reason.clone()
    };

    db::assignments::set_completion(
        conn,
        existing.id,
        input.completed,
        reason.as_deref(),
        completed_at.as_deref(),
    )?;

    let updated = db::assignments::find_for_tuple(
        conn,
        org,
        input.checklist_id,
        &input.employee_id,
        input.date,
    )?
    .ok_or_else(|| AppError::Other("assignment vanished during completion update".into()))?;

    Ok(updated)
}
