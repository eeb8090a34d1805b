//! Attendance gateway. The scheduler only consumes the per-day status and
//! the checked-in set; the rows themselves are written by the `checkin`,
//! `leave` and `leave-cancel` commands, which stand in for the external
//! attendance system. Those commands persist the status BEFORE the
//! generation / reassignment entry points run.

use crate::errors::AppResult;
use crate::models::employee::AttendanceStatus;
use chrono::{Local, NaiveDate};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashSet;

/// Status of one employee on one date. No row means Unknown.
pub fn get_status(
    conn: &Connection,
    org: &str,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<AttendanceStatus> {
    let status: Option<String> = conn
        .query_row(
            "SELECT status FROM attendance WHERE org = ?1 AND employee_id = ?2 AND date = ?3",
            params![org, employee_id, date.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )
        .optional()?;

    Ok(status
        .map(|s| AttendanceStatus::from_db_str(&s))
        .unwrap_or(AttendanceStatus::Unknown))
}

/// All employees checked in on the date.
pub fn checked_in_set(conn: &Connection, org: &str, date: NaiveDate) -> AppResult<HashSet<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id FROM attendance
         WHERE org = ?1 AND date = ?2 AND status = 'checked_in'",
    )?;

    let rows = stmt.query_map(
        params![org, date.format("%Y-%m-%d").to_string()],
        |row| row.get::<_, String>(0),
    )?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

/// Upsert the status row for (org, employee, date).
pub fn set_status(
    conn: &Connection,
    org: &str,
    employee_id: &str,
    date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance (org, employee_id, date, status, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(org, employee_id, date) DO UPDATE SET
             status = excluded.status,
             recorded_at = excluded.recorded_at",
        params![
            org,
            employee_id,
            date.format("%Y-%m-%d").to_string(),
            status.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}
