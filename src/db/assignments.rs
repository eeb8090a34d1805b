use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentRecord;
use chrono::NaiveDate;
use rusqlite::params;
use rusqlite::{Connection, Result, Row, ToSql};

pub fn map_row(row: &Row) -> Result<AssignmentRecord> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(AssignmentRecord {
        id: row.get("id")?,
        org: row.get("org")?,
        checklist_id: row.get("checklist_id")?,
        checklist_title: row.get("checklist_title")?,
        employee_id: row.get("employee_id")?,
        employee_name: row.get("employee_name")?,
        date,
        completed: row.get::<_, i32>("completed")? == 1,
        reason: row.get("reason")?,
        completed_at: row.get("completed_at")?,
        is_backup_assignment: row.get::<_, i32>("is_backup")? == 1,
        original_employee_id: row.get("original_employee_id")?,
        generated_by: row.get("generated_by")?,
        assignment_key: row.get("assignment_key")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_assignment(conn: &Connection, rec: &AssignmentRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO assignments (org, checklist_id, checklist_title, employee_id, employee_name,
                                  date, completed, reason, completed_at, is_backup,
                                  original_employee_id, generated_by, assignment_key, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            rec.org,
            rec.checklist_id,
            rec.checklist_title,
            rec.employee_id,
            rec.employee_name,
            rec.date_str(),
            if rec.completed { 1 } else { 0 },
            rec.reason,
            rec.completed_at,
            if rec.is_backup_assignment { 1 } else { 0 },
            rec.original_employee_id,
            rec.generated_by,
            rec.assignment_key,
            rec.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// True if the employee already has any record on the date (primary or backup).
pub fn exists_for_employee_date(
    conn: &Connection,
    org: &str,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM assignments WHERE org = ?1 AND employee_id = ?2 AND date = ?3 LIMIT 1",
    )?;
    let exists = stmt.exists(params![org, employee_id, date.format("%Y-%m-%d").to_string()])?;
    Ok(exists)
}

/// The persisted duplicate re-check: queried immediately after acquiring the
/// in-process key lock, before any write.
pub fn exists_for_tuple(
    conn: &Connection,
    org: &str,
    checklist_id: i64,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM assignments
         WHERE org = ?1 AND checklist_id = ?2 AND employee_id = ?3 AND date = ?4
         LIMIT 1",
    )?;
    let exists = stmt.exists(params![
        org,
        checklist_id,
        employee_id,
        date.format("%Y-%m-%d").to_string()
    ])?;
    Ok(exists)
}

pub fn find_for_tuple(
    conn: &Connection,
    org: &str,
    checklist_id: i64,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<Option<AssignmentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM assignments
         WHERE org = ?1 AND checklist_id = ?2 AND employee_id = ?3 AND date = ?4
         ORDER BY created_at ASC, id ASC
         LIMIT 1",
    )?;
    let mut rows = stmt.query_map(
        params![
            org,
            checklist_id,
            employee_id,
            date.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn delete_by_id(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM assignments WHERE id = ?", [id])?;
    Ok(())
}

/// Delete every record for the tuple, regardless of completion state.
pub fn delete_for_tuple(
    conn: &Connection,
    org: &str,
    checklist_id: i64,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<usize> {
    let removed = conn.execute(
        "DELETE FROM assignments
         WHERE org = ?1 AND checklist_id = ?2 AND employee_id = ?3 AND date = ?4",
        params![
            org,
            checklist_id,
            employee_id,
            date.format("%Y-%m-%d").to_string()
        ],
    )?;
    Ok(removed)
}

pub fn load_by_date(conn: &Connection, org: &str, date: NaiveDate) -> AppResult<Vec<AssignmentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM assignments
         WHERE org = ?1 AND date = ?2
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![org, date.format("%Y-%m-%d").to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Backup records on a date that substitute for `original_employee_id`.
pub fn backups_for_original(
    conn: &Connection,
    org: &str,
    original_employee_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<AssignmentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM assignments
         WHERE org = ?1 AND date = ?2 AND is_backup = 1 AND original_employee_id = ?3
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            org,
            date.format("%Y-%m-%d").to_string(),
            original_employee_id
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_completion(
    conn: &Connection,
    id: i64,
    completed: bool,
    reason: Option<&str>,
    completed_at: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE assignments
         SET completed = ?1, reason = ?2, completed_at = ?3
         WHERE id = ?4",
        params![if completed { 1 } else { 0 }, reason, completed_at, id],
    )?;
    Ok(())
}

/// Filters for `list_assignments`. All fields combine with AND.
#[derive(Debug, Default, Clone)]
pub struct ListFilters {
    pub employee_id: Option<String>,
    pub checklist_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub completed: Option<bool>,
}

/// Filtered listing, newest-created-first.
pub fn list_assignments(
    conn: &Connection,
    org: &str,
    filters: &ListFilters,
) -> AppResult<Vec<AssignmentRecord>> {
    let mut sql = String::from("SELECT * FROM assignments WHERE org = ?");
    let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(org.to_string())];

    if let Some(emp) = &filters.employee_id {
        sql.push_str(" AND employee_id = ?");
        values.push(Box::new(emp.clone()));
    }
    if let Some(cid) = filters.checklist_id {
        sql.push_str(" AND checklist_id = ?");
        values.push(Box::new(cid));
    }
    if let Some(d) = filters.date {
        sql.push_str(" AND date = ?");
        values.push(Box::new(d.format("%Y-%m-%d").to_string()));
    }
    if let Some(from) = filters.from {
        sql.push_str(" AND date >= ?");
        values.push(Box::new(from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = filters.to {
        sql.push_str(" AND date <= ?");
        values.push(Box::new(to.format("%Y-%m-%d").to_string()));
    }
    if let Some(done) = filters.completed {
        sql.push_str(" AND completed = ?");
        values.push(Box::new(if done { 1 } else { 0 }));
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
