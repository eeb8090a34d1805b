use crate::errors::{AppError, AppResult};
use crate::models::checklist::{ChecklistDefinition, Recurrence, RecurrenceType};
use chrono::NaiveDate;
use rusqlite::params;
use rusqlite::{Connection, Result, Row};

fn conversion_err(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<ChecklistDefinition> {
    let assigned_json: String = row.get("assigned_ids")?;
    let backup_json: String = row.get("backup_ids")?;

    let assigned_employee_ids: Vec<String> = serde_json::from_str(&assigned_json)
        .map_err(|_| conversion_err(AppError::Other(format!("Bad id list: {}", assigned_json))))?;
    let backup_employee_ids: Vec<String> = serde_json::from_str(&backup_json)
        .map_err(|_| conversion_err(AppError::Other(format!("Bad id list: {}", backup_json))))?;

    let rtype_str: String = row.get("recur_type")?;
    let rtype = RecurrenceType::from_db_str(&rtype_str)
        .ok_or_else(|| conversion_err(AppError::InvalidRecurrence(rtype_str.clone())))?;

    let specific_date: Option<NaiveDate> = match row.get::<_, Option<String>>("specific_date")? {
        Some(s) => Some(
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| conversion_err(AppError::InvalidDate(s.clone())))?,
        ),
        None => None,
    };

    Ok(ChecklistDefinition {
        id: row.get("id")?,
        org: row.get("org")?,
        title: row.get("title")?,
        description: row.get("description")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        assigned_employee_ids,
        backup_employee_ids,
        recurrence: Recurrence {
            rtype,
            day_of_week: row.get("day_of_week")?,
            day_of_month: row.get("day_of_month")?,
            specific_date,
        },
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_checklist(conn: &Connection, def: &ChecklistDefinition) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO checklists (org, title, description, is_active, assigned_ids, backup_ids,
                                 recur_type, day_of_week, day_of_month, specific_date,
                                 created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            def.org,
            def.title,
            def.description,
            if def.is_active { 1 } else { 0 },
            serde_json::to_string(&def.assigned_employee_ids).unwrap_or_else(|_| "[]".into()),
            serde_json::to_string(&def.backup_employee_ids).unwrap_or_else(|_| "[]".into()),
            def.recurrence.rtype.to_db_str(),
            def.recurrence.day_of_week,
            def.recurrence.day_of_month,
            def.recurrence
                .specific_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            def.created_by,
            def.created_at,
            def.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a definition (all fields except id/org/created_*).
pub fn update_checklist(conn: &Connection, def: &ChecklistDefinition) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE checklists
         SET title = ?1, description = ?2, is_active = ?3,
             assigned_ids = ?4, backup_ids = ?5,
             recur_type = ?6, day_of_week = ?7, day_of_month = ?8, specific_date = ?9,
             updated_at = ?10
         WHERE org = ?11 AND id = ?12",
        params![
            def.title,
            def.description,
            if def.is_active { 1 } else { 0 },
            serde_json::to_string(&def.assigned_employee_ids).unwrap_or_else(|_| "[]".into()),
            serde_json::to_string(&def.backup_employee_ids).unwrap_or_else(|_| "[]".into()),
            def.recurrence.rtype.to_db_str(),
            def.recurrence.day_of_week,
            def.recurrence.day_of_month,
            def.recurrence
                .specific_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            def.updated_at,
            def.org,
            def.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("checklist {}", def.id)));
    }
    Ok(())
}

/// Delete a definition and cascade to every assignment it generated. Both
/// deletes run in one transaction, and an unknown id fails before anything
/// is touched.
pub fn delete_checklist(conn: &Connection, org: &str, id: i64) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;

    let exists = {
        let mut stmt = tx.prepare_cached("SELECT 1 FROM checklists WHERE org = ?1 AND id = ?2")?;
        stmt.exists(params![org, id])?
    };
    if !exists {
        return Err(AppError::NotFound(format!("checklist {}", id)));
    }

    let removed_records = tx.execute(
        "DELETE FROM assignments WHERE org = ?1 AND checklist_id = ?2",
        params![org, id],
    )?;
    tx.execute(
        "DELETE FROM checklists WHERE org = ?1 AND id = ?2",
        params![org, id],
    )?;
    tx.commit()?;

    Ok(removed_records)
}

pub fn find_by_id(conn: &Connection, org: &str, id: i64) -> AppResult<Option<ChecklistDefinition>> {
    let mut stmt = conn.prepare("SELECT * FROM checklists WHERE org = ?1 AND id = ?2")?;
    let mut rows = stmt.query_map(params![org, id], map_row)?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn load_active(conn: &Connection, org: &str) -> AppResult<Vec<ChecklistDefinition>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM checklists
         WHERE org = ?1 AND is_active = 1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([org], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all(conn: &Connection, org: &str) -> AppResult<Vec<ChecklistDefinition>> {
    let mut stmt = conn.prepare("SELECT * FROM checklists WHERE org = ?1 ORDER BY id ASC")?;

    let rows = stmt.query_map([org], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
