//! Employee directory reads and the minimal writer the CLI needs to stand
//! in for the external directory.

use crate::errors::AppResult;
use crate::models::employee::EmployeeRef;
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_row(row: &Row) -> Result<EmployeeRef> {
    Ok(EmployeeRef {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        name: row.get("name")?,
        department: row.get("department")?,
    })
}

pub fn list_active(conn: &Connection, org: &str) -> AppResult<Vec<EmployeeRef>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM employees
         WHERE org = ?1 AND active = 1
         ORDER BY employee_id ASC",
    )?;

    let rows = stmt.query_map([org], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Display name for an employee id, falling back to the id itself when the
/// employee is not (or no longer) in the active directory.
pub fn name_of(conn: &Connection, org: &str, employee_id: &str) -> AppResult<String> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM employees WHERE org = ?1 AND employee_id = ?2 AND active = 1",
            params![org, employee_id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(name.unwrap_or_else(|| employee_id.to_string()))
}

pub fn upsert_employee(
    conn: &Connection,
    org: &str,
    employee_id: &str,
    name: &str,
    department: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (org, employee_id, name, department, active)
         VALUES (?1, ?2, ?3, ?4, 1)
         ON CONFLICT(org, employee_id) DO UPDATE SET
             name = excluded.name,
             department = excluded.department,
             active = 1",
        params![org, employee_id, name, department],
    )?;
    Ok(())
}
