//! Schema creation and upgrades. All DDL lives here; `init_db` only
//! delegates to `run_pending_migrations`.

use crate::ui::messages::warning;
use rusqlite::{Connection, OptionalExtension, Result};

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `checklists` table. Employee id lists are stored as JSON
/// arrays to keep their ordering, which is the backup priority.
fn create_checklists_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS checklists (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            org           TEXT NOT NULL,
            title         TEXT NOT NULL,
            description   TEXT NOT NULL DEFAULT '',
            is_active     INTEGER NOT NULL DEFAULT 1,
            assigned_ids  TEXT NOT NULL DEFAULT '[]',
            backup_ids    TEXT NOT NULL DEFAULT '[]',
            recur_type    TEXT NOT NULL CHECK(recur_type IN ('daily','weekly','monthly','once')),
            day_of_week   INTEGER,
            day_of_month  INTEGER,
            specific_date TEXT,
            created_by    TEXT NOT NULL DEFAULT '',
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_checklists_org_active ON checklists(org, is_active);
        "#,
    )?;
    Ok(())
}

/// Create the `assignments` table.
///
/// `assignment_key` is deliberately NOT unique at the schema level: duplicate
/// suppression is the job of the keyed lock, the pre-write re-check and the
/// cleanup sweep, and the sweep needs to be able to observe a duplicate that
/// slipped through a cross-process race.
fn create_assignments_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS assignments (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            org                  TEXT NOT NULL,
            checklist_id         INTEGER NOT NULL,
            checklist_title      TEXT NOT NULL,
            employee_id          TEXT NOT NULL,
            employee_name        TEXT NOT NULL,
            date                 TEXT NOT NULL,
            completed            INTEGER NOT NULL DEFAULT 0,
            reason               TEXT,
            completed_at         TEXT,
            is_backup            INTEGER NOT NULL DEFAULT 0,
            original_employee_id TEXT,
            generated_by         TEXT NOT NULL DEFAULT 'manual',
            assignment_key       TEXT NOT NULL,
            created_at           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_assignments_org_date ON assignments(org, date);
        CREATE INDEX IF NOT EXISTS idx_assignments_key ON assignments(assignment_key);
        CREATE INDEX IF NOT EXISTS idx_assignments_org_emp_date ON assignments(org, employee_id, date);
        "#,
    )?;
    Ok(())
}

/// Create the directory and attendance tables consumed by the scheduler.
fn create_people_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            org         TEXT NOT NULL,
            employee_id TEXT NOT NULL,
            name        TEXT NOT NULL,
            department  TEXT NOT NULL DEFAULT '',
            active      INTEGER NOT NULL DEFAULT 1,
            UNIQUE(org, employee_id)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            org         TEXT NOT NULL,
            employee_id TEXT NOT NULL,
            date        TEXT NOT NULL,
            status      TEXT NOT NULL CHECK(status IN ('checked_in','on_leave','unknown')),
            recorded_at TEXT NOT NULL,
            UNIQUE(org, employee_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_org_date ON attendance(org, date);
        "#,
    )?;
    Ok(())
}

fn current_schema_version(conn: &Connection) -> Result<i32> {
    if !table_exists(conn, "schema_version")? {
        return Ok(0);
    }
    let v: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);",
    )?;
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Bring the database up to the current schema. Safe to run repeatedly.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    let version = current_schema_version(conn)?;

    if version < 1 {
        if version == 0 && table_exists(conn, "assignments")? {
            warning("Re-applying base schema over an unversioned database...");
        }
        ensure_log_table(conn)?;
        create_checklists_table(conn)?;
        create_assignments_table(conn)?;
        create_people_tables(conn)?;
        set_schema_version(conn, 1)?;
    }

    Ok(())
}
