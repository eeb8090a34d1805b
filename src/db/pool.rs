//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Triggers may race from separate processes on the same file;
        // queue writers instead of surfacing SQLITE_BUSY immediately.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
