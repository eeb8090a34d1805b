//! Duplicate suppression for assignment creation.
//!
//! Three layers:
//! 1. `KeyedLocks` — an in-process exclusive lock table keyed by
//!    assignment_key, held only across one create path. A racing caller for
//!    the same key gets `None` and must report "not created" without writing.
//! 2. The persisted re-check (`db::assignments::exists_for_tuple`), queried
//!    by the create path right after acquiring the lock. Catches races from
//!    other processes, which layer 1 cannot see.
//! 3. `cleanup_duplicates` — the sweep that removes anything that still
//!    slipped through, keeping the earliest-created record per key.

use crate::db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
pub struct KeyedLocks {
    held: Mutex<HashSet<String>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the exclusive lock for `key`. Returns `None` when another
    /// caller currently holds it. The returned guard releases the key on
    /// Drop, so every exit path (success, error, early return) releases it.
    pub fn acquire(&self, key: &str) -> Option<KeyGuard<'_>> {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(key.to_string()) {
            return None;
        }
        Some(KeyGuard {
            locks: self,
            key: key.to_string(),
        })
    }

    fn release(&self, key: &str) {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(key);
    }
}

pub struct KeyGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.locks.release(&self.key);
    }
}

/// Layer 3: sweep one date. Records are grouped by assignment_key; the
/// earliest-created one (lowest id on a timestamp tie) survives, the rest
/// are deleted. Returns the number of rows removed.
pub fn cleanup_duplicates(conn: &Connection, org: &str, date: chrono::NaiveDate) -> AppResult<usize> {
    // load_by_date orders by created_at then id, so the first record seen
    // per key is the one to keep.
    let records = db::assignments::load_by_date(conn, org, date)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut removed = 0usize;

    for rec in records {
        if !seen.insert(rec.assignment_key.clone()) {
            db::assignments::delete_by_id(conn, rec.id)?;
            removed += 1;
        }
    }

    if removed > 0 {
        db::log::audit(
            conn,
            "cleanup",
            &date.format("%Y-%m-%d").to_string(),
            &format!("Removed {} duplicate assignment(s)", removed),
        )?;
    }

    Ok(removed)
}
