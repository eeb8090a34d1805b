//! Read-only month aggregation: one pass over a month's records reshaped
//! into per-employee / per-checklist / per-day grids plus completion stats.

use crate::db;
use crate::db::assignments::ListFilters;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub completed: bool,
    pub reason: Option<String>,
    pub completed_at: Option<String>,
    pub is_backup: bool,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ChecklistGrid {
    pub checklist_title: String,
    /// date "YYYY-MM-DD" -> cell
    pub days: BTreeMap<String, DayCell>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct EmployeeMonth {
    pub employee_name: String,
    /// checklist id -> grid
    pub checklists: BTreeMap<i64, ChecklistGrid>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct DateTotals {
    pub total: u32,
    pub completed: u32,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct MonthStats {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    /// employee id -> completed / total
    pub per_employee_ratio: BTreeMap<String, f64>,
    /// date "YYYY-MM-DD" -> totals
    pub per_date: BTreeMap<String, DateTotals>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// employee id -> per-checklist grids
    pub per_employee: BTreeMap<String, EmployeeMonth>,
    pub stats: MonthStats,
}

/// Build the month view for (year, month).
///
/// Records whose employee has left the active directory still show up,
/// under the name snapshot stored on the record. That is the point of the
/// denormalized columns.
pub fn get_month_view(conn: &Connection, org: &str, year: i32, month: u32) -> AppResult<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{}-{:02}", year, month)))?;
    let last = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .and_then(|d| d.pred_opt())
    .ok_or_else(|| AppError::InvalidDate(format!("{}-{:02}", year, month)))?;

    let filters = ListFilters {
        from: Some(first),
        to: Some(last),
        ..Default::default()
    };
    let records = db::assignments::list_assignments(conn, org, &filters)?;

    // Directory names where available; the record's snapshot otherwise.
    let directory: BTreeMap<String, String> = db::employees::list_active(conn, org)?
        .into_iter()
        .map(|e| (e.employee_id, e.name))
        .collect();

    let mut view = MonthView {
        year,
        month,
        ..Default::default()
    };

    let mut per_employee_counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();

    for rec in records {
        let date_key = rec.date_str();

        let employee = view
            .per_employee
            .entry(rec.employee_id.clone())
            .or_default();
        if employee.employee_name.is_empty() {
            employee.employee_name = directory
                .get(&rec.employee_id)
                .cloned()
                .unwrap_or_else(|| rec.employee_name.clone());
        }

        let grid = employee.checklists.entry(rec.checklist_id).or_default();
        if grid.checklist_title.is_empty() {
            grid.checklist_title = rec.checklist_title.clone();
        }
        grid.days.insert(
            date_key.clone(),
            DayCell {
                completed: rec.completed,
                reason: rec.reason.clone(),
                completed_at: rec.completed_at.clone(),
                is_backup: rec.is_backup_assignment,
            },
        );

        view.stats.total += 1;
        let date_totals = view.stats.per_date.entry(date_key).or_default();
        date_totals.total += 1;

        let counts = per_employee_counts.entry(rec.employee_id).or_default();
        counts.1 += 1;
        if rec.completed {
            view.stats.completed += 1;
            date_totals.completed += 1;
            counts.0 += 1;
        }
    }

    view.stats.pending = view.stats.total - view.stats.completed;
    for (employee_id, (done, total)) in per_employee_counts {
        let ratio = if total == 0 {
            0.0
        } else {
            f64::from(done) / f64::from(total)
        };
        view.stats.per_employee_ratio.insert(employee_id, ratio);
    }

    Ok(view)
}
