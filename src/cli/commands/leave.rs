use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::guard::KeyedLocks;
use crate::core::reassign;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::AttendanceStatus;
use crate::ui::messages::success;
use crate::utils::date;

/// Handles both `leave` and `leave-cancel`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Leave {
            employee,
            date: date_str,
        } => {
            let d = parse_or_today(date_str)?;
            let pool = DbPool::new(&cfg.database)?;
            let org = &cfg.organization;

            // Persist the status first: the reassignment engine reads it back.
            db::attendance::set_status(&pool.conn, org, employee, d, AttendanceStatus::OnLeave)?;

            let locks = KeyedLocks::new();
            let outcome = reassign::on_leave_declared(&pool.conn, &locks, org, employee, d)?;

            success(format!(
                "Leave recorded for {} on {}: {} assignment(s) removed, {} backup(s) created.",
                employee, d, outcome.primaries_removed, outcome.backups_created
            ));
        }

        Commands::LeaveCancel {
            employee,
            date: date_str,
            present,
        } => {
            let d = parse_or_today(date_str)?;
            let pool = DbPool::new(&cfg.database)?;
            let org = &cfg.organization;

            // Whether the employee is back on site decides if their primary
            // assignments are restored; the engine reads the stored status.
            let status = if *present {
                AttendanceStatus::CheckedIn
            } else {
                AttendanceStatus::Unknown
            };
            db::attendance::set_status(&pool.conn, org, employee, d, status)?;

            let locks = KeyedLocks::new();
            let outcome = reassign::on_leave_cancelled(&pool.conn, &locks, org, employee, d)?;

            success(format!(
                "Leave cancelled for {} on {}: {} backup(s) removed, {} assignment(s) restored.",
                employee, d, outcome.backups_removed, outcome.primaries_restored
            ));
        }

        _ => {}
    }

    Ok(())
}

fn parse_or_today(date_str: &Option<String>) -> AppResult<chrono::NaiveDate> {
    match date_str {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(date::today()),
    }
}
