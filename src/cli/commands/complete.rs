use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::completion::{self, CompletionInput};
use crate::core::guard::KeyedLocks;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Complete {
        checklist,
        employee,
        date: date_str,
        not_done,
        reason,
    } = cmd
    {
        let d = date::parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;

        let pool = DbPool::new(&cfg.database)?;
        let locks = KeyedLocks::new();

        let input = CompletionInput {
            checklist_id: *checklist,
            employee_id: employee.clone(),
            date: d,
            completed: !*not_done,
            reason: reason.clone(),
        };

        let rec = completion::record_completion(&pool.conn, &locks, &cfg.organization, &input)?;

        if rec.completed {
            success(format!(
                "Marked checklist #{} completed for {} on {}.",
                checklist, employee, d
            ));
        } else {
            success(format!(
                "Marked checklist #{} NOT completed for {} on {} (reason: {}).",
                checklist,
                employee,
                d,
                rec.reason.as_deref().unwrap_or("")
            ));
        }
    }

    Ok(())
}
