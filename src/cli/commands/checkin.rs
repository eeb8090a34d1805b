use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::generator;
use crate::core::guard::KeyedLocks;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::AttendanceStatus;
use crate::ui::messages::{info, success};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        employee,
        date: date_str,
    } = cmd
    {
        let d = match date_str {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let org = &cfg.organization;

        // The attendance write must be durable before generation runs.
        db::attendance::set_status(&pool.conn, org, employee, d, AttendanceStatus::CheckedIn)?;
        db::log::audit(&pool.conn, "checkin", employee, &d.to_string())?;

        let locks = KeyedLocks::new();
        let outcome = generator::generate_on_check_in(&pool.conn, &locks, org, employee, d)?;

        if outcome.already_exists {
            info(format!(
                "Assignments for {} on {} already exist; nothing generated.",
                employee, d
            ));
        } else {
            success(format!(
                "Checked in {} on {}: {} primary and {} backup assignment(s) generated.",
                employee, d, outcome.primary_generated, outcome.backup_generated
            ));
        }
    }

    Ok(())
}
