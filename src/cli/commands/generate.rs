use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::generator;
use crate::core::guard::KeyedLocks;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate {
        date: date_str,
        role,
    } = cmd
    {
        let d = match date_str {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let actor_role = role.clone().unwrap_or_else(|| cfg.actor_role.clone());

        let pool = DbPool::new(&cfg.database)?;
        let locks = KeyedLocks::new();

        let totals =
            generator::manual_generate(&pool.conn, &locks, &cfg.organization, &actor_role, d)?;

        success(format!(
            "Manual generation for {}: {} primary and {} backup assignment(s).",
            d, totals.primary_generated, totals.backup_generated
        ));
    }

    Ok(())
}
