use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Month { year, month } = cmd {
        if !(1..=12).contains(month) {
            return Err(AppError::InvalidDate(format!("month {}", month)));
        }

        let pool = DbPool::new(&cfg.database)?;
        let view = calendar::get_month_view(&pool.conn, &cfg.organization, *year, *month)?;

        let json = serde_json::to_string_pretty(&view)
            .map_err(|e| AppError::Other(format!("month view serialization: {}", e)))?;
        println!("{}", json);
    }

    Ok(())
}
