use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db;
use crate::db::assignments::ListFilters;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::table::{Column, Table};

fn parse_opt_date(s: &Option<String>) -> AppResult<Option<chrono::NaiveDate>> {
    match s {
        Some(s) => date::parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(None),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        employee,
        checklist,
        date: date_str,
        from,
        to,
        completed,
        pending,
        json,
    } = cmd
    {
        let filters = ListFilters {
            employee_id: employee.clone(),
            checklist_id: *checklist,
            date: parse_opt_date(date_str)?,
            from: parse_opt_date(from)?,
            to: parse_opt_date(to)?,
            completed: if *completed {
                Some(true)
            } else if *pending {
                Some(false)
            } else {
                None
            },
        };

        let pool = DbPool::new(&cfg.database)?;
        let records = db::assignments::list_assignments(&pool.conn, &cfg.organization, &filters)?;

        if *json {
            let out = serde_json::to_string_pretty(&records)
                .map_err(|e| AppError::Other(format!("list serialization: {}", e)))?;
            println!("{}", out);
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column {
                header: "DATE".into(),
                width: 10,
            },
            Column {
                header: "CHECKLIST".into(),
                width: 28,
            },
            Column {
                header: "EMPLOYEE".into(),
                width: 30,
            },
            Column {
                header: "DONE".into(),
                width: 5,
            },
            Column {
                header: "BACKUP".into(),
                width: 7,
            },
            Column {
                header: "REASON".into(),
                width: 24,
            },
        ]);

        for r in records {
            table.add_row(vec![
                r.date_str(),
                r.checklist_title,
                r.employee_name,
                if r.completed { "yes" } else { "no" }.to_string(),
                if r.is_backup_assignment { "yes" } else { "" }.to_string(),
                r.reason.unwrap_or_default(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
