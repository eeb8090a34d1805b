use crate::cli::parser::{ChecklistCmd, Commands};
use crate::config::Config;
use crate::core::checklist as checklist_ops;
use crate::core::guard::KeyedLocks;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::checklist::{ChecklistDefinition, Recurrence, RecurrenceType};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use crate::utils::table::{Column, Table};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checklist { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let org = &cfg.organization;

        match action {
            ChecklistCmd::Add {
                title,
                description,
                recur,
                day_of_week,
                day_of_month,
                specific_date,
                assigned,
                backups,
                actor,
            } => {
                let rtype = RecurrenceType::from_db_str(recur)
                    .ok_or_else(|| AppError::InvalidRecurrence(recur.clone()))?;

                let specific = match specific_date {
                    Some(s) => Some(
                        date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                    ),
                    None => None,
                };

                let mut def = ChecklistDefinition {
                    id: 0,
                    org: org.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    is_active: true,
                    assigned_employee_ids: assigned.clone(),
                    backup_employee_ids: backups.clone(),
                    recurrence: Recurrence {
                        rtype,
                        day_of_week: *day_of_week,
                        day_of_month: *day_of_month,
                        specific_date: specific,
                    },
                    created_by: String::new(),
                    created_at: String::new(),
                    updated_at: String::new(),
                };

                let locks = KeyedLocks::new();
                let (id, totals) =
                    checklist_ops::create_checklist(&pool.conn, &locks, &mut def, actor)?;

                success(format!("Checklist #{} '{}' created.", id, title));
                if totals.primary_generated > 0 || totals.backup_generated > 0 {
                    info(format!(
                        "Generated {} primary and {} backup assignment(s) for today.",
                        totals.primary_generated, totals.backup_generated
                    ));
                }
            }

            ChecklistCmd::List => {
                let defs = db::checklists::load_all(&pool.conn, org)?;

                let mut table = Table::new(vec![
                    Column {
                        header: "ID".into(),
                        width: 5,
                    },
                    Column {
                        header: "TITLE".into(),
                        width: 28,
                    },
                    Column {
                        header: "RECUR".into(),
                        width: 8,
                    },
                    Column {
                        header: "ACTIVE".into(),
                        width: 7,
                    },
                    Column {
                        header: "ASSIGNED".into(),
                        width: 24,
                    },
                    Column {
                        header: "BACKUPS".into(),
                        width: 24,
                    },
                ]);
                for d in defs {
                    table.add_row(vec![
                        d.id.to_string(),
                        d.title,
                        d.recurrence.rtype.to_db_str().to_string(),
                        if d.is_active { "yes" } else { "no" }.to_string(),
                        d.assigned_employee_ids.join(","),
                        d.backup_employee_ids.join(","),
                    ]);
                }
                print!("{}", table.render());
            }

            ChecklistCmd::Del { id, yes } => {
                let prompt = format!(
                    "Delete checklist #{} and ALL of its assignment records? This action is irreversible.",
                    id
                );
                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let removed = checklist_ops::delete_checklist(&pool.conn, org, *id)?;
                success(format!(
                    "Checklist #{} deleted ({} assignment record(s) removed).",
                    id, removed
                ));
            }

            ChecklistCmd::Toggle { id } => {
                let active = checklist_ops::toggle_active(&pool.conn, org, *id)?;
                success(format!(
                    "Checklist #{} is now {}.",
                    id,
                    if active { "active" } else { "inactive" }
                ));
            }
        }
    }

    Ok(())
}
