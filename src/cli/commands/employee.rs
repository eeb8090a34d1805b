use crate::cli::parser::{Commands, EmployeeCmd};
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            EmployeeCmd::Add {
                id,
                name,
                department,
            } => {
                db::employees::upsert_employee(&pool.conn, &cfg.organization, id, name, department)?;
                db::log::audit(&pool.conn, "employee_add", id, name)?;
                success(format!("Employee {} ({}) recorded.", id, name));
            }
            EmployeeCmd::List => {
                let employees = db::employees::list_active(&pool.conn, &cfg.organization)?;

                let mut table = Table::new(vec![
                    Column {
                        header: "ID".into(),
                        width: 10,
                    },
                    Column {
                        header: "NAME".into(),
                        width: 24,
                    },
                    Column {
                        header: "DEPARTMENT".into(),
                        width: 16,
                    },
                ]);
                for e in employees {
                    table.add_row(vec![e.employee_id, e.name, e.department]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
