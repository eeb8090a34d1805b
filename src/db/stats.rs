use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let checklists: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM checklists", [], |row| row.get(0))?;
    let assignments: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM assignments", [], |row| row.get(0))?;
    let employees: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;

    println!(
        "{}• Checklists:{} {}{}{}",
        CYAN, RESET, GREEN, checklists, RESET
    );
    println!(
        "{}• Assignments:{} {}{}{}",
        CYAN, RESET, GREEN, assignments, RESET
    );
    println!(
        "{}• Employees:{} {}{}{}",
        CYAN, RESET, GREEN, employees, RESET
    );

    //
    // 3) ASSIGNMENT DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM assignments ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM assignments ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    Ok(())
}
