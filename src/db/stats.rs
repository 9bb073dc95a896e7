use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Status;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW, color_for_status};
use rusqlite::OptionalExtension;
use std::fs;

/// Summary of the database file shown by `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInfo {
    pub file_size: u64,
    pub total: i64,
    pub per_status: Vec<(Status, i64)>,
    pub first: Option<String>,
    pub last: Option<String>,
}

pub fn collect_db_info(pool: &mut DbPool) -> AppResult<DbInfo> {
    let file_size = fs::metadata(pool.path()).map(|m| m.len()).unwrap_or(0);

    pool.with_conn(|conn| {
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))?;

        let mut per_status = Vec::new();
        for status in Status::ALL {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM reservations WHERE status = ?1",
                [status.to_db_str()],
                |row| row.get(0),
            )?;
            per_status.push((status, n));
        }

        let first: Option<String> = conn
            .query_row(
                "SELECT datetime FROM reservations ORDER BY datetime ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last: Option<String> = conn
            .query_row(
                "SELECT datetime FROM reservations ORDER BY datetime DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(DbInfo {
            file_size,
            total,
            per_status,
            first,
            last,
        })
    })
}

pub fn print_db_info(pool: &mut DbPool) -> AppResult<()> {
    let info = collect_db_info(pool)?;
    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path(), RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Total reservations:{} {}{}{}",
        CYAN, RESET, GREEN, info.total, RESET
    );

    for (status, n) in &info.per_status {
        println!(
            "    {}{:<10}{} {}",
            color_for_status(*status),
            status,
            RESET,
            n
        );
    }

    let dash = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", info.first.clone().unwrap_or_else(dash));
    println!("    to:   {}", info.last.clone().unwrap_or_else(dash));
    println!();

    Ok(())
}
