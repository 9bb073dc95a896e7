use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::{queries, stats};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let mut pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;

        // info and check read the reservations table, so the schema must be current
        if *migrate || *info || *check {
            if *migrate {
                println!("{CYAN}▶ Running migrations…{RESET}");
            }
            pool.with_conn(|conn| run_pending_migrations(conn))?;
            if *migrate {
                println!("{GREEN}✔ Migration completed.{RESET}\n");
            }
        }

        if *info {
            stats::print_db_info(&mut pool)?;
        }

        if *check {
            check_store(&mut pool)?;
        }

        if *vacuum {
            println!("{CYAN}▶ Running VACUUM…{RESET}");
            pool.conn.execute_batch("VACUUM;")?;
            println!("{GREEN}✔ Vacuum completed.{RESET}\n");
        }
    }

    Ok(())
}

/// SQLite integrity check plus the reservation rows that need a manual or
/// `backfill` repair.
fn check_store(pool: &mut DbPool) -> AppResult<()> {
    println!("{CYAN}▶ Running integrity check…{RESET}");

    let (integrity, missing, unreadable) = pool.with_conn(|conn| {
        let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        Ok((
            integrity,
            queries::rows_missing_id(conn)?.len(),
            queries::unreadable_rows(conn)?,
        ))
    })?;

    if integrity == "ok" {
        println!("{GREEN}✔ Integrity check passed.{RESET}");
    } else {
        println!("{RED}✘ Integrity check failed:{RESET} {integrity}");
    }

    if missing > 0 {
        println!(
            "{YELLOW}⚠ {missing} reservation(s) without an identifier; run `rbooking backfill`.{RESET}"
        );
    }

    if !unreadable.is_empty() {
        println!(
            "{YELLOW}⚠ {} reservation(s) hidden from list and export:{RESET}",
            unreadable.len()
        );
        for row in &unreadable {
            let id = row.reservation_id.as_deref().unwrap_or("(no id)");
            println!("    row {:<5} {id}: {}", row.rowid, row.reason);
        }
        println!("  Fix them with `rbooking update <ID> --datetime/--party-size` or `rbooking status <ID> <STATUS>`.");
    }
    println!();

    Ok(())
}
