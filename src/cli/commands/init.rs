use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ PREPARE CONFIGURATION
    //
    // `cfg.database` already carries any `--db` override.
    let db_path = Config::init_all(Some(&cfg.database), cli.test)?;

    println!("⚙️  Initializing rbooking…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ OPEN DB + SCHEMA
    //
    let mut pool = DbPool::with_busy_timeout(&db_path, cfg.busy_timeout_ms)?;
    pool.with_conn(|conn| crate::db::initialize::init_db(conn))?;

    println!("✅ Database initialized at {}", &db_path);

    //
    // 3️⃣ INTERNAL LOG (non blocking)
    //
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rbooking initialization completed!");
    Ok(())
}
