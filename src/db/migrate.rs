use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::date::{parse_stored_datetime, to_db_datetime};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, warn};

/// `GLOB` pattern matching the canonical `YYYY-MM-DDTHH:MM:SS` layout.
const CANONICAL_DATETIME_GLOB: &str =
    "[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]T[0-9][0-9]:[0-9][0-9]:[0-9][0-9]";

/// Columns every `reservations` table must carry, with the DDL used when a
/// legacy file lacks one of them. `reservation_id` cannot be added as a
/// primary key after the fact, so uniqueness comes from
/// [`ensure_unique_reservation_id`].
const REQUIRED_COLUMNS: [(&str, &str); 10] = [
    ("reservation_id", "TEXT"),
    ("datetime", "TEXT NOT NULL DEFAULT '1970-01-01T00:00:00'"),
    ("business", "TEXT NOT NULL DEFAULT ''"),
    ("party_size", "INTEGER NOT NULL DEFAULT 0"),
    ("customer_name", "TEXT"),
    ("customer_email", "TEXT"),
    ("contact_phone", "TEXT"),
    ("table_number", "TEXT"),
    ("notes", "TEXT"),
    ("status", "TEXT NOT NULL DEFAULT 'confirmed'"),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `reservations` table exists.
fn reservations_table_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='reservations'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn reservation_columns(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('reservations')")?;
    let cols = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cols)
}

/// Create the `reservations` table with the modern schema.
fn create_reservations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            reservation_id  TEXT PRIMARY KEY,
            datetime        TEXT NOT NULL,
            business        TEXT NOT NULL,
            party_size      INTEGER NOT NULL,
            customer_name   TEXT,
            customer_email  TEXT,
            contact_phone   TEXT,
            table_number    TEXT,
            notes           TEXT,
            status          TEXT NOT NULL DEFAULT 'confirmed'
                            CHECK(status IN ('confirmed','cancelled','updated'))
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Add any required column a legacy `reservations` table is missing.
fn repair_missing_columns(conn: &Connection) -> AppResult<usize> {
    let existing = reservation_columns(conn)?;
    let mut added = 0;

    for (name, ddl) in REQUIRED_COLUMNS {
        if existing.iter().any(|c| c == name) {
            continue;
        }

        warning(format!("Legacy reservations table: adding missing column '{name}'"));
        conn.execute_batch(&format!(
            "ALTER TABLE reservations ADD COLUMN {name} {ddl};"
        ))?;

        let version = format!("add_column_{name}");
        if !migration_applied(conn, &version)? {
            mark_applied(
                conn,
                &version,
                &format!("Added '{name}' to reservations table"),
            )?;
        }
        info!(column = name, "legacy column added");
        added += 1;
    }

    Ok(added)
}

/// True when `reservation_id` alone is the primary key or carries a
/// non-partial unique index.
fn reservation_id_is_unique(conn: &Connection) -> AppResult<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('reservations')")?;
    let pk: Vec<String> = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(5)?)))?
        .filter_map(|r| match r {
            Ok((name, pk)) if pk > 0 => Some(Ok(name)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<_, _>>()?;
    if pk == ["reservation_id"] {
        return Ok(true);
    }

    let mut stmt = conn.prepare("PRAGMA index_list('reservations')")?;
    let unique_indexes: Vec<String> = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(4)?,
            ))
        })?
        .filter_map(|r| match r {
            Ok((name, unique, partial)) if unique == 1 && partial == 0 => Some(Ok(name)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<_, _>>()?;

    for index in unique_indexes {
        let mut stmt = conn.prepare(&format!(
            "PRAGMA index_info('{}')",
            index.replace('\'', "''")
        ))?;
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(2))?
            .collect::<Result<_, _>>()?;
        if columns == ["reservation_id"] {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Legacy tables may carry `reservation_id` as a plain column. Give it a
/// unique index so duplicate inserts are rejected like on a fresh table.
/// Blank ids become NULL first (NULLs never collide; backfill treats both
/// the same way). Ids stored more than once abort the migration.
fn ensure_unique_reservation_id(conn: &Connection) -> AppResult<()> {
    if reservation_id_is_unique(conn)? {
        return Ok(());
    }

    let duplicate: Option<(String, i64)> = conn
        .query_row(
            "SELECT reservation_id, COUNT(*) FROM reservations
             WHERE reservation_id IS NOT NULL AND TRIM(reservation_id) <> ''
             GROUP BY reservation_id HAVING COUNT(*) > 1
             LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    if let Some((id, n)) = duplicate {
        return Err(AppError::Migration(format!(
            "reservation id '{id}' is stored {n} times; remove the duplicates before using this database"
        )));
    }

    conn.execute(
        "UPDATE reservations SET reservation_id = NULL WHERE TRIM(reservation_id) = ''",
        [],
    )?;
    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_id
         ON reservations(reservation_id);",
    )?;

    if !migration_applied(conn, "unique_reservation_id")? {
        mark_applied(
            conn,
            "unique_reservation_id",
            "Added unique index on reservations.reservation_id",
        )?;
    }
    info!("unique index on reservation_id created");
    Ok(())
}

/// Rewrite stored datetimes into the canonical layout so that text
/// ordering and day ranges stay chronological. Values that cannot be read
/// at all are left alone; `db --check` lists them. Returns how many rows
/// were rewritten.
fn normalize_datetimes(conn: &Connection) -> AppResult<usize> {
    let mut stmt = conn.prepare(
        "SELECT rowid, datetime FROM reservations
         WHERE typeof(datetime) = 'text' AND datetime NOT GLOB ?1",
    )?;
    let pending: Vec<(i64, String)> = stmt
        .query_map([CANONICAL_DATETIME_GLOB], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<_, _>>()?;

    let mut rewritten = 0;
    for (rowid, raw) in pending {
        match parse_stored_datetime(&raw) {
            Some(dt) => {
                conn.execute(
                    "UPDATE reservations SET datetime = ?1 WHERE rowid = ?2",
                    params![to_db_datetime(&dt), rowid],
                )?;
                rewritten += 1;
            }
            None => warn!(rowid, datetime = %raw, "unreadable reservation datetime"),
        }
    }

    if rewritten > 0 {
        if !migration_applied(conn, "normalize_datetime")? {
            mark_applied(
                conn,
                "normalize_datetime",
                &format!("Rewrote {rewritten} datetime value(s) into YYYY-MM-DDTHH:MM:SS"),
            )?;
        }
        info!(rewritten, "reservation datetimes normalized");
    }
    Ok(rewritten)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create or repair the reservations table
    if reservations_table_exists(conn)? {
        let added = repair_missing_columns(conn)?;
        ensure_unique_reservation_id(conn)?;
        let rewritten = normalize_datetimes(conn)?;
        debug!(added, rewritten, "reservations table present");
    } else {
        create_reservations_table(conn)?;
        mark_applied(conn, "create_reservations", "Created reservations table")?;
        info!("reservations table created");
    }

    Ok(())
}
