use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{assign_id, rows_missing_id};
use crate::errors::AppResult;
use chrono::{DateTime, Local, TimeZone};
use tracing::info;

/// One-shot repair of legacy rows stored without a `reservation_id`.
pub struct BackfillLogic;

impl BackfillLogic {
    /// Assign `<prefix>-<YYYYMMDDHHMMSS>-<rowid>` to every row with a NULL or
    /// blank id. All assignments commit together; returns how many rows
    /// were fixed.
    pub fn apply(pool: &mut DbPool, prefix: &str) -> AppResult<usize> {
        Self::apply_at(pool, prefix, Local::now())
    }

    pub fn apply_at<Tz: TimeZone>(
        pool: &mut DbPool,
        prefix: &str,
        now: DateTime<Tz>,
    ) -> AppResult<usize>
    where
        Tz::Offset: std::fmt::Display,
    {
        let stamp = now.format("%Y%m%d%H%M%S").to_string();

        let fixed = pool.with_tx(|tx| {
            let rows = rows_missing_id(tx)?;

            for rowid in &rows {
                assign_id(tx, *rowid, &generated_id(prefix, &stamp, *rowid))?;
            }

            if !rows.is_empty() {
                ttlog(
                    tx,
                    "backfill",
                    "reservation_id",
                    &format!("Assigned identifiers to {} reservation(s)", rows.len()),
                )?;
            }

            Ok(rows.len())
        })?;

        info!(fixed, "identifier backfill completed");
        Ok(fixed)
    }
}

pub fn generated_id(prefix: &str, stamp: &str, rowid: i64) -> String {
    format!("{prefix}-{stamp}-{rowid}")
}
