use crate::errors::{AppError, AppResult};
use crate::models::{Insights, Reservation, ReservationUpdate, Status};
use crate::utils::date::{parse_stored_datetime, to_db_datetime};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};
use tracing::warn;

const SELECT_COLUMNS: &str = "reservation_id, datetime, business, party_size, customer_name, \
     customer_email, contact_phone, table_number, notes, status";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

/// The domain error behind a row that exists but cannot be turned into a
/// [`Reservation`] (bad datetime, status or party size).
fn unreadable_reason(err: &rusqlite::Error) -> Option<&AppError> {
    match err {
        rusqlite::Error::FromSqlConversionFailure(_, _, inner) => inner.downcast_ref::<AppError>(),
        _ => None,
    }
}

pub fn map_row(row: &Row) -> Result<Reservation> {
    let datetime = match row.get::<_, Value>("datetime")? {
        Value::Text(raw) => parse_stored_datetime(&raw)
            .ok_or_else(|| conversion_error(AppError::InvalidDate(raw)))?,
        other => return Err(conversion_error(AppError::InvalidDate(format!("{other:?}")))),
    };

    let status_str: Option<String> = row.get("status")?;
    let status = status_str
        .as_deref()
        .and_then(Status::from_db_str)
        .ok_or_else(|| {
            conversion_error(AppError::InvalidStatus(status_str.clone().unwrap_or_default()))
        })?;

    let raw_party_size: Value = row.get("party_size")?;
    let party_size = match &raw_party_size {
        Value::Integer(n) => u32::try_from(*n).ok(),
        _ => None,
    }
    .ok_or_else(|| {
        let value = match &raw_party_size {
            Value::Integer(n) => n.to_string(),
            Value::Text(t) => t.clone(),
            other => format!("{other:?}"),
        };
        conversion_error(AppError::InvalidValue {
            field: "party_size".into(),
            value,
        })
    })?;

    Ok(Reservation {
        reservation_id: row
            .get::<_, Option<String>>("reservation_id")?
            .unwrap_or_default(),
        datetime,
        business: row.get::<_, Option<String>>("business")?.unwrap_or_default(),
        party_size,
        customer_name: row.get("customer_name")?,
        customer_email: row.get("customer_email")?,
        contact_phone: row.get("contact_phone")?,
        table_number: row.get("table_number")?,
        notes: row.get("notes")?,
        status,
    })
}

pub fn insert_reservation(conn: &Connection, r: &Reservation) -> AppResult<()> {
    conn.execute(
        "INSERT INTO reservations (reservation_id, datetime, business, party_size,
             customer_name, customer_email, contact_phone, table_number, notes, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            r.reservation_id,
            to_db_datetime(&r.datetime),
            r.business,
            r.party_size,
            r.customer_name,
            r.customer_email,
            r.contact_phone,
            r.table_number,
            r.notes,
            r.status.to_db_str(),
        ],
    )
    .map_err(|e| AppError::from_insert(e, &r.reservation_id))?;
    Ok(())
}

/// Every readable reservation, newest `datetime` first.
///
/// A legacy row that cannot be mapped is skipped with a warning instead of
/// failing the whole listing; [`unreadable_rows`] reports it.
pub fn load_all(conn: &Connection) -> AppResult<Vec<Reservation>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT rowid AS row_num, {SELECT_COLUMNS} FROM reservations
         ORDER BY datetime DESC, rowid DESC"
    ))?;

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        match map_row(row) {
            Ok(r) => out.push(r),
            Err(e) => {
                let Some(reason) = unreadable_reason(&e).map(ToString::to_string) else {
                    return Err(e.into());
                };
                let rowid: i64 = row.get("row_num")?;
                warn!(rowid, %reason, "skipping unreadable reservation");
            }
        }
    }
    Ok(out)
}

/// A stored row that [`map_row`] rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableRow {
    pub rowid: i64,
    pub reservation_id: Option<String>,
    pub reason: String,
}

/// Rows skipped by [`load_all`], in rowid order.
pub fn unreadable_rows(conn: &Connection) -> AppResult<Vec<UnreadableRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT rowid AS row_num, {SELECT_COLUMNS} FROM reservations ORDER BY rowid ASC"
    ))?;

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        if let Err(e) = map_row(row) {
            let Some(reason) = unreadable_reason(&e).map(ToString::to_string) else {
                return Err(e.into());
            };
            out.push(UnreadableRow {
                rowid: row.get("row_num")?,
                reservation_id: row.get("reservation_id")?,
                reason,
            });
        }
    }
    Ok(out)
}

pub fn load_by_id(conn: &Connection, id: &str) -> AppResult<Option<Reservation>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM reservations WHERE reservation_id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn count_by_id(conn: &Connection, id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM reservations WHERE reservation_id = ?1",
        [id],
        |row| row.get(0),
    )?)
}

/// Returns the number of rows touched (0 or 1).
pub fn update_status(conn: &Connection, id: &str, status: Status) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE reservations SET status = ?1 WHERE reservation_id = ?2",
        params![status.to_db_str(), id],
    )?;
    Ok(n)
}

/// Apply `update` to the row and force `status = 'updated'`.
/// Returns the number of rows touched; an empty update touches nothing.
pub fn update_fields(conn: &Connection, id: &str, update: &ReservationUpdate) -> AppResult<usize> {
    let assignments = update.assignments();
    if assignments.is_empty() {
        return Ok(0);
    }

    let mut set_clause: Vec<String> = assignments
        .iter()
        .enumerate()
        .map(|(i, (field, _))| format!("{} = ?{}", field.column(), i + 1))
        .collect();
    set_clause.push(format!("status = ?{}", assignments.len() + 1));

    let sql = format!(
        "UPDATE reservations SET {} WHERE reservation_id = ?{}",
        set_clause.join(", "),
        assignments.len() + 2
    );

    let mut values: Vec<Value> = assignments.into_iter().map(|(_, v)| v).collect();
    values.push(Value::Text(Status::Updated.to_db_str().to_string()));
    values.push(Value::Text(id.to_string()));

    let n = conn.execute(&sql, params_from_iter(values))?;
    Ok(n)
}

/// All four dashboard counts in one statement. `today` is the half-open
/// `[start, end)` range of the day of interest, in DB datetime format.
pub fn count_insights(conn: &Connection, today: (&str, &str)) -> AppResult<Insights> {
    let (start, end) = today;
    let counts = conn.query_row(
        "SELECT COUNT(*),
                IFNULL(SUM(CASE WHEN status = 'confirmed' THEN 1 ELSE 0 END), 0),
                IFNULL(SUM(CASE WHEN status = 'cancelled' THEN 1 ELSE 0 END), 0),
                IFNULL(SUM(CASE WHEN datetime >= ?1 AND datetime < ?2 THEN 1 ELSE 0 END), 0)
         FROM reservations",
        params![start, end],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        },
    )?;

    let as_u64 = |n: i64| u64::try_from(n).unwrap_or_default();
    Ok(Insights {
        total: as_u64(counts.0),
        confirmed: as_u64(counts.1),
        cancelled: as_u64(counts.2),
        today_reservations: as_u64(counts.3),
    })
}

/// Internal row ids of rows whose `reservation_id` is NULL or blank.
pub fn rows_missing_id(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT rowid FROM reservations
         WHERE reservation_id IS NULL OR TRIM(reservation_id) = ''
         ORDER BY rowid ASC",
    )?;
    let ids = stmt
        .query_map([], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(ids)
}

pub fn assign_id(conn: &Connection, rowid: i64, id: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE reservations SET reservation_id = ?1 WHERE rowid = ?2",
        params![id, rowid],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;

    fn memory_db() -> DbPool {
        let mut pool = DbPool::in_memory().unwrap();
        pool.with_conn(|conn| init_db(conn)).unwrap();
        pool
    }

    fn insert_raw(conn: &Connection, id: &str, datetime: &str, status: &str) {
        conn.execute(
            "INSERT INTO reservations (reservation_id, datetime, business, party_size, status)
             VALUES (?1, ?2, 'Bistro', 2, ?3)",
            params![id, datetime, status],
        )
        .unwrap();
    }

    #[test]
    fn unreadable_rows_are_skipped_and_reported() {
        let pool = memory_db();
        insert_raw(&pool.conn, "GOOD", "2024-06-15T19:00:00", "confirmed");
        insert_raw(&pool.conn, "BAD", "sometime soon", "confirmed");
        pool.conn
            .execute(
                "INSERT INTO reservations (reservation_id, datetime, business, party_size)
                 VALUES ('NEG', '2024-06-15T20:00:00', 'Bistro', -3)",
                [],
            )
            .unwrap();

        let ids: Vec<String> = load_all(&pool.conn)
            .unwrap()
            .into_iter()
            .map(|r| r.reservation_id)
            .collect();
        assert_eq!(ids, ["GOOD"]);

        let bad = unreadable_rows(&pool.conn).unwrap();
        assert_eq!(bad.len(), 2);
        assert_eq!(bad[0].reservation_id.as_deref(), Some("BAD"));
        assert!(bad[0].reason.contains("sometime soon"));
        assert_eq!(bad[1].reservation_id.as_deref(), Some("NEG"));
        assert!(bad[1].reason.contains("party_size"));
    }

    #[test]
    fn get_reports_a_negative_party_size() {
        let pool = memory_db();
        pool.conn
            .execute(
                "INSERT INTO reservations (reservation_id, datetime, business, party_size)
                 VALUES ('NEG', '2024-06-15T20:00:00', 'Bistro', -3)",
                [],
            )
            .unwrap();

        match load_by_id(&pool.conn, "NEG").unwrap_err() {
            AppError::Db(inner) => assert!(matches!(
                unreadable_reason(&inner),
                Some(AppError::InvalidValue { field, value })
                    if field == "party_size" && value == "-3"
            )),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn insights_day_range_is_half_open() {
        let pool = memory_db();
        insert_raw(&pool.conn, "A", "2024-06-15T00:00:00", "confirmed");
        insert_raw(&pool.conn, "B", "2024-06-15T23:59:59", "updated");
        insert_raw(&pool.conn, "C", "2024-06-16T00:00:00", "cancelled");

        let i = count_insights(&pool.conn, ("2024-06-15T00:00:00", "2024-06-16T00:00:00")).unwrap();
        assert_eq!(i.total, 3);
        assert_eq!(i.confirmed, 1);
        assert_eq!(i.cancelled, 1);
        assert_eq!(i.today_reservations, 2);
    }

    #[test]
    fn rows_missing_id_finds_null_and_blank() {
        let pool = memory_db();
        insert_raw(&pool.conn, "OK", "2024-06-15T12:00:00", "confirmed");
        insert_raw(&pool.conn, "   ", "2024-06-15T12:00:00", "confirmed");
        pool.conn
            .execute(
                "INSERT INTO reservations (reservation_id, datetime, business, party_size)
                 VALUES (NULL, '2024-06-15T12:00:00', 'Bistro', 2)",
                [],
            )
            .unwrap();

        assert_eq!(rows_missing_id(&pool.conn).unwrap(), vec![2, 3]);
    }
}
