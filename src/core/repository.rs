//! Reservation repository: the CRUD and lifecycle surface over the store.
//!
//! Each operation runs in its own transaction on the pool's connection and
//! commits before returning. Writes also append an audit row to `log` in the
//! same transaction, so a rolled back write leaves no trace.

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Insights, Reservation, ReservationUpdate, Status};
use crate::utils::date::{day_bounds, today};
use chrono::NaiveDate;
use tracing::{debug, info};

pub struct ReservationRepository {
    pool: DbPool,
}

impl ReservationRepository {
    /// Open the database named in `cfg` and make sure the schema exists.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;
        Self::with_pool(pool)
    }

    pub fn with_pool(mut pool: DbPool) -> AppResult<Self> {
        pool.with_conn(|conn| init_db(conn))?;
        debug!(path = pool.path(), "reservation store ready");
        Ok(Self { pool })
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    /// Insert a new reservation. A colliding id fails with
    /// [`AppError::DuplicateIdentifier`] and leaves the store unchanged.
    pub fn add(&mut self, reservation: &Reservation) -> AppResult<()> {
        if reservation.reservation_id.trim().is_empty() {
            return Err(AppError::InvalidField("reservation_id".into()));
        }

        self.pool.with_tx(|tx| {
            queries::insert_reservation(tx, reservation)?;
            ttlog(
                tx,
                "add",
                &reservation.reservation_id,
                &format!(
                    "{} | {} | party of {}",
                    reservation.business,
                    crate::utils::date::to_db_datetime(&reservation.datetime),
                    reservation.party_size
                ),
            )
        })?;

        info!(
            reservation_id = %reservation.reservation_id,
            status = %reservation.status,
            "reservation added"
        );
        Ok(())
    }

    /// Every reservation, newest first.
    pub fn list_all(&mut self) -> AppResult<Vec<Reservation>> {
        self.pool.with_tx(|tx| queries::load_all(tx))
    }

    pub fn get(&mut self, id: &str) -> AppResult<Option<Reservation>> {
        self.pool.with_tx(|tx| queries::load_by_id(tx, id))
    }

    /// Set the status of one reservation. Returns `false` when `id` is unknown.
    pub fn update_status(&mut self, id: &str, status: Status) -> AppResult<bool> {
        let matched = self.pool.with_tx(|tx| {
            let n = queries::update_status(tx, id, status)?;
            if n > 0 {
                ttlog(tx, "status", id, &format!("Status set to {status}"))?;
            }
            Ok(n > 0)
        })?;

        debug!(reservation_id = id, %status, matched, "status update");
        Ok(matched)
    }

    /// Overwrite the fields present in `update` and mark the reservation
    /// `updated`. An empty update returns `false` without touching storage.
    pub fn update_reservation(&mut self, id: &str, update: &ReservationUpdate) -> AppResult<bool> {
        if update.is_empty() {
            return Ok(false);
        }

        let fields: Vec<&str> = update
            .assignments()
            .iter()
            .map(|(f, _)| f.column())
            .collect();
        let fields = fields.join(",");

        let matched = self.pool.with_tx(|tx| {
            let n = queries::update_fields(tx, id, update)?;
            if n > 0 {
                ttlog(tx, "edit", id, &format!("Updated fields: {fields}"))?;
            }
            Ok(n > 0)
        })?;

        debug!(reservation_id = id, fields = %fields, matched, "field update");
        Ok(matched)
    }

    /// Dashboard counts, with "today" taken from the local clock.
    pub fn insights(&mut self) -> AppResult<Insights> {
        self.insights_on(today())
    }

    pub fn insights_on(&mut self, date: NaiveDate) -> AppResult<Insights> {
        let (start, end) = day_bounds(date);
        self.pool
            .with_tx(|tx| queries::count_insights(tx, (&start, &end)))
    }
}
