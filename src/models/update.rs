//! Typed partial updates for a reservation.
//!
//! The set of updatable columns is closed: [`ReservationField`] names every
//! column a caller may change, so unknown keys are rejected here with
//! [`AppError::InvalidField`] instead of reaching SQLite.

use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_datetime, to_db_datetime};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationField {
    Datetime,
    Business,
    PartySize,
    CustomerName,
    CustomerEmail,
    ContactPhone,
    TableNumber,
    Notes,
}

impl ReservationField {
    pub const ALL: [ReservationField; 8] = [
        ReservationField::Datetime,
        ReservationField::Business,
        ReservationField::PartySize,
        ReservationField::CustomerName,
        ReservationField::CustomerEmail,
        ReservationField::ContactPhone,
        ReservationField::TableNumber,
        ReservationField::Notes,
    ];

    /// Column name in the `reservations` table.
    pub fn column(&self) -> &'static str {
        match self {
            ReservationField::Datetime => "datetime",
            ReservationField::Business => "business",
            ReservationField::PartySize => "party_size",
            ReservationField::CustomerName => "customer_name",
            ReservationField::CustomerEmail => "customer_email",
            ReservationField::ContactPhone => "contact_phone",
            ReservationField::TableNumber => "table_number",
            ReservationField::Notes => "notes",
        }
    }
}

impl FromStr for ReservationField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        ReservationField::ALL
            .into_iter()
            .find(|f| f.column() == key)
            .ok_or_else(|| AppError::InvalidField(s.to_string()))
    }
}

impl fmt::Display for ReservationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.column())
    }
}

/// Fields to overwrite on an existing reservation. `None` leaves the column
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationUpdate {
    pub datetime: Option<NaiveDateTime>,
    pub business: Option<String>,
    pub party_size: Option<u32>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub contact_phone: Option<String>,
    pub table_number: Option<String>,
    pub notes: Option<String>,
}

impl ReservationUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datetime(mut self, dt: NaiveDateTime) -> Self {
        self.datetime = Some(dt);
        self
    }

    pub fn business(mut self, business: impl Into<String>) -> Self {
        self.business = Some(business.into());
        self
    }

    pub fn party_size(mut self, size: u32) -> Self {
        self.party_size = Some(size);
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    pub fn table_number(mut self, table: impl Into<String>) -> Self {
        self.table_number = Some(table.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set a field from its textual key and value, e.g. `("party_size", "6")`.
    pub fn set(&mut self, key: &str, raw: &str) -> AppResult<()> {
        let field: ReservationField = key.parse()?;
        let raw = raw.trim();

        match field {
            ReservationField::Datetime => {
                self.datetime =
                    Some(parse_datetime(raw).ok_or_else(|| AppError::InvalidDate(raw.into()))?);
            }
            ReservationField::PartySize => {
                let size = raw.parse::<u32>().map_err(|_| AppError::InvalidValue {
                    field: field.to_string(),
                    value: raw.into(),
                })?;
                self.party_size = Some(size);
            }
            ReservationField::Business => self.business = Some(raw.into()),
            ReservationField::CustomerName => self.customer_name = Some(raw.into()),
            ReservationField::CustomerEmail => self.customer_email = Some(raw.into()),
            ReservationField::ContactPhone => self.contact_phone = Some(raw.into()),
            ReservationField::TableNumber => self.table_number = Some(raw.into()),
            ReservationField::Notes => self.notes = Some(raw.into()),
        }

        Ok(())
    }

    /// Build an update from `key → value` pairs, failing on the first
    /// unknown key or malformed value.
    pub fn from_pairs<I, K, V>(pairs: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::new();
        for (k, v) in pairs {
            update.set(k.as_ref(), v.as_ref())?;
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column/value pairs in a stable order, ready to bind into SQL.
    pub fn assignments(&self) -> Vec<(ReservationField, Value)> {
        let text = |v: &Option<String>| v.clone().map(Value::Text);

        let values = [
            (
                ReservationField::Datetime,
                self.datetime.map(|dt| Value::Text(to_db_datetime(&dt))),
            ),
            (ReservationField::Business, text(&self.business)),
            (
                ReservationField::PartySize,
                self.party_size.map(|n| Value::Integer(i64::from(n))),
            ),
            (ReservationField::CustomerName, text(&self.customer_name)),
            (ReservationField::CustomerEmail, text(&self.customer_email)),
            (ReservationField::ContactPhone, text(&self.contact_phone)),
            (ReservationField::TableNumber, text(&self.table_number)),
            (ReservationField::Notes, text(&self.notes)),
        ];

        values
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}
