use super::status::Status;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A booking record.
///
/// Maps 1:1 onto a row of the `reservations` table:
///
/// | field            | column                       |
/// |------------------|------------------------------|
/// | `reservation_id` | TEXT PRIMARY KEY             |
/// | `datetime`       | TEXT `YYYY-MM-DDTHH:MM:SS`   |
/// | `business`       | TEXT                         |
/// | `party_size`     | INTEGER                      |
/// | contact fields   | TEXT, nullable               |
/// | `status`         | TEXT, default `confirmed`    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub datetime: NaiveDateTime,
    pub business: String,
    pub party_size: u32,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub contact_phone: Option<String>,
    pub table_number: Option<String>,
    pub notes: Option<String>,
    pub status: Status,
}

impl Reservation {
    /// New reservation with every optional field empty and status `confirmed`.
    pub fn new(
        reservation_id: impl Into<String>,
        datetime: NaiveDateTime,
        business: impl Into<String>,
        party_size: u32,
    ) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            datetime,
            business: business.into(),
            party_size,
            customer_name: None,
            customer_email: None,
            contact_phone: None,
            table_number: None,
            notes: None,
            status: Status::default(),
        }
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    pub fn with_table_number(mut self, table: impl Into<String>) -> Self {
        self.table_number = Some(table.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}
