use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::repository::ReservationRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{Reservation, Status};
use crate::ui::messages::success;
use crate::utils::date::parse_datetime;
use crate::utils::formatting::{guests, human_datetime};

/// `<prefix>-<uuid>` id for reservations added without `--id`.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

/// Add a new reservation.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        id,
        datetime,
        business,
        party_size,
        name,
        email,
        phone,
        table,
        notes,
        status,
    } = cmd
    {
        //
        // 1. Parse datetime and status
        //
        let dt = parse_datetime(datetime).ok_or_else(|| AppError::InvalidDate(datetime.clone()))?;
        let status = match status {
            Some(s) => s.parse::<Status>()?,
            None => Status::default(),
        };

        //
        // 2. Build the record
        //
        let reservation_id = id.clone().unwrap_or_else(|| generate_id(&cfg.id_prefix));
        let mut reservation =
            Reservation::new(reservation_id, dt, business.as_str(), *party_size).with_status(status);
        reservation.customer_name = name.clone();
        reservation.customer_email = email.clone();
        reservation.contact_phone = phone.clone();
        reservation.table_number = table.clone();
        reservation.notes = notes.clone();

        //
        // 3. Store
        //
        let mut repo = ReservationRepository::open(cfg)?;
        repo.add(&reservation)?;

        success(format!(
            "Reservation {} added: {} at {} ({}, {})",
            reservation.reservation_id,
            reservation.business,
            human_datetime(&reservation.datetime),
            guests(reservation.party_size),
            reservation.status
        ));
    }

    Ok(())
}
