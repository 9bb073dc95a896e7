use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::repository::ReservationRepository;
use crate::errors::{AppError, AppResult};
use crate::models::ReservationUpdate;
use crate::ui::messages::{success, warning};

/// Split a `--set field=value` argument.
fn split_assignment(raw: &str) -> AppResult<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| AppError::InvalidField(raw.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Update {
        id,
        datetime,
        business,
        party_size,
        name,
        email,
        phone,
        table,
        notes,
        set,
    } = cmd
    {
        //
        // 1. Collect field=value pairs from flags and --set
        //
        let mut pairs: Vec<(&str, String)> = Vec::new();
        let flags = [
            ("datetime", datetime.clone()),
            ("business", business.clone()),
            ("party_size", party_size.map(|n| n.to_string())),
            ("customer_name", name.clone()),
            ("customer_email", email.clone()),
            ("contact_phone", phone.clone()),
            ("table_number", table.clone()),
            ("notes", notes.clone()),
        ];
        for (key, value) in flags {
            if let Some(v) = value {
                pairs.push((key, v));
            }
        }
        for raw in set {
            let (k, v) = split_assignment(raw)?;
            pairs.push((k, v.to_string()));
        }

        let update = ReservationUpdate::from_pairs(pairs)?;
        if update.is_empty() {
            warning("Nothing to update: pass at least one field.");
            return Ok(());
        }

        //
        // 2. Apply
        //
        let mut repo = ReservationRepository::open(cfg)?;
        if !repo.update_reservation(id, &update)? {
            return Err(AppError::NotFound(id.clone()));
        }

        let fields: Vec<&str> = update.assignments().iter().map(|(f, _)| f.column()).collect();
        success(format!(
            "Reservation {id} updated ({}); status set to updated",
            fields.join(", ")
        ));
    }
    Ok(())
}
