use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::repository::ReservationRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{Reservation, Status};
use crate::utils::colors::colorize_status;
use crate::utils::formatting::{human_datetime, opt_field};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { status, json } = cmd {
        let filter = status.as_deref().map(str::parse::<Status>).transpose()?;

        let mut repo = ReservationRepository::open(cfg)?;
        let rows: Vec<Reservation> = repo
            .list_all()?
            .into_iter()
            .filter(|r| filter.is_none_or(|s| r.status == s))
            .collect();

        if *json {
            let out = serde_json::to_string_pretty(&rows)
                .map_err(|e| AppError::Other(format!("JSON serialization error: {e}")))?;
            println!("{out}");
            return Ok(());
        }

        if rows.is_empty() {
            println!("No reservations found.");
            return Ok(());
        }

        println!("📅 Reservations ({}):\n", rows.len());
        print!("{}", render_table(&rows));
    }
    Ok(())
}

fn render_table(rows: &[Reservation]) -> String {
    let mut table = Table::new([
        "ID", "When", "Business", "Guests", "Name", "Phone", "Table", "Status", "Notes",
    ]);

    for r in rows {
        table.add_row(vec![
            r.reservation_id.clone(),
            human_datetime(&r.datetime),
            r.business.clone(),
            r.party_size.to_string(),
            opt_field(r.customer_name.as_deref()),
            opt_field(r.contact_phone.as_deref()),
            opt_field(r.table_number.as_deref()),
            colorize_status(r.status),
            opt_field(r.notes.as_deref()),
        ]);
    }

    table.render()
}
