use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::repository::ReservationRepository;
use crate::errors::{AppError, AppResult};
use crate::models::Status;
use crate::ui::messages::success;
use crate::utils::colors::colorize_status;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { id, status } = cmd {
        let status: Status = status.parse()?;

        let mut repo = ReservationRepository::open(cfg)?;
        if !repo.update_status(id, status)? {
            return Err(AppError::NotFound(id.clone()));
        }

        success(format!("Reservation {id} is now {}", colorize_status(status)));
    }
    Ok(())
}
