use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::core::repository::ReservationRepository;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut repo = ReservationRepository::open(cfg)?;
        LogLogic::print_log(repo.pool())?;
    }

    Ok(())
}
