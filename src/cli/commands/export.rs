use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::repository::ReservationRepository;
use crate::errors::AppResult;
use crate::models::Status;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        status,
        force,
    } = cmd
    {
        let status = status.as_deref().map(str::parse::<Status>).transpose()?;
        let mut repo = ReservationRepository::open(cfg)?;
        ExportLogic::export(&mut repo, *format, file, status, *force)?;
    }
    Ok(())
}
