use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backfill::BackfillLogic;
use crate::core::repository::ReservationRepository;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Backfill) {
        let mut repo = ReservationRepository::open(cfg)?;
        let fixed = BackfillLogic::apply(repo.pool(), &cfg.id_prefix)?;

        if fixed == 0 {
            info("Every reservation already has an identifier.");
        } else {
            success(format!("Fixed {fixed} reservation(s) missing an identifier."));
        }
    }
    Ok(())
}
