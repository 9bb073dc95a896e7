use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::repository::ReservationRepository;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use crate::utils::date::{parse_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Insights { date, json } = cmd {
        let day = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let mut repo = ReservationRepository::open(cfg)?;
        let insights = repo.insights_on(day)?;

        if *json {
            let out = serde_json::to_string_pretty(&insights)
                .map_err(|e| AppError::Other(format!("JSON serialization error: {e}")))?;
            println!("{out}");
            return Ok(());
        }

        println!("📊 Insights for {day}\n");
        println!("{CYAN}• Total:{RESET}     {}", insights.total);
        println!("{CYAN}• Confirmed:{RESET} {GREEN}{}{RESET}", insights.confirmed);
        println!("{CYAN}• Cancelled:{RESET} {RED}{}{RESET}", insights.cancelled);
        println!(
            "{CYAN}• Today:{RESET}     {YELLOW}{}{RESET}",
            insights.today_reservations
        );
    }
    Ok(())
}
