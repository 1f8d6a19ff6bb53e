use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, RESET, color_for_quantity, colorize_optional};
use crate::utils::date::timestamp_to_date_str;

use super::{open_db, warn_if_low};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let db = open_db(cfg)?;
        let c = db.get_component(*id)?.ok_or(AppError::NotFound(*id))?;

        let date = c
            .purchase_timestamp
            .and_then(|ts| timestamp_to_date_str(ts, &cfg.date_format))
            .unwrap_or_else(|| "No date".to_string());

        println!("{CYAN}• ID:{RESET}        {}", *id);
        println!("{CYAN}• Name:{RESET}      {}", c.name);
        println!("{CYAN}• Type:{RESET}      {}", c.kind);
        println!(
            "{CYAN}• Quantity:{RESET}  {}{}{RESET}",
            color_for_quantity(c.quantity, cfg.low_stock_threshold),
            c.quantity
        );
        println!("{CYAN}• Location:{RESET}  {}", colorize_optional(c.location_str()));
        println!("{CYAN}• Purchased:{RESET} {}", colorize_optional(&date));

        warn_if_low(&c, cfg);
    }

    Ok(())
}
