use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Component;
use crate::ui::messages::low_stock_alert;
use crate::utils::table::component_table;

use super::{open_db, print_json};

fn print_components(components: &[Component], cfg: &Config, json: bool, empty_msg: &str) -> AppResult<()> {
    if json {
        return print_json(components);
    }

    if components.is_empty() {
        println!("{}", empty_msg);
        return Ok(());
    }

    let table = component_table(components, cfg.low_stock_threshold, &cfg.date_format);
    print!("{}", table.render());
    println!("{} component(s)", components.len());
    Ok(())
}

/// Handles `list`, `search`, `low`, `types` and `count`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let db = open_db(cfg)?;

    match cmd {
        Commands::List { json } => {
            let all = db.get_all_components()?;
            print_components(&all, cfg, *json, "No components stored.")?;

            if !*json {
                let low: Vec<Component> = all
                    .into_iter()
                    .filter(|c| c.is_low_stock(cfg.low_stock_threshold))
                    .collect();
                low_stock_alert(&low);
            }
        }
        Commands::Search { keyword, json } => {
            let found = db.search_components(keyword)?;
            print_components(
                &found,
                cfg,
                *json,
                &format!("No components matching '{}'.", keyword),
            )?;
        }
        Commands::Low { threshold, json } => {
            let t = threshold.unwrap_or(cfg.low_stock_threshold);
            let low = db.get_low_stock_components(t)?;
            print_components(
                &low,
                cfg,
                *json,
                &format!("No components at or below {} units.", t),
            )?;
        }
        Commands::Types => {
            for t in db.get_component_types()? {
                println!("{}", t);
            }
        }
        Commands::Count => {
            println!("{}", db.get_component_count()?);
        }
        _ => {}
    }

    Ok(())
}
