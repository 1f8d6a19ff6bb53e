use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

use super::open_db;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info,
        repair,
    } = cmd
    {
        // Opening runs the schema check / pending migrations.
        let db = open_db(cfg)?;

        //
        // 1) INFO
        //
        if *info {
            stats::print_db_info(&db, cfg.low_stock_threshold)?;
        }

        //
        // 2) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String =
                db.connection()?
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 3) REPAIR
        //
        if *repair {
            println!("{}▶ Recreating components table…{}", CYAN, RESET);
            let rows = db.recreate_table()?;
            println!(
                "{}✔ Table recreated, {} component(s) reinserted (ids reassigned).{}\n",
                GREEN, rows, RESET
            );
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            db.connection()?.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
