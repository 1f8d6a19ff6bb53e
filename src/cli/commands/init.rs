use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;

use super::open_db;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ Configuration
    //
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing rInventory…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", cfg.database_path().display());

    //
    // 2️⃣ Database + schema
    //
    if let Some(parent) = cfg.database_path().parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let db = open_db(&cfg)?;

    //
    // 3️⃣ Internal log (non-blocking)
    //
    log::ttlog_best_effort(
        db.connection()?,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", cfg.database_path().display()),
    );

    println!("🎉 rInventory initialization completed!");
    Ok(())
}
