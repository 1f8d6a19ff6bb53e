pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod show;
pub mod update;

use crate::config::Config;
use crate::db::DatabaseManager;
use crate::errors::AppResult;
use crate::models::Component;
use crate::ui::messages::warning;

/// Open the configured database, creating/verifying the schema.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DatabaseManager> {
    let mut db = DatabaseManager::with_path(cfg.database_path());
    db.connect(None)?;
    Ok(db)
}

/// Print the JSON form of `components` to stdout.
pub(crate) fn print_json(components: &[Component]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(components)
        .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Warn when `component` sits at or below the configured threshold.
pub(crate) fn warn_if_low(component: &Component, cfg: &Config) {
    if component.is_low_stock(cfg.low_stock_threshold) {
        warning(format!(
            "'{}' is low on stock: {} left (threshold {})",
            component.name, component.quantity, cfg.low_stock_threshold
        ));
    }
}
