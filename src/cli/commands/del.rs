use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

use super::open_db;

/// Delete a component. An unknown id is reported but is not an error.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let db = open_db(cfg)?;

        if db.delete_component(*id)? {
            success(format!("Component #{} has been deleted.", id));
        } else {
            info(format!("No component with id {}; nothing deleted.", id));
        }
    }

    Ok(())
}
