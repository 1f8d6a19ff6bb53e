use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

use super::add::{check_quantity, check_required, parse_purchase_date};
use super::{open_db, warn_if_low};

/// Update the given fields of an existing component; the rest are kept.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Update {
        id,
        name,
        kind,
        quantity,
        location,
        date,
    } = cmd
    {
        let db = open_db(cfg)?;
        let mut component = db.get_component(*id)?.ok_or(AppError::NotFound(*id))?;

        if let Some(n) = name {
            component.name = check_required("name", n)?;
        }
        if let Some(k) = kind {
            component.kind = check_required("type", k)?;
        }
        if let Some(q) = quantity {
            component.quantity = check_quantity(*q)?;
        }
        if let Some(l) = location {
            component = component.with_location(l.trim());
        }
        if date.is_some() {
            component.purchase_timestamp = parse_purchase_date(date.as_deref())?;
        }

        if db.update_component(&component)? {
            success(format!("Component #{} '{}' updated.", id, component.name));
            warn_if_low(&component, cfg);
        } else {
            // Deleted between the read and the write.
            info(format!("No component with id {}; nothing updated.", id));
        }
    }

    Ok(())
}
