use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Component;
use crate::ui::messages::success;
use crate::utils::date::date_str_to_timestamp;

use super::{open_db, warn_if_low};

/// Parse an optional `YYYY-MM-DD` argument into epoch seconds.
/// An empty string means "no date".
pub(crate) fn parse_purchase_date(date: Option<&str>) -> AppResult<Option<i64>> {
    match date {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => date_str_to_timestamp(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

/// Trimmed value of a required text field; blank input is rejected.
pub(crate) fn check_required(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Other(format!("Component {} cannot be empty", field)));
    }
    Ok(value.to_string())
}

pub(crate) fn check_quantity(quantity: i32) -> AppResult<i32> {
    if quantity < 0 {
        return Err(AppError::InvalidQuantity(format!(
            "{} (quantity cannot be negative)",
            quantity
        )));
    }
    Ok(quantity)
}

/// Add a new component.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        kind,
        quantity,
        location,
        date,
    } = cmd
    {
        //
        // 1. Validate input
        //
        let name = check_required("name", name)?;
        let kind = check_required("type", kind)?;
        let quantity = check_quantity(*quantity)?;
        let purchase_timestamp = parse_purchase_date(date.as_deref())?;

        let component = Component::new(
            name,
            kind,
            quantity,
            location.clone(),
            purchase_timestamp,
        );

        //
        // 2. Store
        //
        let db = open_db(cfg)?;
        let id = db.add_component(&component)?;

        success(format!("Component #{} '{}' added.", id, component.name));
        warn_if_low(&component, cfg);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_date_means_no_date() {
        assert_eq!(parse_purchase_date(None).expect("none"), None);
        assert_eq!(parse_purchase_date(Some("  ")).expect("blank"), None);
    }

    #[test]
    fn bad_date_is_an_error() {
        assert!(matches!(
            parse_purchase_date(Some("2024/01/01")),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        assert!(check_required("name", "   ").is_err());
        assert_eq!(check_required("type", " IC ").expect("non-empty"), "IC");
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(check_quantity(-1).is_err());
        assert_eq!(check_quantity(0).expect("zero is valid"), 0);
    }
}
