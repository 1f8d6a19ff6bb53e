use crate::models::Component;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

/// Text of the low-stock alert, or None when nothing is low.
pub fn low_stock_message(low: &[Component]) -> Option<String> {
    if low.is_empty() {
        return None;
    }

    let mut msg = String::from("Low stock components:");
    for c in low {
        msg.push_str(&format!("\n  - {} ({}): {} units", c.name, c.kind, c.quantity));
    }
    Some(msg)
}

pub fn low_stock_alert(low: &[Component]) {
    if let Some(msg) = low_stock_message(low) {
        warning(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_alert_without_low_stock() {
        assert_eq!(low_stock_message(&[]), None);
    }

    #[test]
    fn alert_lists_every_component() {
        let low = vec![
            Component::new("LED red", "Diode", 2, None, None),
            Component::new("NE555", "IC", 0, None, None),
        ];
        let msg = low_stock_message(&low).expect("alert expected");
        assert!(msg.contains("LED red (Diode): 2 units"));
        assert!(msg.contains("NE555 (IC): 0 units"));
    }
}
