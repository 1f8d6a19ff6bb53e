/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Quantity color:
/// 0 → red
/// at or below threshold → yellow
/// otherwise → reset
pub fn color_for_quantity(quantity: i32, threshold: i32) -> &'static str {
    if quantity <= 0 {
        RED
    } else if quantity <= threshold {
        YELLOW
    } else {
        RESET
    }
}

/// Grey out placeholders such as "" or "No date".
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "No date" || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
