use crate::db::DatabaseManager;
use crate::db::log::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

/// Color of an operation tag in the log listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "migration_applied" | "schema_repair" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Shorten `s` to at most `max` display columns, ending with "...".
fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if UnicodeWidthStr::width(out.as_str()) + 3 >= max {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(db: &DatabaseManager) -> AppResult<()> {
        let entries = load_log(db.connection()?)?;

        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for (id, raw_date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(raw_date);

            let target = truncate(&target, 40);
            let op_w = 18usize.saturating_sub(UnicodeWidthStr::width(operation.as_str()));

            println!(
                "{:>id_w$}: {} | {}{} {} => {}",
                id,
                date,
                color_for_operation(&operation).paint(operation.as_str()),
                " ".repeat(op_w),
                target,
                message,
                id_w = id_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("backup", 40), "backup");
    }

    #[test]
    fn truncate_marks_cut_strings() {
        let t = truncate(&"x".repeat(50), 10);
        assert!(t.ends_with("..."));
        assert!(t.len() <= 10);
    }
}
